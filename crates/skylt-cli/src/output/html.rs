use skylt_core::aggregate::{HazardEntry, StatementEntry};
use skylt_core::error::SkyltError;
use skylt_core::model::ChemicalRecord;
use skylt_core::CompileResult;
use std::path::Path;

/// Write the four HTML reports: the per-chemical inventory and the three
/// statement summary tables.
pub fn write_reports(result: &CompileResult, dir: &Path) -> Result<(), SkyltError> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(dir.join("inventory.html"), inventory_page(&result.chemicals))?;
    std::fs::write(dir.join("hazards.html"), hazards_page(&result.inventory.hazards))?;
    std::fs::write(
        dir.join("precautions.html"),
        statements_page("Precautionary statements", &result.inventory.precautions),
    )?;
    std::fs::write(dir.join("ppe.html"), ppe_page(&result.inventory.ppe))?;
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn cell(content: &str) -> String {
    if content.is_empty() {
        "<td>-</td>".to_string()
    } else {
        format!("<td>{}</td>", escape(content))
    }
}

fn list_cell(items: &[String]) -> String {
    cell(&items.join("; "))
}

fn link_cell(url: Option<&str>, label: &str) -> String {
    match url {
        Some(url) if !url.is_empty() => format!(
            "<td><a href=\"{}\">{}</a></td>",
            escape(url),
            escape(label)
        ),
        _ => "<td>-</td>".to_string(),
    }
}

fn page(title: &str, header_cells: &[&str], rows: &[String]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("<meta charset=\"utf-8\">\n<title>{}</title>\n", escape(title)));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n", escape(title)));
    html.push_str("<table border=\"1\">\n<thead>\n<tr>");
    for header in header_cells {
        html.push_str(&format!("<th>{}</th>", escape(header)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in rows {
        html.push_str(row);
        html.push('\n');
    }
    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

fn inventory_page(chemicals: &[ChemicalRecord]) -> String {
    // Sorted by name for browsing, like a lab inventory list.
    let mut sorted: Vec<&ChemicalRecord> = chemicals.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let rows: Vec<String> = sorted
        .iter()
        .map(|c| {
            let hazards: Vec<String> = c.hazards.keys().map(|h| h.to_string()).collect();
            let precautions: Vec<String> = c.precautions.keys().map(|p| p.to_string()).collect();
            format!(
                "<tr>{}{}{}{}{}{}{}{}{}</tr>",
                cell(&c.name),
                list_cell(&c.synonyms),
                cell(&c.id),
                cell(c.formula.as_deref().unwrap_or("")),
                list_cell(&hazards),
                list_cell(&precautions),
                list_cell(&c.ppe),
                link_cell(
                    c.product_url.as_deref(),
                    c.product_number.as_deref().unwrap_or("link")
                ),
                link_cell(c.document_ref.as_deref(), "SDS"),
            )
        })
        .collect();

    page(
        "Chemical inventory",
        &[
            "Name",
            "Synonyms",
            "CAS",
            "Formula",
            "Hazards",
            "Precautions",
            "PPE",
            "Product Number",
            "SDS",
        ],
        &rows,
    )
}

fn hazards_page(entries: &[HazardEntry]) -> String {
    let rows: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "<tr>{}{}{}{}{}{}{}{}</tr>",
                cell(&e.code),
                cell(&e.count.to_string()),
                cell(&e.statement),
                list_cell(&e.associated_names),
                list_cell(&e.prevention),
                list_cell(&e.response),
                list_cell(&e.storage),
                list_cell(&e.disposal),
            )
        })
        .collect();

    page(
        "Hazard statements",
        &[
            "Code",
            "Count",
            "Statement",
            "Assoc. Chemicals",
            "Prevention",
            "Response",
            "Storage",
            "Disposal",
        ],
        &rows,
    )
}

fn statements_page(title: &str, entries: &[StatementEntry]) -> String {
    let rows: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "<tr>{}{}{}{}</tr>",
                cell(&e.code),
                cell(&e.count.to_string()),
                cell(&e.statement),
                list_cell(&e.associated_names),
            )
        })
        .collect();

    page(title, &["Code", "Count", "Statement", "Assoc. Chemicals"], &rows)
}

/// A PPE row's code IS its item text, so the page gets a single Item
/// column rather than the code/statement pair of the other summaries.
fn ppe_page(entries: &[StatementEntry]) -> String {
    let rows: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "<tr>{}{}{}</tr>",
                cell(&e.code),
                cell(&e.count.to_string()),
                list_cell(&e.associated_names),
            )
        })
        .collect();

    page(
        "Personal protective equipment",
        &["Item", "Count", "Assoc. Chemicals"],
        &rows,
    )
}
