use skylt_core::code::{HazardCode, PrecautionCode};
use skylt_core::error::SkyltError;
use std::path::PathBuf;

pub fn run(code: &str, tables_dir: Option<PathBuf>) -> Result<(), SkyltError> {
    let tables = super::load_tables(tables_dir)?;

    if let Ok(hcode) = HazardCode::parse(code) {
        match tables.hazard_statement(&hcode) {
            Some(text) => println!("{hcode}  {text}"),
            None => println!("{hcode}  (no statement text in the loaded tables)"),
        }

        if let Some(pcodes) = tables.associated_precautions(&hcode) {
            let list: Vec<&str> = pcodes.iter().map(|p| p.as_str()).collect();
            println!("\nAssociated precautions: {}", list.join(", "));
        }

        if let Some(classified) = tables.classified_precautions(&hcode) {
            let sections = [
                ("Prevention", &classified.prevention),
                ("Response", &classified.response),
                ("Storage", &classified.storage),
                ("Disposal", &classified.disposal),
            ];
            for (label, texts) in sections {
                if texts.is_empty() {
                    continue;
                }
                println!("\n{label}:");
                for text in texts {
                    println!("  - {text}");
                }
            }
        }
        return Ok(());
    }

    if let Ok(pcode) = PrecautionCode::parse(code) {
        let text = tables.resolve_precaution(&pcode);
        if text.is_empty() {
            println!("{pcode}  (no statement text in the loaded tables)");
        } else {
            println!("{pcode}  {text}");
        }
        if let Some(class) = pcode.class() {
            println!("Category: {class}");
        }
        return Ok(());
    }

    Err(SkyltError::InvalidCode(code.to_string()))
}
