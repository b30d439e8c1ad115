use skylt_core::aggregate::StatementEntry;
use skylt_core::CompileResult;

pub fn print(result: &CompileResult) {
    println!("=== Hazard statements ===\n");
    if result.inventory.hazards.is_empty() {
        println!("  (none)\n");
    }
    for entry in &result.inventory.hazards {
        println!("  {:<12} x{:<3} {}", entry.code, entry.count, entry.statement);
        println!("    Chemicals: {}", join_or_dash(&entry.associated_names));
        if !entry.associated_precautions.is_empty() {
            println!(
                "    Precautions: {}",
                entry.associated_precautions.join(", ")
            );
        }
        print_category("Prevention", &entry.prevention);
        print_category("Response", &entry.response);
        print_category("Storage", &entry.storage);
        print_category("Disposal", &entry.disposal);
        println!();
    }

    println!("=== Precautionary statements ===\n");
    print_statement_entries(&result.inventory.precautions);

    println!("=== Personal protective equipment ===\n");
    print_ppe_entries(&result.inventory.ppe);
}

fn print_statement_entries(entries: &[StatementEntry]) {
    if entries.is_empty() {
        println!("  (none)\n");
        return;
    }
    for entry in entries {
        println!("  {:<16} x{:<3} {}", entry.code, entry.count, entry.statement);
        println!("    Chemicals: {}", join_or_dash(&entry.associated_names));
    }
    println!();
}

// A PPE entry's code is the item text itself, so the row shows it once.
fn print_ppe_entries(entries: &[StatementEntry]) {
    if entries.is_empty() {
        println!("  (none)\n");
        return;
    }
    for entry in entries {
        println!("  {:<24} x{:<3}", entry.code, entry.count);
        println!("    Chemicals: {}", join_or_dash(&entry.associated_names));
    }
    println!();
}

fn print_category(label: &str, texts: &[String]) {
    if texts.is_empty() {
        return;
    }
    println!("    {label}:");
    for text in texts {
        println!("      - {text}");
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
