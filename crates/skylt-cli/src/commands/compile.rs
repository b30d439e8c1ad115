use skylt_core::error::SkyltError;
use skylt_core::source::JsonRecordSource;
use std::path::PathBuf;

use crate::output;

pub fn run(
    ids_file: PathBuf,
    records_file: PathBuf,
    tables_dir: Option<PathBuf>,
    output_format: &str,
    html_dir: Option<PathBuf>,
) -> Result<(), SkyltError> {
    let tables = super::load_tables(tables_dir)?;

    for warning in tables.warnings() {
        eprintln!("warning: {warning}");
    }

    let ids_text = std::fs::read_to_string(&ids_file)?;
    let ids: Vec<String> = ids_text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    let source = JsonRecordSource::from_path(&records_file)?;
    let result = skylt_core::compile_inventory(&ids, &source, &tables);

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result),
    }

    if let Some(dir) = html_dir {
        output::html::write_reports(&result, &dir)?;
        eprintln!("HTML reports written to {}", dir.display());
    }

    eprintln!(
        "Processed {} chemical(s) out of {} identifier(s) received",
        result.processed, result.requested
    );
    if !result.bad_ids.is_empty() {
        eprintln!("Unable to process the following identifiers:");
        for id in &result.bad_ids {
            eprintln!("  {id}");
        }
    }

    Ok(())
}
