use skylt_core::error::SkyltError;
use std::path::PathBuf;

pub fn check(tables_dir: Option<PathBuf>) -> Result<(), SkyltError> {
    let tables = super::load_tables(tables_dir)?;

    println!("Hazard statements:        {}", tables.h_statements().len());
    println!("Precautionary statements: {}", tables.p_statements().len());
    println!("H-to-P associations:      {}", tables.h2p().len());

    if tables.warnings().is_empty() {
        println!("\nNo consistency problems found.");
    } else {
        println!("\n{} consistency problem(s):", tables.warnings().len());
        for warning in tables.warnings() {
            println!("  {warning}");
        }
    }

    Ok(())
}
