pub mod compile;
pub mod lookup;
pub mod tables;

use skylt_core::error::SkyltError;
use skylt_core::tables::{builtin, CodeTables};
use std::path::PathBuf;

/// Load code tables from a directory, or fall back to the embedded ones.
pub fn load_tables(dir: Option<PathBuf>) -> Result<CodeTables, SkyltError> {
    match dir {
        Some(dir) => CodeTables::from_dir(&dir),
        None => Ok(builtin::tables().clone()),
    }
}
