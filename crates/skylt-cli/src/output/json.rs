use skylt_core::error::SkyltError;
use skylt_core::CompileResult;

pub fn print(result: &CompileResult) -> Result<(), SkyltError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
