/* Check command - validate, normalize and lower without writing files */

use super::codegen::function_count;
use crate::compile_value;
use std::path::PathBuf;

pub fn run(file: PathBuf, verbose: bool) -> anyhow::Result<()> {
    if verbose {
        println!("[~] Loading IDL document {}", file.display());
    }

    let source = std::fs::read_to_string(&file)?;
    let raw: serde_json::Value = serde_json::from_str(&source)?;
    let compiled = compile_value(raw)?;

    println!(
        "[✓] Document OK: {} interface(s), {} function(s)",
        compiled.document.interfaces.len(),
        function_count(&compiled)
    );
    Ok(())
}
