/* Codegen command - generate shims and handlers from an IDL document */

use crate::{codegen, compile_value, CompiledDocument};
use std::path::PathBuf;

pub fn run(
    file: PathBuf,
    output_dir: Option<PathBuf>,
    dump_normalized: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        println!("[~] Loading IDL document {}", file.display());
    }

    let source = std::fs::read_to_string(&file)?;
    let raw: serde_json::Value = serde_json::from_str(&source)?;
    let compiled = compile_value(raw)?;

    let output_dir =
        output_dir.unwrap_or_else(|| PathBuf::from(&compiled.document.output_dir));
    if verbose {
        println!(
            "[~] {} interface(s), {} function(s)",
            compiled.document.interfaces.len(),
            function_count(&compiled)
        );
        println!("[~] Output directory: {}", output_dir.display());
    }

    codegen::write_output(&compiled.output, &output_dir)?;

    if dump_normalized {
        let path = output_dir.join("_canonical.idl.json");
        std::fs::write(&path, serde_json::to_string_pretty(&compiled.normalized)?)?;
        if verbose {
            println!("[~] Wrote canonical document to {}", path.display());
        }
    }

    println!("[✓] Code generation complete!");
    Ok(())
}

pub(crate) fn function_count(compiled: &CompiledDocument) -> usize {
    compiled
        .document
        .interfaces
        .values()
        .map(|interface| interface.functions.len())
        .sum()
}
