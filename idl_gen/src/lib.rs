//! RPC IDL compiler.
//!
//! Reads a JSON interface document, resolves it into canonical form, and
//! emits paired client-shim / server-handler C headers implementing a
//! binary request/response protocol over a message buffer.
//!
//! The pipeline is a straight line with no shared mutable state:
//! raw document → relaxed schema → normalize → strict schema → typed
//! document → UID table → per-function lowering → emission. It fails fast
//! on the first error and never writes partial output.

pub mod canonical;
pub mod cmds;
pub mod codegen;
pub mod error;
pub mod lowering;
pub mod normalize;
pub mod schema;
pub mod uid;

pub use error::{Error, GenResult};

use idl_types::Document;
use serde_json::Value;

/// Everything the pipeline produced for one document: the frozen typed
/// tree, the canonical JSON it was built from, the lowered protocol
/// scripts, and the rendered files.
#[derive(Debug)]
pub struct CompiledDocument {
    pub document: Document,
    pub normalized: Value,
    pub lowered: Vec<lowering::LoweredInterface>,
    pub output: codegen::GeneratedOutput,
}

/// Run the full pipeline over a parsed document value.
pub fn compile_value(raw: Value) -> GenResult<CompiledDocument> {
    schema::validate_relaxed(&raw)?;

    let mut normalized = raw;
    normalize::normalize(&mut normalized)?;
    schema::validate_strict(&normalized)?;

    let document = canonical::document_from_canonical(&normalized)?;
    let uids = uid::UidTable::build(&document)?;
    let lowered = lowering::lower_document(&document, &uids)?;
    let output = codegen::generate(&lowered)?;

    Ok(CompiledDocument {
        document,
        normalized,
        lowered,
        output,
    })
}

/// Parse and compile a JSON document source.
pub fn compile_str(source: &str) -> GenResult<CompiledDocument> {
    compile_value(serde_json::from_str(source)?)
}
