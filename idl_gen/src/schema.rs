//! Schema Gate: two-phase validation around the normalizer.
//!
//! The relaxed schema decides whether a raw document is well-formed enough
//! to normalize; the strict schema decides whether the normalized document
//! is fully canonical. A strict failure after a successful relaxed pass is
//! a defect in the normalizer and is reported as such, not as an input
//! error. Validation stops at the first violation and reports the
//! structural path of the offending node plus the violated rule.

use crate::error::{Error, GenResult};
use serde_json::Value;

const RELAXED_SCHEMA: &str = include_str!("../schema/idl-relaxed.json");
const STRICT_SCHEMA: &str = include_str!("../schema/idl-strict.json");

fn compile(source: &str) -> GenResult<jsonschema::Validator> {
    let schema: Value = serde_json::from_str(source)?;
    jsonschema::validator_for(&schema)
        .map_err(|err| Error::internal(format!("embedded schema failed to compile: {err}")))
}

/// Check the raw document against the relaxed schema. Failure is an input
/// error.
pub fn validate_relaxed(doc: &Value) -> GenResult<()> {
    let validator = compile(RELAXED_SCHEMA)?;
    if let Err(err) = validator.validate(doc) {
        return Err(Error::Schema {
            path: err.instance_path.to_string(),
            rule: err.schema_path.to_string(),
            message: err.to_string(),
        });
    }
    Ok(())
}

/// Check the normalized document against the strict schema. Failure means
/// the normalizer produced non-canonical output.
pub fn validate_strict(doc: &Value) -> GenResult<()> {
    let validator = compile(STRICT_SCHEMA)?;
    if let Err(err) = validator.validate(doc) {
        return Err(Error::InternalSchema {
            path: err.instance_path.to_string(),
            rule: err.schema_path.to_string(),
            message: err.to_string(),
        });
    }
    Ok(())
}
