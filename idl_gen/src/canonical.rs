//! Builds the frozen typed tree out of a canonical document value.
//!
//! Runs strictly after the strict schema gate, so any structural surprise
//! here is a pipeline defect rather than an input problem.

use crate::error::{Error, GenResult};
use idl_types::{Document, Function, Interface, TypeAlias};
use indexmap::IndexMap;
use serde_json::Value;

pub fn document_from_canonical(value: &Value) -> GenResult<Document> {
    let root = value
        .as_object()
        .ok_or_else(|| Error::internal("canonical document root is not an object"))?;

    let output_dir = root
        .get("@output_dir")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::internal("canonical document is missing @output_dir"))?
        .to_string();

    let mut types = IndexMap::new();
    if let Some(entries) = root.get("types").and_then(Value::as_object) {
        for (name, entry) in entries {
            let alias: TypeAlias = serde_json::from_value(entry.clone()).map_err(|err| {
                Error::internal(format!("canonical type alias `{name}` is malformed: {err}"))
            })?;
            types.insert(name.clone(), alias);
        }
    }

    let mut interfaces = IndexMap::new();
    if let Some(entries) = root.get("interfaces").and_then(Value::as_object) {
        for (name, entry) in entries {
            interfaces.insert(name.clone(), interface_from_canonical(name, entry)?);
        }
    }

    Ok(Document {
        output_dir,
        types,
        interfaces,
    })
}

fn interface_from_canonical(name: &str, value: &Value) -> GenResult<Interface> {
    let entries = value
        .as_object()
        .ok_or_else(|| Error::internal(format!("canonical interface `{name}` is not an object")))?;

    let deprecated = entries
        .get("@deprecated")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let mut functions = IndexMap::new();
    for (function_name, entry) in entries.iter().filter(|(key, _)| !key.starts_with('@')) {
        let function: Function = serde_json::from_value(entry.clone()).map_err(|err| {
            Error::internal(format!(
                "canonical function `{name}.{function_name}` is malformed: {err}"
            ))
        })?;
        functions.insert(function_name.clone(), function);
    }

    Ok(Interface {
        deprecated,
        functions,
    })
}
