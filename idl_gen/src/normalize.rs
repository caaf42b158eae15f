//! Normalizer: expands shorthand document syntax into the canonical form
//! consumed by lowering.
//!
//! One deterministic pass over the raw JSON value, applied between the
//! relaxed and strict schema checks. Function and argument sequences are
//! never reordered. Every operation is idempotent, so normalizing an
//! already-canonical document leaves it unchanged.

use crate::error::{Error, GenResult};
use serde_json::map::Map;
use serde_json::{json, Value};

/// Output location used when the document does not declare one.
pub const DEFAULT_OUTPUT_DIR: &str = "./generated";

/// Marker attribute for declarations that are not implemented yet; such
/// functions are dropped from their interface before lowering.
const TODO_ATTR: &str = "@TODO";

/* Flatten a list-valued `@attrs` into individual `@flag: true` entries.
 * Shared by every entity kind that carries an attribute set. */
fn expand_attrs(obj: &mut Map<String, Value>) {
    let Some(Value::Array(attrs)) = obj.shift_remove("@attrs") else {
        return;
    };
    for attr in attrs {
        if let Value::String(flag) = attr {
            obj.insert(format!("@{flag}"), Value::Bool(true));
        }
    }
}

fn is_attr(key: &str) -> bool {
    key.starts_with('@')
}

/// Normalize a raw document in place.
///
/// Expects a document that already passed the relaxed schema; shapes the
/// relaxed schema does not guarantee are left untouched for the strict
/// gate to reject.
pub fn normalize(doc: &mut Value) -> GenResult<()> {
    let Some(root) = doc.as_object_mut() else {
        return Ok(());
    };

    if !root.contains_key("@output_dir") {
        root.insert(
            "@output_dir".to_string(),
            Value::String(DEFAULT_OUTPUT_DIR.to_string()),
        );
    }
    if !root.contains_key("types") {
        root.insert("types".to_string(), json!({}));
    }
    if !root.contains_key("interfaces") {
        root.insert("interfaces".to_string(), json!({}));
    }

    if let Some(types) = root.get_mut("types").and_then(Value::as_object_mut) {
        for entry in types.values_mut() {
            if let Some(target) = entry.as_str().map(str::to_string) {
                /* Bare string is an alias for the named type */
                *entry = json!({ "type": "alias", "for": target });
            } else if let Some(obj) = entry.as_object_mut() {
                expand_attrs(obj);
            }
        }
    }

    if let Some(interfaces) = root.get_mut("interfaces").and_then(Value::as_object_mut) {
        for (interface_name, interface) in interfaces.iter_mut() {
            let Some(interface) = interface.as_object_mut() else {
                continue;
            };
            expand_attrs(interface);

            let function_names: Vec<String> = interface
                .keys()
                .filter(|key| !is_attr(key))
                .cloned()
                .collect();

            for function_name in function_names {
                let mut todo = false;
                if let Some(function) = interface
                    .get_mut(&function_name)
                    .and_then(Value::as_object_mut)
                {
                    /* Expand first, so `@attrs: ["TODO"]` also drops */
                    expand_attrs(function);
                    if function.contains_key(TODO_ATTR) {
                        todo = true;
                    } else {
                        let path = format!("/interfaces/{interface_name}/{function_name}");
                        normalize_function(function, &path)?;
                    }
                }
                if todo {
                    interface.shift_remove(&function_name);
                }
            }
        }
    }

    Ok(())
}

fn normalize_function(function: &mut Map<String, Value>, path: &str) -> GenResult<()> {
    if !function.contains_key("args") {
        function.insert("args".to_string(), Value::Array(Vec::new()));
    }
    if let Some(Value::Array(args)) = function.get_mut("args") {
        for (index, arg) in args.iter_mut().enumerate() {
            let Some(arg) = arg.as_object_mut() else {
                continue;
            };
            expand_attrs(arg);
            if !arg.contains_key("name") {
                coerce_shorthand_argument(arg).ok_or_else(|| Error::AmbiguousArgument {
                    path: format!("{path}/args/{index}"),
                })?;
            }
            if !arg.contains_key("@dir") {
                arg.insert("@dir".to_string(), Value::String("in".to_string()));
            }
        }
    }

    match function.get("returns") {
        None => {
            function.insert("returns".to_string(), Value::Null);
        }
        Some(Value::String(type_name)) => {
            let spec = json!({ "type": type_name });
            function.insert("returns".to_string(), spec);
        }
        Some(_) => {
            if let Some(returns) = function.get_mut("returns").and_then(Value::as_object_mut) {
                expand_attrs(returns);
            }
        }
    }

    Ok(())
}

/* Rewrite the `Type: name` single-key shorthand as `{name, type}`, keeping
 * name and type ahead of any attribute keys. Returns None unless there is
 * exactly one non-attribute key with a string value. */
fn coerce_shorthand_argument(arg: &mut Map<String, Value>) -> Option<()> {
    let mut candidates = arg.keys().filter(|key| !is_attr(key));
    let type_name = candidates.next()?.clone();
    if candidates.next().is_some() {
        return None;
    }

    let Some(Value::String(arg_name)) = arg.shift_remove(&type_name) else {
        return None;
    };

    let mut rebuilt = Map::new();
    rebuilt.insert("name".to_string(), Value::String(arg_name));
    rebuilt.insert("type".to_string(), Value::String(type_name));
    for (key, value) in std::mem::take(arg) {
        rebuilt.insert(key, value);
    }
    *arg = rebuilt;
    Some(())
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod normalize_tests;
