use super::*;

fn normalized(mut doc: Value) -> Value {
    normalize(&mut doc).expect("normalization should succeed");
    doc
}

#[test]
fn fills_document_level_defaults() {
    let doc = normalized(json!({}));

    assert_eq!(doc["@output_dir"], json!(DEFAULT_OUTPUT_DIR));
    assert_eq!(doc["types"], json!({}));
    assert_eq!(doc["interfaces"], json!({}));
}

#[test]
fn keeps_declared_output_dir() {
    let doc = normalized(json!({ "@output_dir": "gen/rpc" }));
    assert_eq!(doc["@output_dir"], json!("gen/rpc"));
}

#[test]
fn coerces_bare_type_alias() {
    let doc = normalized(json!({ "types": { "Temperature": "Float32" } }));

    assert_eq!(
        doc["types"]["Temperature"],
        json!({ "type": "alias", "for": "Float32" })
    );
}

#[test]
fn expands_attr_lists_on_every_entity() {
    let doc = normalized(json!({
        "interfaces": {
            "Sensor": {
                "@attrs": ["deprecated"],
                "notify": {
                    "@attrs": ["oneway"],
                    "args": [ { "Int32": "code", "@attrs": ["big_endian"] } ],
                    "returns": { "type": "Int32", "@attrs": ["big_endian"] }
                }
            }
        }
    }));

    let interface = &doc["interfaces"]["Sensor"];
    assert_eq!(interface["@deprecated"], json!(true));
    assert!(interface.get("@attrs").is_none());

    let function = &interface["notify"];
    assert_eq!(function["@oneway"], json!(true));
    assert!(function.get("@attrs").is_none());

    let arg = &function["args"][0];
    assert_eq!(arg["@big_endian"], json!(true));
    assert!(arg.get("@attrs").is_none());

    let returns = &function["returns"];
    assert_eq!(returns["@big_endian"], json!(true));
    assert!(returns.get("@attrs").is_none());
}

#[test]
fn fills_function_defaults() {
    let doc = normalized(json!({
        "interfaces": { "Clock": { "tick": {} } }
    }));

    let function = &doc["interfaces"]["Clock"]["tick"];
    assert_eq!(function["args"], json!([]));
    assert_eq!(function["returns"], Value::Null);
}

#[test]
fn coerces_bare_return_type() {
    let doc = normalized(json!({
        "interfaces": { "Clock": { "now": { "returns": "UInt64" } } }
    }));

    assert_eq!(
        doc["interfaces"]["Clock"]["now"]["returns"],
        json!({ "type": "UInt64" })
    );
}

#[test]
fn coerces_argument_shorthand_with_type_key_first() {
    let doc = normalized(json!({
        "interfaces": {
            "Ping": { "echo": { "args": [ { "String": "msg" } ] } }
        }
    }));

    let arg = &doc["interfaces"]["Ping"]["echo"]["args"][0];
    assert_eq!(arg["name"], json!("msg"));
    assert_eq!(arg["type"], json!("String"));
    assert_eq!(arg["@dir"], json!("in"));

    /* name and type must lead the rebuilt mapping */
    let keys: Vec<&String> = arg.as_object().unwrap().keys().collect();
    assert_eq!(keys[0], "name");
    assert_eq!(keys[1], "type");
}

#[test]
fn shorthand_keeps_attribute_keys() {
    let doc = normalized(json!({
        "interfaces": {
            "Motor": { "seek": { "args": [ { "Int32": "pos", "@dir": "inout" } ] } }
        }
    }));

    let arg = &doc["interfaces"]["Motor"]["seek"]["args"][0];
    assert_eq!(
        arg,
        &json!({ "name": "pos", "type": "Int32", "@dir": "inout" })
    );
}

#[test]
fn explicit_name_is_left_alone() {
    let doc = normalized(json!({
        "interfaces": {
            "Ping": { "echo": { "args": [ { "name": "msg", "type": "String" } ] } }
        }
    }));

    let arg = &doc["interfaces"]["Ping"]["echo"]["args"][0];
    assert_eq!(
        arg,
        &json!({ "name": "msg", "type": "String", "@dir": "in" })
    );
}

#[test]
fn ambiguous_shorthand_is_reported_with_path() {
    let mut doc = json!({
        "interfaces": {
            "Ping": { "echo": { "args": [ { "String": "msg", "Int32": "code" } ] } }
        }
    });

    match normalize(&mut doc) {
        Err(Error::AmbiguousArgument { path }) => {
            assert_eq!(path, "/interfaces/Ping/echo/args/0");
        }
        other => panic!("expected AmbiguousArgument, got {other:?}"),
    }
}

#[test]
fn drops_todo_functions() {
    let doc = normalized(json!({
        "interfaces": {
            "Store": {
                "get": { "returns": "Int32" },
                "put": { "@TODO": true },
                "del": { "@attrs": ["TODO"] }
            }
        }
    }));

    let interface = doc["interfaces"]["Store"].as_object().unwrap();
    assert!(interface.contains_key("get"));
    assert!(!interface.contains_key("put"));
    assert!(!interface.contains_key("del"));
}

#[test]
fn preserves_function_and_argument_order() {
    let doc = normalized(json!({
        "interfaces": {
            "Actuator": {
                "move": { "args": [ { "Int32": "x" }, { "Int32": "y" } ] },
                "stop": {},
                "home": {}
            }
        }
    }));

    let names: Vec<&String> = doc["interfaces"]["Actuator"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(names, ["move", "stop", "home"]);

    let args = doc["interfaces"]["Actuator"]["move"]["args"]
        .as_array()
        .unwrap();
    assert_eq!(args[0]["name"], json!("x"));
    assert_eq!(args[1]["name"], json!("y"));
}

#[test]
fn normalization_is_idempotent() {
    let mut doc = json!({
        "types": { "Temp": "Float32" },
        "interfaces": {
            "Sensor": {
                "@attrs": ["deprecated"],
                "read": {
                    "args": [ { "Temp": "value", "@dir": "out" } ],
                    "returns": "Bool",
                    "@attrs": ["no_impl"]
                },
                "notify": { "@attrs": ["oneway"], "args": [ { "Int32": "code" } ] }
            }
        }
    });

    normalize(&mut doc).unwrap();
    let once = doc.clone();
    normalize(&mut doc).unwrap();
    assert_eq!(doc, once);
}
