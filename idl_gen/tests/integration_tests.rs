use idl_gen::{compile_value, schema, Error};
use serde_json::{json, Value};

/* Assert that every needle occurs, in the given order */
fn assert_ordered(haystack: &str, needles: &[&str]) {
    let mut position = 0;
    for needle in needles {
        match haystack[position..].find(needle) {
            Some(offset) => position += offset + needle.len(),
            None => panic!("`{needle}` not found (in order) in:\n{haystack}"),
        }
    }
}

fn sample_document() -> Value {
    json!({
        "types": { "Code": "Int32" },
        "interfaces": {
            "Ping": {
                "echo": {
                    "args": [ { "String": "msg" } ],
                    "returns": "String"
                }
            },
            "Sensor": {
                "notify": {
                    "@attrs": ["oneway"],
                    "args": [ { "Code": "code" } ]
                }
            },
            "Actuator": {
                "move": {
                    "args": [
                        { "Int32": "x", "@dir": "inout" },
                        { "Int32": "y", "@dir": "inout" }
                    ]
                }
            }
        }
    })
}

fn shim_content<'a>(compiled: &'a idl_gen::CompiledDocument, interface: &str) -> &'a str {
    &compiled
        .output
        .interfaces
        .iter()
        .find(|entry| entry.name == interface)
        .expect("interface not generated")
        .shim
        .content
}

fn handler_content<'a>(compiled: &'a idl_gen::CompiledDocument, interface: &str) -> &'a str {
    &compiled
        .output
        .interfaces
        .iter()
        .find(|entry| entry.name == interface)
        .expect("interface not generated")
        .handler
        .content
}

#[test]
fn ping_echo_shim_follows_request_response_protocol() {
    let compiled = compile_value(sample_document()).unwrap();
    let shim = shim_content(&compiled, "Ping");

    assert_ordered(
        shim,
        &[
            "char* rpc_Ping_echo(const char* msg) {",
            "char* _rpc_ret_val;",
            "memset(&_rpc_ret_val, 0, sizeof(_rpc_ret_val));",
            "_rpc_buff.write_uint16(RPC_OP_INVOKE);",
            "_rpc_buff.write_uint16(RPC_UID_PING_ECHO);",
            "uint16_t _rpc_seq_num = ++_rpc_seq;",
            "_rpc_buff.write_uint16(_rpc_seq_num);",
            "_rpc_buff.write_cstring(msg);",
            "if (_rpc_buff.overflow()) {",
            "rpc_send_msg(&_rpc_buff);",
            "RpcStatus _rpc_status = rpc_wait_result(_rpc_seq_num, &_rsp_buff, RPC_TIMEOUT_DEFAULT);",
            "if (_rpc_status == RPC_STATUS_OK) {",
            "_rsp_buff.read_cstring(&_rpc_ret_val);",
            "if (_rsp_buff.underflow() || _rsp_buff.remaining() > 0) {",
            "_rpc_status = RPC_STATUS_ERROR_RETS_R;",
            "return _rpc_ret_val;",
        ],
    );
}

#[test]
fn ping_echo_handler_mirrors_the_shim() {
    let compiled = compile_value(sample_document()).unwrap();
    let handler = handler_content(&compiled, "Ping");

    assert_ordered(
        handler,
        &[
            "char* Ping_echo(char* msg);",
            "void rpc_Ping_echo_handler(MessageBuffer* _rpc_buff) {",
            "uint16_t _rpc_seq_num;",
            "_rpc_buff->read_uint16(&_rpc_seq_num);",
            "char* msg;",
            "_rpc_buff->read_cstring(&msg);",
            "if (_rpc_buff->underflow() || _rpc_buff->remaining() > 0) {",
            "_rpc_buff->write_uint16(RPC_STATUS_ERROR_ARGS_R);",
            "char* _rpc_ret_val = Ping_echo(msg);",
            "_rpc_buff->write_uint16(RPC_STATUS_OK);",
            "_rpc_buff->write_uint16(_rpc_seq_num);",
            "_rpc_buff->write_cstring(_rpc_ret_val);",
            "if (_rpc_buff->overflow()) {",
            "_rpc_buff->write_uint16(RPC_STATUS_ERROR_RETS_W);",
            "rpc_send_msg(_rpc_buff);",
        ],
    );
}

#[test]
fn oneway_functions_have_no_response_path() {
    let compiled = compile_value(sample_document()).unwrap();

    let shim = shim_content(&compiled, "Sensor");
    assert!(shim.contains("RPC_OP_ONEWAY"));
    assert!(shim.contains("_rpc_buff.write_int32(code);"));
    assert!(!shim.contains("rpc_wait_result"));
    assert!(!shim.contains("_rsp_buff"));
    assert!(!shim.contains("_rpc_seq_num"));

    let handler = handler_content(&compiled, "Sensor");
    assert!(handler.contains("Sensor_notify(code);"));
    assert!(!handler.contains("rpc_send_msg"));
    assert!(!handler.contains("RPC_STATUS"));
    assert!(!handler.contains("_rpc_seq_num"));
}

#[test]
fn inout_arguments_keep_declaration_order_on_both_sides() {
    let compiled = compile_value(sample_document()).unwrap();

    let shim = shim_content(&compiled, "Actuator");
    assert_ordered(
        shim,
        &[
            "void rpc_Actuator_move(int32_t* x, int32_t* y) {",
            "_rpc_buff.write_int32(*x);",
            "_rpc_buff.write_int32(*y);",
            "rpc_send_msg(&_rpc_buff);",
            "_rsp_buff.read_int32(x);",
            "_rsp_buff.read_int32(y);",
        ],
    );

    let handler = handler_content(&compiled, "Actuator");
    assert_ordered(
        handler,
        &[
            "_rpc_buff->read_int32(&x);",
            "_rpc_buff->read_int32(&y);",
            "Actuator_move(&x, &y);",
            "_rpc_buff->write_int32(x);",
            "_rpc_buff->write_int32(y);",
        ],
    );
}

#[test]
fn shim_and_handler_agree_on_wire_layout() {
    let compiled = compile_value(sample_document()).unwrap();

    for interface in &compiled.lowered {
        for function in &interface.functions {
            assert_eq!(
                function.request_payload(),
                function.server_request_reads(),
                "request layout mismatch for {}",
                function.qualified_name()
            );
            assert_eq!(
                function.response_payload(),
                function.client_response_reads(),
                "response layout mismatch for {}",
                function.qualified_name()
            );
        }
    }
}

#[test]
fn type_alias_resolves_to_its_primitive() {
    let compiled = compile_value(sample_document()).unwrap();
    let shim = shim_content(&compiled, "Sensor");
    assert!(shim.contains("const int32_t code"));
}

#[test]
fn ret_status_with_return_value_is_rejected() {
    let doc = json!({
        "interfaces": {
            "Ping": {
                "echo": { "returns": "String", "@attrs": ["c:ret_status"] }
            }
        }
    });

    match compile_value(doc) {
        Err(Error::RetStatusWithReturn {
            interface,
            function,
        }) => {
            assert_eq!(interface, "Ping");
            assert_eq!(function, "echo");
        }
        other => panic!("expected RetStatusWithReturn, got {other:?}"),
    }
}

#[test]
fn ret_status_shim_returns_the_status_code() {
    let doc = json!({
        "interfaces": {
            "Led": {
                "set": {
                    "args": [ { "Bool": "on" } ],
                    "@attrs": ["ret_status"]
                }
            }
        }
    });

    let compiled = compile_value(doc).unwrap();
    let shim = shim_content(&compiled, "Led");
    assert_ordered(
        shim,
        &[
            "RpcStatus rpc_Led_set(const bool on) {",
            "return RPC_STATUS_ERROR_ARGS_W;",
            "return _rpc_status;",
        ],
    );
}

#[test]
fn unknown_type_is_reported_by_name() {
    let doc = json!({
        "interfaces": {
            "Ping": { "echo": { "args": [ { "Blob": "data" } ] } }
        }
    });

    match compile_value(doc) {
        Err(Error::UnknownType { name }) => assert_eq!(name, "Blob"),
        other => panic!("expected UnknownType, got {other:?}"),
    }
}

#[test]
fn alias_cycle_is_reported() {
    let doc = json!({
        "types": { "A": "B", "B": "A" },
        "interfaces": {
            "Ping": { "echo": { "args": [ { "A": "value" } ] } }
        }
    });

    match compile_value(doc) {
        Err(Error::AliasCycle { .. }) => {}
        other => panic!("expected AliasCycle, got {other:?}"),
    }
}

#[test]
fn malformed_function_entry_fails_relaxed_schema_with_path() {
    let doc = json!({
        "interfaces": { "Ping": { "echo": "String" } }
    });

    match compile_value(doc) {
        Err(Error::Schema { path, .. }) => {
            assert_eq!(path, "/interfaces/Ping/echo");
        }
        other => panic!("expected Schema error, got {other:?}"),
    }
}

#[test]
fn strict_gate_failure_reports_a_compiler_bug() {
    /* Feed the strict validator a document that never went through the
     * normalizer */
    match schema::validate_strict(&json!({})) {
        Err(Error::InternalSchema { message, .. }) => {
            assert!(!message.is_empty());
        }
        other => panic!("expected InternalSchema, got {other:?}"),
    }
}

#[test]
fn timeout_attribute_overrides_the_default_wait() {
    let doc = json!({
        "interfaces": {
            "Motor": {
                "home": { "@timeout": 500 },
                "stop": {}
            }
        }
    });

    let compiled = compile_value(doc).unwrap();
    let shim = shim_content(&compiled, "Motor");
    assert!(shim.contains("rpc_wait_result(_rpc_seq_num, &_rsp_buff, 500);"));
    assert!(shim.contains("rpc_wait_result(_rpc_seq_num, &_rsp_buff, RPC_TIMEOUT_DEFAULT);"));
}

#[test]
fn no_impl_suppresses_the_implementation_call() {
    let doc = json!({
        "interfaces": {
            "Echo": {
                "probe": {
                    "args": [ { "Int32": "value", "@dir": "inout" } ],
                    "@attrs": ["no_impl"]
                }
            }
        }
    });

    let compiled = compile_value(doc).unwrap();
    let handler = handler_content(&compiled, "Echo");
    assert!(!handler.contains("Echo_probe("));
    /* Marshalling survives without the call */
    assert!(handler.contains("_rpc_buff->read_int32(&value);"));
    assert!(handler.contains("_rpc_buff->write_int32(value);"));
}

#[test]
fn deprecated_interface_marks_every_shim() {
    let doc = json!({
        "interfaces": {
            "Legacy": {
                "@attrs": ["deprecated"],
                "poke": {}
            }
        }
    });

    let compiled = compile_value(doc).unwrap();
    let shim = shim_content(&compiled, "Legacy");
    assert_ordered(
        shim,
        &[
            "__attribute__((deprecated))",
            "static inline",
            "void rpc_Legacy_poke(void) {",
        ],
    );
}

#[test]
fn out_arguments_are_zeroed_on_the_server() {
    let doc = json!({
        "interfaces": {
            "Sensor": {
                "read": {
                    "args": [ { "Float64": "value", "@dir": "out" } ],
                    "returns": "Bool"
                }
            }
        }
    });

    let compiled = compile_value(doc).unwrap();

    let handler = handler_content(&compiled, "Sensor");
    assert_ordered(
        handler,
        &[
            "double value;",
            "memset(&value, 0, sizeof(value));",
            "bool _rpc_ret_val = Sensor_read(&value);",
            "_rpc_buff->write_double(value);",
            "_rpc_buff->write_bool(_rpc_ret_val);",
        ],
    );

    /* The client never serializes an out argument */
    let shim = shim_content(&compiled, "Sensor");
    assert!(!shim.contains("write_double"));
    assert!(shim.contains("_rsp_buff.read_double(value);"));
}

#[test]
fn uid_header_lists_every_function_once() {
    let compiled = compile_value(sample_document()).unwrap();
    let header = &compiled.output.uid_header.content;

    /* Three function defines; the include guard's own #define carries no
     * value and is excluded */
    let defines = header
        .lines()
        .filter(|line| line.starts_with("#define RPC_UID_") && line.contains(" 0x"))
        .count();
    assert_eq!(defines, 3);
    assert!(header.contains("#define RPC_UID_PING_ECHO 0x"));
    assert!(header.contains("#define RPC_UID_SENSOR_NOTIFY 0x"));
    assert!(header.contains("#define RPC_UID_ACTUATOR_MOVE 0x"));
}

#[test]
fn generated_files_are_wrapped_and_named_per_interface() {
    let compiled = compile_value(sample_document()).unwrap();
    let ping = compiled
        .output
        .interfaces
        .iter()
        .find(|entry| entry.name == "Ping")
        .unwrap();

    assert_eq!(ping.shim.filename, "rpc_shim_Ping.h");
    assert_eq!(ping.handler.filename, "rpc_handler_Ping.h");
    assert!(ping.shim.content.contains("#ifndef RPC_SHIM_PING_H"));
    assert!(ping.handler.content.contains("#ifndef RPC_HANDLER_PING_H"));
    assert!(ping
        .shim
        .content
        .starts_with("/* This file is auto-generated. DO NOT EDIT. */"));
}

#[test]
fn compilation_is_deterministic() {
    let first = compile_value(sample_document()).unwrap();
    let second = compile_value(sample_document()).unwrap();
    assert_eq!(first.output, second.output);
}

#[test]
fn recompiling_the_canonical_document_changes_nothing() {
    let first = compile_value(sample_document()).unwrap();
    let second = compile_value(first.normalized.clone()).unwrap();

    assert_eq!(first.normalized, second.normalized);
    assert_eq!(first.output, second.output);
}

#[test]
fn todo_functions_never_reach_generation() {
    let doc = json!({
        "interfaces": {
            "Store": {
                "get": { "returns": "Int32" },
                "put": { "@TODO": true }
            }
        }
    });

    let compiled = compile_value(doc).unwrap();
    let shim = shim_content(&compiled, "Store");
    assert!(shim.contains("rpc_Store_get"));
    assert!(!shim.contains("rpc_Store_put"));

    let defines = compiled
        .output
        .uid_header
        .content
        .lines()
        .filter(|line| line.starts_with("#define RPC_UID_") && line.contains(" 0x"))
        .count();
    assert_eq!(defines, 1);
}
