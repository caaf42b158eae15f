//! Server handler emission: one `static inline` function per IDL function
//! that unmarshals a request frame, invokes the user implementation, and,
//! unless oneway, marshals the response.

use super::helpers::{
    c_return_type, codec_line, escape_c_keyword, param_decl, primitive_to_c_type,
};
use super::{RET_VAL, STATUS_ERROR_ARGS_R, STATUS_ERROR_RETS_W, STATUS_OK};
use crate::lowering::argument::{CodecCall, Place};
use crate::lowering::{LoweredFunction, PassBy, ServerStorage};
use std::fmt::Write;

pub fn emit_server_handler(function: &LoweredFunction) -> String {
    let mut out = String::new();

    out.push_str("static inline\n");
    let _ = writeln!(
        out,
        "void {}(MessageBuffer* _rpc_buff) {{",
        function.handler_symbol()
    );

    if !function.oneway {
        out.push_str("  uint16_t _rpc_seq_num;\n");
        out.push_str("  _rpc_buff->read_uint16(&_rpc_seq_num);\n");
    }

    /* Locals in declaration order: wire-filled ones are read immediately,
     * out-only ones start zeroed. */
    if !function.args.is_empty() {
        out.push('\n');
        if function
            .args
            .iter()
            .any(|arg| arg.server_deserialize.is_some())
        {
            out.push_str("  /* Deserialize inputs */\n");
        }
        for arg in &function.args {
            let name = escape_c_keyword(&arg.name);
            let _ = writeln!(out, "  {} {};", primitive_to_c_type(arg.primitive), name);
            match arg.server_storage {
                ServerStorage::FromWire => {
                    if let Some(call) = &arg.server_deserialize {
                        let _ = writeln!(
                            out,
                            "  {}",
                            codec_line("_rpc_buff", "->", "read", call, &arg.name)
                        );
                    }
                }
                ServerStorage::ZeroInit => {
                    let _ = writeln!(out, "  memset(&{name}, 0, sizeof({name}));");
                }
            }
        }
    }

    out.push('\n');
    out.push_str("  if (_rpc_buff->underflow() || _rpc_buff->remaining() > 0) {\n");
    if !function.oneway {
        out.push_str("    _rpc_buff->reset();\n");
        let _ = writeln!(out, "    _rpc_buff->write_uint16({STATUS_ERROR_ARGS_R});");
        out.push_str("    _rpc_buff->write_uint16(_rpc_seq_num);\n");
        out.push_str("    rpc_send_msg(_rpc_buff);\n");
    }
    out.push_str("    return;\n");
    out.push_str("  }\n");

    let has_ret = function.returns.is_some();
    if function.no_impl {
        if has_ret {
            out.push('\n');
            let _ = writeln!(out, "  {} {};", c_return_type(function.returns), RET_VAL);
            let _ = writeln!(out, "  memset(&{RET_VAL}, 0, sizeof({RET_VAL}));");
        }
    } else {
        let call_args: Vec<String> = function
            .args
            .iter()
            .map(|arg| {
                let name = escape_c_keyword(&arg.name);
                match arg.pass_by {
                    PassBy::Value => name,
                    PassBy::Address => format!("&{name}"),
                }
            })
            .collect();
        out.push('\n');
        out.push_str("  /* Call the actual function */\n");
        if has_ret {
            let _ = writeln!(
                out,
                "  {} {} = {}({});",
                c_return_type(function.returns),
                RET_VAL,
                function.impl_symbol(),
                call_args.join(", ")
            );
        } else {
            let _ = writeln!(out, "  {}({});", function.impl_symbol(), call_args.join(", "));
        }
    }

    if function.oneway {
        out.push('\n');
        out.push_str("  /* Oneway => no response */\n");
        out.push_str("}\n");
        return out;
    }

    let mut writes: Vec<String> = function
        .args
        .iter()
        .filter_map(|arg| {
            arg.server_serialize
                .as_ref()
                .map(|call| codec_line("_rpc_buff", "->", "write", call, &arg.name))
        })
        .collect();
    if let Some(primitive) = function.returns {
        let call = CodecCall::new(primitive, Place::Name);
        writes.push(codec_line("_rpc_buff", "->", "write", &call, RET_VAL));
    }

    out.push('\n');
    out.push_str("  /* Serialize outputs */\n");
    out.push_str("  _rpc_buff->reset();\n");
    let _ = writeln!(out, "  _rpc_buff->write_uint16({STATUS_OK});");
    out.push_str("  _rpc_buff->write_uint16(_rpc_seq_num);\n");
    for line in &writes {
        let _ = writeln!(out, "  {line}");
    }

    out.push('\n');
    out.push_str("  if (_rpc_buff->overflow()) {\n");
    out.push_str("    _rpc_buff->reset();\n");
    let _ = writeln!(out, "    _rpc_buff->write_uint16({STATUS_ERROR_RETS_W});");
    out.push_str("    _rpc_buff->write_uint16(_rpc_seq_num);\n");
    out.push_str("  }\n");

    out.push('\n');
    out.push_str("  rpc_send_msg(_rpc_buff);\n");
    out.push_str("}\n");
    out
}

/// Prototype of the user implementation a handler invokes, emitted at the
/// top of the handler file.
pub fn emit_impl_declaration(function: &LoweredFunction) -> Option<String> {
    if function.no_impl {
        return None;
    }
    let params: Vec<String> = function
        .args
        .iter()
        .map(|arg| param_decl(arg.primitive, arg.pass_by, &arg.name, false))
        .collect();
    let params = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };
    Some(format!(
        "{} {}({});",
        c_return_type(function.returns),
        function.impl_symbol(),
        params
    ))
}
