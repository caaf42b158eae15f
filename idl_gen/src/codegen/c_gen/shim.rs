//! Client shim emission: one `static inline` function per IDL function
//! that marshals a call into a request frame and, unless oneway, waits
//! for and unmarshals the response.

use super::helpers::{c_return_type, codec_line, param_decl};
use super::{
    OP_INVOKE, OP_ONEWAY, RET_VAL, STATUS_ERROR_ARGS_W, STATUS_ERROR_RETS_R, STATUS_OK,
    TIMEOUT_DEFAULT,
};
use crate::lowering::argument::{CodecCall, Place};
use crate::lowering::LoweredFunction;
use std::fmt::Write;

pub fn emit_client_shim(function: &LoweredFunction) -> String {
    let mut out = String::new();
    let has_ret = function.returns.is_some();

    if function.deprecated {
        out.push_str("__attribute__((deprecated))\n");
    }
    out.push_str("static inline\n");

    let return_type = if function.ret_status {
        "RpcStatus".to_string()
    } else {
        c_return_type(function.returns).to_string()
    };
    let params: Vec<String> = function
        .args
        .iter()
        .map(|arg| param_decl(arg.primitive, arg.pass_by, &arg.name, true))
        .collect();
    let params = if params.is_empty() {
        "void".to_string()
    } else {
        params.join(", ")
    };
    let _ = writeln!(
        out,
        "{} {}({}) {{",
        return_type,
        function.shim_symbol(),
        params
    );

    if has_ret {
        let _ = writeln!(out, "  {} {};", c_return_type(function.returns), RET_VAL);
        let _ = writeln!(out, "  memset(&{RET_VAL}, 0, sizeof({RET_VAL}));");
        out.push('\n');
    }

    out.push_str("  MessageBuffer _rpc_buff(rpc_output_buff, sizeof(rpc_output_buff));\n");
    if function.oneway {
        let _ = writeln!(out, "  _rpc_buff.write_uint16({OP_ONEWAY});");
        let _ = writeln!(out, "  _rpc_buff.write_uint16({});", function.uid_symbol());
    } else {
        let _ = writeln!(out, "  _rpc_buff.write_uint16({OP_INVOKE});");
        let _ = writeln!(out, "  _rpc_buff.write_uint16({});", function.uid_symbol());
        out.push_str("  uint16_t _rpc_seq_num = ++_rpc_seq;\n");
        out.push_str("  _rpc_buff.write_uint16(_rpc_seq_num);\n");
    }

    let writes: Vec<String> = function
        .args
        .iter()
        .filter_map(|arg| {
            arg.client_serialize
                .as_ref()
                .map(|call| codec_line("_rpc_buff", ".", "write", call, &arg.name))
        })
        .collect();
    if !writes.is_empty() {
        out.push('\n');
        out.push_str("  /* Serialize inputs */\n");
        for line in &writes {
            let _ = writeln!(out, "  {line}");
        }
    }

    out.push('\n');
    out.push_str("  if (_rpc_buff.overflow()) {\n");
    if function.ret_status {
        let _ = writeln!(out, "    return {STATUS_ERROR_ARGS_W};");
    } else if has_ret {
        let _ = writeln!(out, "    return {RET_VAL};");
    } else {
        out.push_str("    return;\n");
    }
    out.push_str("  }\n");

    out.push('\n');
    out.push_str("  /* RPC call */\n");
    out.push_str("  rpc_send_msg(&_rpc_buff);\n");

    if function.oneway {
        out.push('\n');
        out.push_str("  /* Oneway => skip response */\n");
        if function.ret_status {
            let _ = writeln!(out, "  return {STATUS_OK};");
        }
        out.push_str("}\n");
        return out;
    }

    let timeout = match function.timeout {
        Some(ms) => ms.to_string(),
        None => TIMEOUT_DEFAULT.to_string(),
    };
    out.push('\n');
    out.push_str("  MessageBuffer _rsp_buff(NULL, 0);\n");
    let _ = writeln!(
        out,
        "  RpcStatus _rpc_status = rpc_wait_result(_rpc_seq_num, &_rsp_buff, {timeout});"
    );

    let mut reads: Vec<String> = function
        .args
        .iter()
        .filter_map(|arg| {
            arg.client_deserialize
                .as_ref()
                .map(|call| codec_line("_rsp_buff", ".", "read", call, &arg.name))
        })
        .collect();
    if let Some(primitive) = function.returns {
        let call = CodecCall::new(primitive, Place::Addr);
        reads.push(codec_line("_rsp_buff", ".", "read", &call, RET_VAL));
    }

    let _ = writeln!(out, "  if (_rpc_status == {STATUS_OK}) {{");
    if !reads.is_empty() {
        out.push_str("    /* Deserialize outputs */\n");
        for line in &reads {
            let _ = writeln!(out, "    {line}");
        }
    }
    out.push_str("    if (_rsp_buff.underflow() || _rsp_buff.remaining() > 0) {\n");
    let _ = writeln!(out, "      _rpc_status = {STATUS_ERROR_RETS_R};");
    out.push_str("    }\n");
    out.push_str("  }\n");

    if function.ret_status {
        out.push('\n');
        out.push_str("  return _rpc_status;\n");
    } else if has_ret {
        out.push('\n');
        let _ = writeln!(out, "  return {RET_VAL};");
    }
    out.push_str("}\n");
    out
}
