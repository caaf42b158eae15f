//! C backend: renders lowered interfaces into header file bodies.

pub mod handler;
pub mod helpers;
pub mod shim;

pub use handler::{emit_impl_declaration, emit_server_handler};
pub use shim::emit_client_shim;

use crate::lowering::LoweredInterface;
use std::fmt::Write;

/* Protocol symbols referenced by generated code; defined by the runtime */
pub const OP_ONEWAY: &str = "RPC_OP_ONEWAY";
pub const OP_INVOKE: &str = "RPC_OP_INVOKE";
pub const STATUS_OK: &str = "RPC_STATUS_OK";
pub const STATUS_ERROR_ARGS_R: &str = "RPC_STATUS_ERROR_ARGS_R";
pub const STATUS_ERROR_ARGS_W: &str = "RPC_STATUS_ERROR_ARGS_W";
pub const STATUS_ERROR_RETS_R: &str = "RPC_STATUS_ERROR_RETS_R";
pub const STATUS_ERROR_RETS_W: &str = "RPC_STATUS_ERROR_RETS_W";
pub const TIMEOUT_DEFAULT: &str = "RPC_TIMEOUT_DEFAULT";

/* Name of the return-value holder in generated bodies */
pub const RET_VAL: &str = "_rpc_ret_val";

/// Body of `rpc_shim_<interface>.h`: the externs the shims rely on,
/// then every client shim in declaration order.
pub fn emit_shim_file(interface: &LoweredInterface) -> String {
    let mut sections = Vec::with_capacity(interface.functions.len() + 1);
    sections.push(
        "extern uint8_t rpc_output_buff[];\nextern uint16_t _rpc_seq;".to_string(),
    );
    for function in &interface.functions {
        sections.push(emit_client_shim(function).trim_end().to_string());
    }
    sections.join("\n\n")
}

/// Body of `rpc_handler_<interface>.h`: prototypes of the user
/// implementations, then every server handler in declaration order.
pub fn emit_handler_file(interface: &LoweredInterface) -> String {
    let mut sections = Vec::with_capacity(interface.functions.len() + 1);

    let impl_decls: Vec<String> = interface
        .functions
        .iter()
        .filter_map(emit_impl_declaration)
        .collect();
    if !impl_decls.is_empty() {
        let mut block = String::from("/* User implementations */\n");
        block.push_str(&impl_decls.join("\n"));
        sections.push(block);
    }

    for function in &interface.functions {
        sections.push(emit_server_handler(function).trim_end().to_string());
    }
    sections.join("\n\n")
}

/// Body of `rpc_uid.h`: one define per function, document order.
pub fn emit_uid_header(interfaces: &[LoweredInterface]) -> String {
    let mut out = String::new();
    for interface in interfaces {
        for function in &interface.functions {
            let _ = writeln!(
                out,
                "#define {} {:#06x}",
                function.uid_symbol(),
                function.uid
            );
        }
    }
    out.trim_end().to_string()
}
