//! Per-function lowering: composes the argument policy with function
//! attributes into the two protocol scripts (client shim, server handler)
//! that share one wire contract.

use crate::error::{Error, GenResult};
use crate::lowering::argument::{lower_argument, LoweredArgument};
use crate::lowering::resolve_type;
use crate::uid::UidTable;
use idl_types::{Document, Function, Interface, PrimitiveKind};

/// A fully lowered function: everything the emitter needs, plus the wire
/// scripts both sides must agree on.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredFunction {
    pub interface: String,
    pub name: String,
    pub uid: u16,
    pub oneway: bool,
    pub no_impl: bool,
    pub deprecated: bool,
    pub ret_status: bool,
    pub timeout: Option<u64>,
    pub returns: Option<PrimitiveKind>,
    pub args: Vec<LoweredArgument>,
}

pub fn lower_function(
    interface_name: &str,
    interface: &Interface,
    function_name: &str,
    function: &Function,
    document: &Document,
    uids: &UidTable,
) -> GenResult<LoweredFunction> {
    let returns = match &function.returns {
        Some(spec) => Some(resolve_type(&spec.ty, document)?),
        None => None,
    };

    if function.ret_status && returns.is_some() {
        return Err(Error::RetStatusWithReturn {
            interface: interface_name.to_string(),
            function: function_name.to_string(),
        });
    }

    let args = function
        .args
        .iter()
        .map(|arg| {
            let primitive = resolve_type(&arg.ty, document)?;
            Ok(lower_argument(&arg.name, primitive, arg.direction))
        })
        .collect::<GenResult<Vec<_>>>()?;

    let uid = uids.get(interface_name, function_name).ok_or_else(|| {
        Error::internal(format!(
            "no UID assigned for `{interface_name}.{function_name}`"
        ))
    })?;

    Ok(LoweredFunction {
        interface: interface_name.to_string(),
        name: function_name.to_string(),
        uid,
        oneway: function.oneway,
        no_impl: function.no_impl,
        deprecated: function.deprecated || interface.deprecated,
        ret_status: function.ret_status,
        timeout: function.timeout,
        returns,
        args,
    })
}

impl LoweredFunction {
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.interface, self.name)
    }

    /// Generated client entry point.
    pub fn shim_symbol(&self) -> String {
        format!("rpc_{}_{}", self.interface, self.name)
    }

    /// Generated server entry point.
    pub fn handler_symbol(&self) -> String {
        format!("rpc_{}_{}_handler", self.interface, self.name)
    }

    /// User-supplied implementation the handler invokes.
    pub fn impl_symbol(&self) -> String {
        format!("{}_{}", self.interface, self.name)
    }

    pub fn uid_symbol(&self) -> String {
        format!(
            "RPC_UID_{}_{}",
            self.interface.to_uppercase(),
            self.name.to_uppercase()
        )
    }

    /// Primitives the client writes into the request, in wire order.
    pub fn request_payload(&self) -> Vec<PrimitiveKind> {
        self.args
            .iter()
            .filter_map(|arg| arg.client_serialize.as_ref())
            .map(|call| call.primitive)
            .collect()
    }

    /// Primitives the server reads from the request, in wire order.
    pub fn server_request_reads(&self) -> Vec<PrimitiveKind> {
        self.args
            .iter()
            .filter_map(|arg| arg.server_deserialize.as_ref())
            .map(|call| call.primitive)
            .collect()
    }

    /// Primitives the server writes into the response payload, in wire
    /// order: out/inout arguments first, then the return value.
    pub fn response_payload(&self) -> Vec<PrimitiveKind> {
        let mut payload: Vec<PrimitiveKind> = self
            .args
            .iter()
            .filter_map(|arg| arg.server_serialize.as_ref())
            .map(|call| call.primitive)
            .collect();
        payload.extend(self.returns);
        payload
    }

    /// Primitives the client reads back from the response, in wire order.
    pub fn client_response_reads(&self) -> Vec<PrimitiveKind> {
        let mut reads: Vec<PrimitiveKind> = self
            .args
            .iter()
            .filter_map(|arg| arg.client_deserialize.as_ref())
            .map(|call| call.primitive)
            .collect();
        reads.extend(self.returns);
        reads
    }
}
