//! Lowering: turns the frozen document tree into per-function protocol
//! scripts. Each function lowers independently of every other; the only
//! shared inputs are the read-only alias table and the UID table.

pub mod argument;
pub mod function;

pub use argument::{lower_argument, CodecCall, LoweredArgument, PassBy, ServerStorage};
pub use function::{lower_function, LoweredFunction};

use crate::error::{Error, GenResult};
use crate::uid::UidTable;
use idl_types::{Document, PrimitiveKind};

#[derive(Debug, Clone, PartialEq)]
pub struct LoweredInterface {
    pub name: String,
    pub functions: Vec<LoweredFunction>,
}

/// Resolve a type name to a wire primitive, following document-level
/// aliases. Unknown names fail with the offending name; alias chains that
/// revisit a name fail as cycles.
pub fn resolve_type(name: &str, document: &Document) -> GenResult<PrimitiveKind> {
    let mut current = name;
    let mut visited: Vec<&str> = Vec::new();

    loop {
        if let Some(primitive) = PrimitiveKind::from_name(current) {
            return Ok(primitive);
        }
        if visited.contains(&current) {
            return Err(Error::AliasCycle {
                name: current.to_string(),
            });
        }
        visited.push(current);

        match document.types.get(current) {
            Some(alias) => current = &alias.target,
            None => {
                return Err(Error::UnknownType {
                    name: current.to_string(),
                })
            }
        }
    }
}

pub fn lower_document(document: &Document, uids: &UidTable) -> GenResult<Vec<LoweredInterface>> {
    document
        .interfaces
        .iter()
        .map(|(interface_name, interface)| {
            let functions = interface
                .functions
                .iter()
                .map(|(function_name, function)| {
                    lower_function(
                        interface_name,
                        interface,
                        function_name,
                        function,
                        document,
                        uids,
                    )
                })
                .collect::<GenResult<Vec<_>>>()?;
            Ok(LoweredInterface {
                name: interface_name.clone(),
                functions,
            })
        })
        .collect()
}
