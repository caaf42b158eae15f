//! Per-argument lowering: the direction policy table.
//!
//! Direction alone decides the calling convention and which side of the
//! wire serializes the argument. Each direction maps to one fixed-shape
//! record; no other part of the pipeline branches on direction.

use idl_types::{Direction, PrimitiveKind};

/// How a parameter travels through a generated signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassBy {
    Value,
    Address,
}

/// How the server handler declares local storage for an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStorage {
    /// Filled by deserializing the request payload.
    FromWire,
    /// Zero-initialized; the request carries no bytes for it.
    ZeroInit,
}

/// Storage location a codec call operates on, relative to the argument's
/// identifier on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    /// The identifier itself.
    Name,
    /// The value behind the identifier (identifier is an address).
    Deref,
    /// The address of the identifier.
    Addr,
}

/// One codec call: the type's primitive applied to a storage location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecCall {
    pub primitive: PrimitiveKind,
    pub place: Place,
}

impl CodecCall {
    pub fn new(primitive: PrimitiveKind, place: Place) -> CodecCall {
        CodecCall { primitive, place }
    }
}

/// Fixed-shape lowering result for a single argument.
///
/// `client_*` fields drive the shim, `server_*` fields the handler; the
/// serialize/deserialize pairs across the two sides mirror each other,
/// which is what keeps both ends on one wire layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredArgument {
    pub name: String,
    pub primitive: PrimitiveKind,
    pub direction: Direction,
    pub pass_by: PassBy,
    pub server_storage: ServerStorage,
    pub client_serialize: Option<CodecCall>,
    pub client_deserialize: Option<CodecCall>,
    pub server_deserialize: Option<CodecCall>,
    pub server_serialize: Option<CodecCall>,
}

pub fn lower_argument(
    name: &str,
    primitive: PrimitiveKind,
    direction: Direction,
) -> LoweredArgument {
    match direction {
        Direction::In => LoweredArgument {
            name: name.to_string(),
            primitive,
            direction,
            pass_by: PassBy::Value,
            server_storage: ServerStorage::FromWire,
            client_serialize: Some(CodecCall::new(primitive, Place::Name)),
            client_deserialize: None,
            server_deserialize: Some(CodecCall::new(primitive, Place::Addr)),
            server_serialize: None,
        },
        Direction::Out => LoweredArgument {
            name: name.to_string(),
            primitive,
            direction,
            pass_by: PassBy::Address,
            server_storage: ServerStorage::ZeroInit,
            client_serialize: None,
            /* The client parameter is already an address */
            client_deserialize: Some(CodecCall::new(primitive, Place::Name)),
            server_deserialize: None,
            server_serialize: Some(CodecCall::new(primitive, Place::Name)),
        },
        Direction::InOut => LoweredArgument {
            name: name.to_string(),
            primitive,
            direction,
            pass_by: PassBy::Address,
            server_storage: ServerStorage::FromWire,
            client_serialize: Some(CodecCall::new(primitive, Place::Deref)),
            client_deserialize: Some(CodecCall::new(primitive, Place::Name)),
            server_deserialize: Some(CodecCall::new(primitive, Place::Addr)),
            server_serialize: Some(CodecCall::new(primitive, Place::Name)),
        },
    }
}
