use serde_derive::{Deserialize, Serialize};

/// Closed set of wire primitives an argument or return value may use.
///
/// Every kind maps to exactly one target scalar representation and one
/// codec primitive in the backend; anything outside this set is rejected
/// during lowering with an unknown-type error.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Binary,
    String,
}

impl PrimitiveKind {
    pub const ALL: &'static [PrimitiveKind] = &[
        PrimitiveKind::Bool,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::UInt8,
        PrimitiveKind::UInt16,
        PrimitiveKind::UInt32,
        PrimitiveKind::UInt64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
        PrimitiveKind::Binary,
        PrimitiveKind::String,
    ];

    /* Parse an IDL type name. Returns None for names outside the closed set. */
    pub fn from_name(name: &str) -> Option<PrimitiveKind> {
        let kind = match name {
            "Bool" => PrimitiveKind::Bool,
            "Int8" => PrimitiveKind::Int8,
            "Int16" => PrimitiveKind::Int16,
            "Int32" => PrimitiveKind::Int32,
            "Int64" => PrimitiveKind::Int64,
            "UInt8" => PrimitiveKind::UInt8,
            "UInt16" => PrimitiveKind::UInt16,
            "UInt32" => PrimitiveKind::UInt32,
            "UInt64" => PrimitiveKind::UInt64,
            "Float32" => PrimitiveKind::Float32,
            "Float64" => PrimitiveKind::Float64,
            "Binary" => PrimitiveKind::Binary,
            "String" => PrimitiveKind::String,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "Bool",
            PrimitiveKind::Int8 => "Int8",
            PrimitiveKind::Int16 => "Int16",
            PrimitiveKind::Int32 => "Int32",
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::UInt8 => "UInt8",
            PrimitiveKind::UInt16 => "UInt16",
            PrimitiveKind::UInt32 => "UInt32",
            PrimitiveKind::UInt64 => "UInt64",
            PrimitiveKind::Float32 => "Float32",
            PrimitiveKind::Float64 => "Float64",
            PrimitiveKind::Binary => "Binary",
            PrimitiveKind::String => "String",
        }
    }
}

/// Data flow of an argument: into the call, out of it, or both.
///
/// Direction decides the calling convention and which side serializes the
/// argument; the policy table lives in the lowering pass.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    #[serde(rename = "in")]
    In,
    #[serde(rename = "out")]
    Out,
    #[serde(rename = "inout")]
    InOut,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }
}
