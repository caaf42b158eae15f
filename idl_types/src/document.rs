use crate::types::Direction;
use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

/// Root of a fully normalized interface document.
///
/// The tree is built once from the canonical document form and is immutable
/// afterwards; generation only reads it. Interface and function maps keep
/// declaration order, which is also the wire order.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub output_dir: String,
    pub types: IndexMap<String, TypeAlias>,
    pub interfaces: IndexMap<String, Interface>,
}

/// Document-level type alias: `name` stands for another type name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TypeAlias {
    #[serde(rename = "for")]
    pub target: String,
}

/// Named group of functions plus interface-level flags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interface {
    pub deprecated: bool,
    pub functions: IndexMap<String, Function>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Function {
    #[serde(default)]
    pub args: Vec<Argument>,
    pub returns: Option<ReturnSpec>,

    #[serde(default, rename = "@oneway")]
    pub oneway: bool,
    #[serde(default, rename = "@no_impl")]
    pub no_impl: bool,
    #[serde(default, rename = "@deprecated")]
    pub deprecated: bool,
    /* Two accepted spellings of the same flag */
    #[serde(default, rename = "@ret_status", alias = "@c:ret_status")]
    pub ret_status: bool,
    #[serde(default, rename = "@timeout")]
    pub timeout: Option<u64>,
}

/// One argument in declaration order. `ty` is an IDL type name, possibly
/// an alias that lowering resolves against the document's alias table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(rename = "@dir")]
    pub direction: Direction,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReturnSpec {
    #[serde(rename = "type")]
    pub ty: String,
}
