use thiserror::Error;

/// Result alias used across the generator crate.
pub type GenResult<T> = Result<T, Error>;

/// Top-level errors produced by the compilation pipeline.
///
/// Input errors describe a problem with the document; the `Internal*`
/// variants mean the pipeline broke one of its own guarantees and are
/// worded as compiler bugs. All of them halt compilation before any file
/// is written.
#[derive(Debug, Error)]
pub enum Error {
    /// Raw document failed the relaxed (pre-normalization) schema.
    #[error("invalid document at `{path}`: {message} (rule: {rule})")]
    Schema {
        path: String,
        rule: String,
        message: String,
    },

    /// Normalized document failed the strict schema. The normalizer is
    /// required to produce canonical output, so this is not an input
    /// problem.
    #[error(
        "normalized document is not canonical at `{path}`: {message} (rule: {rule}); \
         this is a compiler bug, please report it"
    )]
    InternalSchema {
        path: String,
        rule: String,
        message: String,
    },

    /// Canonical document did not convert into the typed model, which the
    /// strict schema is supposed to rule out.
    #[error("{message}; this is a compiler bug, please report it")]
    Internal { message: String },

    /// Argument without a `name` key whose shorthand form does not have
    /// exactly one `Type: name` entry.
    #[error("ambiguous argument at `{path}`: expected a single `Type: name` entry")]
    AmbiguousArgument { path: String },

    /// Type name outside the primitive set that is not a declared alias.
    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    /// Alias chain that never reaches a primitive type.
    #[error("type alias cycle involving `{name}`")]
    AliasCycle { name: String },

    /// `ret_status` replaces the shim's return type with a status code;
    /// combining it with a declared return value is contradictory.
    #[error("{interface}.{function}: `ret_status` used on a function with a return value")]
    RetStatusWithReturn { interface: String, function: String },

    /// Two functions hashed to the same protocol UID.
    #[error("UID collision: `{existing}` and `{incoming}` both map to {uid:#06x}")]
    UidCollision {
        existing: String,
        incoming: String,
        uid: u16,
    },

    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn internal(message: impl Into<String>) -> Error {
        Error::Internal {
            message: message.into(),
        }
    }
}
