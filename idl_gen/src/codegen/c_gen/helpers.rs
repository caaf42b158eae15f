use crate::lowering::argument::Place;
use crate::lowering::{CodecCall, PassBy};
use idl_types::PrimitiveKind;

/* Target scalar representation for each wire primitive */
pub fn primitive_to_c_type(primitive: PrimitiveKind) -> &'static str {
    match primitive {
        PrimitiveKind::Bool => "bool",
        PrimitiveKind::Int8 => "int8_t",
        PrimitiveKind::Int16 => "int16_t",
        PrimitiveKind::Int32 => "int32_t",
        PrimitiveKind::Int64 => "int64_t",
        PrimitiveKind::UInt8 => "uint8_t",
        PrimitiveKind::UInt16 => "uint16_t",
        PrimitiveKind::UInt32 => "uint32_t",
        PrimitiveKind::UInt64 => "uint64_t",
        PrimitiveKind::Float32 => "float",
        PrimitiveKind::Float64 => "double",
        PrimitiveKind::Binary => "buffer_t",
        PrimitiveKind::String => "char*",
    }
}

/* Suffix of the buffer codec primitive: write_<suffix> / read_<suffix> */
pub fn codec_suffix(primitive: PrimitiveKind) -> &'static str {
    match primitive {
        PrimitiveKind::Bool => "bool",
        PrimitiveKind::Int8 => "int8",
        PrimitiveKind::Int16 => "int16",
        PrimitiveKind::Int32 => "int32",
        PrimitiveKind::Int64 => "int64",
        PrimitiveKind::UInt8 => "uint8",
        PrimitiveKind::UInt16 => "uint16",
        PrimitiveKind::UInt32 => "uint32",
        PrimitiveKind::UInt64 => "uint64",
        PrimitiveKind::Float32 => "float",
        PrimitiveKind::Float64 => "double",
        PrimitiveKind::Binary => "buffer",
        PrimitiveKind::String => "cstring",
    }
}

pub fn c_return_type(returns: Option<PrimitiveKind>) -> &'static str {
    match returns {
        Some(primitive) => primitive_to_c_type(primitive),
        None => "void",
    }
}

/// Parameter declaration fragment for a generated signature.
pub fn param_decl(
    primitive: PrimitiveKind,
    pass_by: PassBy,
    name: &str,
    with_const: bool,
) -> String {
    let base = primitive_to_c_type(primitive);
    match pass_by {
        PassBy::Value if with_const => format!("const {} {}", base, escape_c_keyword(name)),
        PassBy::Value => format!("{} {}", base, escape_c_keyword(name)),
        PassBy::Address => format!("{}* {}", base, escape_c_keyword(name)),
    }
}

/// Expression for a codec call's storage location.
pub fn place_expr(place: Place, name: &str) -> String {
    let ident = escape_c_keyword(name);
    match place {
        Place::Name => ident,
        Place::Deref => format!("*{ident}"),
        Place::Addr => format!("&{ident}"),
    }
}

/// Render one codec call: `<buffer><access><op>_<suffix>(<place>);`
pub fn codec_line(buffer: &str, access: &str, op: &str, call: &CodecCall, name: &str) -> String {
    format!(
        "{}{}{}_{}({});",
        buffer,
        access,
        op,
        codec_suffix(call.primitive),
        place_expr(call.place, name)
    )
}

pub fn escape_c_keyword(name: &str) -> String {
    const C_KEYWORDS: &[&str] = &[
        "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
        "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
        "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch",
        "typedef", "union", "unsigned", "void", "volatile", "while", "bool", "true", "false",
    ];

    if C_KEYWORDS.contains(&name) {
        let mut escaped = name.to_string();
        escaped.push('_');
        escaped
    } else {
        name.to_string()
    }
}

/// Include guard derived from a filename: uppercased, non-identifier
/// characters mapped to underscores.
pub fn include_guard(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
