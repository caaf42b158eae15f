//! File-level rendering: every generated header goes through one wrapper
//! template that adds the generated-file banner and the include guard.

use crate::codegen::c_gen::helpers::include_guard;
use crate::error::{Error, GenResult};
use tera::{Context, Tera};

const FILE_WRAPPER: &str = "\
/* This file is auto-generated. DO NOT EDIT. */

#ifndef {{ guard }}
#define {{ guard }}

{{ content }}

#endif /* {{ guard }} */
";

pub fn render_header_file(filename: &str, content: &str) -> GenResult<String> {
    let mut context = Context::new();
    context.insert("guard", &include_guard(filename));
    context.insert("content", content.trim_end());

    Tera::one_off(FILE_WRAPPER, &context, false)
        .map_err(|err| Error::internal(format!("file template failed to render: {err}")))
}
