//! Emitter: groups lowered artifacts into per-interface file pairs and a
//! document-wide UID header, and writes them out. Rendering is pure and
//! deterministic; repeated runs over unchanged input produce byte-identical
//! files. Nothing touches the filesystem until the whole document has
//! rendered.

pub mod c_gen;
pub mod templates;

use crate::error::GenResult;
use crate::lowering::LoweredInterface;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInterface {
    pub name: String,
    pub shim: GeneratedFile,
    pub handler: GeneratedFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    pub uid_header: GeneratedFile,
    pub interfaces: Vec<GeneratedInterface>,
}

pub fn generate(interfaces: &[LoweredInterface]) -> GenResult<GeneratedOutput> {
    let uid_filename = "rpc_uid.h".to_string();
    let uid_header = GeneratedFile {
        content: templates::render_header_file(&uid_filename, &c_gen::emit_uid_header(interfaces))?,
        filename: uid_filename,
    };

    let mut generated = Vec::with_capacity(interfaces.len());
    for interface in interfaces {
        let shim_filename = format!("rpc_shim_{}.h", interface.name);
        let handler_filename = format!("rpc_handler_{}.h", interface.name);

        let shim = GeneratedFile {
            content: templates::render_header_file(
                &shim_filename,
                &c_gen::emit_shim_file(interface),
            )?,
            filename: shim_filename,
        };
        let handler = GeneratedFile {
            content: templates::render_header_file(
                &handler_filename,
                &c_gen::emit_handler_file(interface),
            )?,
            filename: handler_filename,
        };

        generated.push(GeneratedInterface {
            name: interface.name.clone(),
            shim,
            handler,
        });
    }

    Ok(GeneratedOutput {
        uid_header,
        interfaces: generated,
    })
}

/// Write every rendered file under `output_dir`, announcing each interface.
pub fn write_output(output: &GeneratedOutput, output_dir: &Path) -> GenResult<()> {
    std::fs::create_dir_all(output_dir)?;

    std::fs::write(
        output_dir.join(&output.uid_header.filename),
        &output.uid_header.content,
    )?;

    for interface in &output.interfaces {
        std::fs::write(
            output_dir.join(&interface.shim.filename),
            &interface.shim.content,
        )?;
        std::fs::write(
            output_dir.join(&interface.handler.filename),
            &interface.handler.content,
        )?;
        println!("[✓] Generated interface {}", interface.name);
    }

    Ok(())
}
