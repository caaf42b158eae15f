use clap::{Parser, Subcommand};
use idl_gen::cmds;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "idl-gen")]
#[command(about = "RPC stub generator for JSON IDL documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate client shims and server handlers from an IDL document */
    Codegen {
        /* Input JSON IDL document */
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file: PathBuf,

        /* Output directory; overrides the document's @output_dir */
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /* Also write the canonical (normalized) document into the output */
        #[arg(long = "dump-normalized")]
        dump_normalized: bool,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },

    /* Validate and lower an IDL document without writing any files */
    Check {
        /* Input JSON IDL document */
        #[arg(short = 'f', long = "file", value_name = "FILE")]
        file: PathBuf,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Codegen {
            file,
            output_dir,
            dump_normalized,
            verbose,
        } => {
            cmds::codegen::run(file, output_dir, dump_normalized, verbose)?;
        }

        Commands::Check { file, verbose } => {
            cmds::check::run(file, verbose)?;
        }
    }

    Ok(())
}
