//! Stencil CLI
//!
//! # Commands
//!
//! - `compile <file> -o <output>`: compile a template into a CommonJS module
//! - `check <file>`: compile a template and report errors only
//!
//! Logging is configured with `RUST_LOG`, e.g. `RUST_LOG=stencil=debug`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use miette::{miette, IntoDiagnostic, Result};
use stencil::{compile, CompileOptions, CompileResult};
use swc_core::common::Spanned;

#[derive(Parser)]
#[command(name = "stencil")]
#[command(author, version, about = "Mustache template compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a template into a module exporting `render(data)`
    Compile {
        /// Input template file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file for the module (default: stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Print the source segments to stderr
        #[arg(long)]
        segments: bool,
    },

    /// Compile a template without writing the output
    Check {
        /// Input template file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            segments,
        } => cmd_compile(input, output, segments),
        Commands::Check { input } => cmd_check(input),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn cmd_compile(input: PathBuf, output: Option<PathBuf>, segments: bool) -> Result<()> {
    let result = compile_file(&input)?;

    if segments {
        for segment in result.segments.iter() {
            eprintln!(
                "{}:{} -> {}:{} ({} bytes)",
                segment.original_line,
                segment.original_column,
                segment.generated_line,
                segment.generated_column,
                segment.original.end - segment.original.start
            );
        }
    }

    if let Some(out_path) = output {
        fs::write(&out_path, &result.code)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to write {}: {}", out_path.display(), e))?;
        eprintln!("Wrote {}", out_path.display());
    } else {
        println!("{}", result.code);
    }

    Ok(())
}

fn cmd_check(input: PathBuf) -> Result<()> {
    compile_file(&input)?;
    eprintln!("{}: ok", input.display());
    Ok(())
}

fn compile_file(input: &Path) -> Result<CompileResult> {
    let source = fs::read_to_string(input)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read {}: {}", input.display(), e))?;

    let options = CompileOptions {
        filename: input.to_string_lossy(),
        ..Default::default()
    };

    compile(&source, &options).map_err(|e| {
        let span = e.span();
        let (line, column) = line_column(&source, span.lo.0.saturating_sub(1) as usize);
        miette!("{}:{}:{}: {}", input.display(), line, column, e)
    })
}

/// 1-based line and column of the byte offset
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |it| before.len() - it - 1) + 1;
    (line, column)
}
