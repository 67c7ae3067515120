mod error;

use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use miniasn::{Diagnostic, MiniAsnCompiler};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::error::{to_error, MiniAsnCompilerCache};

/// Parse MiniASN schema files and print their canonical form
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Schema files to parse, each file is parsed on its own
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Only report errors, do not print the parsed schemas
    #[arg(short, long)]
    quiet: bool,

    /// When to use colors in error reports
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let color = args.color.enabled();

    let mut compiler = MiniAsnCompiler::new();
    let mut failed = false;

    for path in &args.files {
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                error!(path = %path.display(), %err, "unable to read file");
                failed = true;
                continue;
            }
        };

        match compiler.add_file(path.display().to_string(), source) {
            Ok(id) => {
                if !args.quiet {
                    if let Some(rendered) = compiler.render(id) {
                        print!("{rendered}");
                    }
                }
            }
            Err(err) => {
                failed = true;
                report(&compiler, &Diagnostic::from(&err), color);
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Print a diagnostic to stderr, falling back to the plain text form if it
/// cannot be shown with its source
fn report(compiler: &MiniAsnCompiler, diag: &Diagnostic, color: bool) {
    let report = match to_error(diag, color) {
        Ok(report) => report,
        Err(err) => {
            debug!(%err, "diagnostic has no source location");
            eprintln!("{diag}");
            return;
        }
    };

    if let Err(err) = report.eprint(MiniAsnCompilerCache::new(compiler)) {
        debug!(%err, "unable to print report");
        eprintln!("{diag}");
    }
}
