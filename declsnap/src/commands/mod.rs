mod check;
mod generate;
mod marker;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use declsnap_codegen::{Diagnostic, Severity};
use eyre::Result;
use generate::GenerateCommand;
use marker::MarkerCommand;

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for declsnap_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Print diagnostics to stderr in the order they were reported.
pub(crate) fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diag in diagnostics {
        let label = match diag.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        eprintln!("{}[{}]: {}", label, diag.phase, diag.message);
        if let Some(loc) = &diag.location {
            eprintln!("  --> {}", loc);
        }
    }
}

#[derive(Parser)]
#[command(name = "declsnap")]
#[command(version)]
#[command(about = "Snapshot C# type declarations into string literals")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Marker(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate snapshot units from declsnap.toml
    Generate(GenerateCommand),

    /// Validate declsnap.toml and list the work items it produces
    Check(CheckCommand),

    /// Print the marker attribute declaration
    Marker(MarkerCommand),
}
