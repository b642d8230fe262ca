use std::path::PathBuf;

use clap::Args;
use declsnap_codegen::{GenerationReport, Generator};
use declsnap_manifest::DeclsnapToml;
use eyre::{Context, Result};

use super::{UnwrapOrExit, print_diagnostics};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to declsnap.toml (defaults to ./declsnap.toml)
    #[arg(short, long, default_value = "declsnap.toml")]
    pub manifest: PathBuf,

    /// Output directory for generated units
    #[arg(short, long, default_value = "generated")]
    pub output: PathBuf,

    /// Preview generated units without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let declsnap_toml = DeclsnapToml::open(&self.manifest).unwrap_or_exit();
        let compilation = declsnap_toml.compile().unwrap_or_exit();

        let report = Generator::new(&compilation).generate();

        if self.dry_run {
            self.run_preview(&report);
        } else {
            self.run_generation(&report)?;
        }

        print_diagnostics(&report.diagnostics);

        // Successful units are already out; failures still fail the run.
        if report.has_errors() {
            std::process::exit(1);
        }

        Ok(())
    }

    fn run_generation(&self, report: &GenerationReport) -> Result<()> {
        let stats = report
            .units
            .write_all(&self.output)
            .wrap_err_with(|| format!("Failed to write units to {}", self.output.display()))?;

        println!("Generated: {}/", self.output.display());
        for path in &stats.written_paths {
            println!("  + {}", path);
        }
        Self::print_summary(report, stats.written);

        Ok(())
    }

    fn run_preview(&self, report: &GenerationReport) {
        let units = report.units.preview();

        for unit in &units {
            println!("── {} ──", unit.hint_name);
            println!("{}", unit.content);
        }

        println!("── Summary ──");
        println!("{} units would be generated", units.len());
        Self::print_summary(report, 0);
    }

    fn print_summary(report: &GenerationReport, written: usize) {
        if written > 0 {
            println!();
            println!(
                "{} unit{} written",
                written,
                if written == 1 { "" } else { "s" }
            );
        }
        println!(
            "{} work item{}, {} discarded",
            report.work_items,
            if report.work_items == 1 { "" } else { "s" },
            report.discarded
        );
    }
}
