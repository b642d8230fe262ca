use std::path::PathBuf;

use clap::Args;
use declsnap_codegen::{Diagnostic, Generator, WorkItemSummary, resolve_all};
use declsnap_manifest::DeclsnapToml;
use eyre::{Context, Result};
use serde::Serialize;

use super::{UnwrapOrExit, print_diagnostics};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to declsnap.toml (defaults to ./declsnap.toml)
    #[arg(short, long, default_value = "declsnap.toml")]
    pub manifest: PathBuf,

    /// Print the resolved work items and diagnostics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport {
    work_items: Vec<WorkItemSummary>,
    discarded: usize,
    diagnostics: Vec<Diagnostic>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let declsnap_toml = DeclsnapToml::open(&self.manifest).unwrap_or_exit();
        let compilation = declsnap_toml.compile().unwrap_or_exit();

        // Emit everything in memory so emission failures surface here too.
        let generated = Generator::new(&compilation).generate();
        let has_errors = generated.has_errors();
        let report = CheckReport {
            work_items: resolve_all(&compilation)
                .iter()
                .map(WorkItemSummary::from)
                .collect(),
            discarded: generated.discarded,
            diagnostics: generated.diagnostics,
        };

        if self.json {
            let json =
                serde_json::to_string_pretty(&report).wrap_err("Failed to serialize report")?;
            println!("{}", json);
        } else {
            print_diagnostics(&report.diagnostics);
            self.print_report(&report);
        }

        if has_errors {
            std::process::exit(1);
        }

        Ok(())
    }

    fn print_report(&self, report: &CheckReport) {
        println!("✓ {} is valid\n", self.manifest.display());

        let count = report.work_items.len();
        println!("  {} work item{}:", count, if count == 1 { "" } else { "s" });
        for item in &report.work_items {
            let depth = match item.depth {
                -1 => "all scopes".to_string(),
                n => format!("{} enclosing scope{}", n, if n == 1 { "" } else { "s" }),
            };
            println!(
                "    {} <- {} ({}, {} fragment{})",
                item.method,
                item.target,
                depth,
                item.fragments,
                if item.fragments == 1 { "" } else { "s" }
            );
        }

        if report.discarded > 0 {
            println!(
                "\n  {} marked method{} without a resolvable target",
                report.discarded,
                if report.discarded == 1 { "" } else { "s" }
            );
        }
    }
}
