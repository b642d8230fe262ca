use std::path::PathBuf;

use clap::Args;
use declsnap_codegen::marker_unit;
use declsnap_ir::GeneratorOptions;
use declsnap_manifest::DeclsnapToml;
use eyre::Result;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct MarkerCommand {
    /// Read marker settings from this declsnap.toml instead of the defaults
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,
}

impl MarkerCommand {
    /// Run the marker command
    pub fn run(&self) -> Result<()> {
        let options = match &self.manifest {
            Some(path) => DeclsnapToml::open(path).unwrap_or_exit().manifest().options(),
            None => GeneratorOptions::default(),
        };

        let unit = marker_unit(&options);
        println!("// {}", unit.hint_name);
        print!("{}", unit.content);

        Ok(())
    }
}
