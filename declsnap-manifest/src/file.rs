use std::path::{Path, PathBuf};

use declsnap_ir::Compilation;

use crate::{Error, Manifest, Result};

/// Represents a declsnap.toml file and its parsed manifest.
pub struct DeclsnapToml {
    path: PathBuf,
    manifest: Manifest,
}

impl DeclsnapToml {
    /// Open and parse a declsnap.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self { path, manifest })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory fragment files are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Lower the manifest, reading fragment files next to the manifest.
    pub fn compile(&self) -> Result<Compilation> {
        self.manifest.lower(self.base_dir())
    }
}
