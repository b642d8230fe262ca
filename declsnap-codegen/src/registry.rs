//! Registry of generated units.
//!
//! Units are keyed by hint name and kept in registration order. Registering a
//! second unit under an existing name is an error rather than an overwrite.

use std::path::Path;

use eyre::Result;
use indexmap::IndexMap;

use crate::error::GenerateError;

/// One generated source text, named by its hint name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// File name the host registers the text under, e.g. `Source.App.Baz.Bar.g.cs`.
    pub hint_name: String,
    pub content: String,
}

impl GeneratedUnit {
    pub fn new(hint_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            hint_name: hint_name.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct UnitRegistry {
    units: IndexMap<String, GeneratedUnit>,
}

impl UnitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit; fails if its hint name is taken.
    pub fn register(&mut self, unit: GeneratedUnit) -> Result<(), GenerateError> {
        if self.units.contains_key(&unit.hint_name) {
            return Err(GenerateError::DuplicateUnit {
                hint_name: unit.hint_name,
            });
        }
        tracing::debug!(hint_name = %unit.hint_name, bytes = unit.content.len(), "registered unit");
        self.units.insert(unit.hint_name.clone(), unit);
        Ok(())
    }

    pub fn get(&self, hint_name: &str) -> Option<&GeneratedUnit> {
        self.units.get(hint_name)
    }

    /// Units in registration order.
    pub fn units(&self) -> impl Iterator<Item = &GeneratedUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Preview all units (hint name and content pairs).
    pub fn preview(&self) -> Vec<GeneratedUnit> {
        self.units().cloned().collect()
    }

    /// Write every unit into `base`, one file per hint name.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();

        for unit in self.units() {
            write_file(&base.join(&unit.hint_name), &unit.content)?;
            stats.written += 1;
            stats.written_paths.push(unit.hint_name.clone());
        }

        Ok(stats)
    }
}

/// Statistics from a write operation.
#[derive(Debug, Default)]
pub struct WriteStats {
    pub written: usize,
    pub written_paths: Vec<String>,
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
