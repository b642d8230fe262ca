//! Generator options carried with a compilation.

use serde::{Deserialize, Serialize};

/// Indentation style for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndentStyle {
    /// Spaces with the specified width.
    Spaces(u8),
    Tab,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

/// How text copied into the verbatim string literal is escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralEscape {
    /// Copy source characters unchanged. A `"` in the embedded declaration
    /// terminates the literal early.
    #[default]
    Verbatim,
    /// Double every `"` so the literal always round-trips.
    DoubleQuotes,
}

/// Name of the marker annotation that requests a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerName {
    pub name: String,
    pub namespace: String,
}

impl MarkerName {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Class name of the marker, always ending in `Attribute`.
    pub fn class_name(&self) -> String {
        if self.name.ends_with("Attribute") {
            self.name.clone()
        } else {
            format!("{}Attribute", self.name)
        }
    }

    /// Short name as written at a use site, without the `Attribute` suffix.
    pub fn short_name(&self) -> &str {
        self.name.strip_suffix("Attribute").unwrap_or(&self.name)
    }

    /// Check whether an annotation name as written refers to this marker.
    pub fn matches(&self, written: &str) -> bool {
        let written = written.trim().trim_start_matches("global::");
        let unqualified = match written.strip_prefix(self.namespace.as_str()) {
            Some(rest) if !self.namespace.is_empty() => match rest.strip_prefix('.') {
                Some(rest) => rest,
                None => return false,
            },
            _ => written,
        };
        unqualified == self.short_name() || unqualified == self.class_name()
    }
}

impl Default for MarkerName {
    fn default() -> Self {
        Self::new("TypeSource", "DeclSnap")
    }
}

/// Options that shape every generated unit of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub indent: IndentStyle,
    pub escape: LiteralEscape,
    pub marker: MarkerName,
    /// Emit the marker declaration as its own unit.
    pub emit_marker: bool,
    /// First line of every generated unit.
    pub header: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            indent: IndentStyle::default(),
            escape: LiteralEscape::default(),
            marker: MarkerName::default(),
            emit_marker: true,
            header: Some("// <auto-generated/>".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_names() {
        let marker = MarkerName::default();
        assert_eq!(marker.class_name(), "TypeSourceAttribute");
        assert_eq!(marker.short_name(), "TypeSource");
    }

    #[test]
    fn test_marker_matches_written_forms() {
        let marker = MarkerName::default();
        assert!(marker.matches("TypeSource"));
        assert!(marker.matches("TypeSourceAttribute"));
        assert!(marker.matches("DeclSnap.TypeSource"));
        assert!(marker.matches("global::DeclSnap.TypeSourceAttribute"));
        assert!(!marker.matches("Other.TypeSource"));
        assert!(!marker.matches("DeclSnapTypeSource"));
        assert!(!marker.matches("MemberSource"));
    }

    #[test]
    fn test_marker_with_attribute_suffix() {
        let marker = MarkerName::new("SnapshotAttribute", "Tools");
        assert_eq!(marker.class_name(), "SnapshotAttribute");
        assert!(marker.matches("Snapshot"));
        assert!(marker.matches("Tools.SnapshotAttribute"));
    }

    #[test]
    fn test_default_options() {
        let options = GeneratorOptions::default();
        assert_eq!(options.indent, IndentStyle::Spaces(4));
        assert_eq!(options.escape, LiteralEscape::Verbatim);
        assert!(options.emit_marker);
    }
}
