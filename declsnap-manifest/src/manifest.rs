//! Manifest types, parsing and lowering for declsnap.toml files.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use declsnap_ir::{
    Annotation, Compilation, GeneratorOptions, IndentStyle, LiteralEscape, MarkerName,
    MethodSignature, MethodSymbol, Parameter, Scope, TypeHeader, TypeKind, TypeSymbol,
};
use serde::Deserialize;

use crate::{
    Error, Result,
    error::SourceContext,
    validate::{ParseContext, find_value_span},
};

/// Root manifest for declsnap.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generator settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Types whose declarations can be snapshotted
    #[serde(default)]
    pub types: Vec<TypeEntry>,

    /// Methods, some of which carry the marker annotation
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

/// `[generator]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Indent width in spaces, or `"tab"`.
    pub indent: Option<IndentSetting>,
    #[serde(default)]
    pub escape: LiteralEscape,
    pub marker: Option<String>,
    pub marker_namespace: Option<String>,
    pub emit_marker: Option<bool>,
    /// First line of every generated file; an empty string disables it.
    pub header: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IndentSetting {
    Width(u8),
    Keyword(String),
}

/// A containing scope written in the manifest.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerEntry {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
}

/// One declaration fragment: inline text or a file holding it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FragmentEntry {
    Inline(String),
    File { file: PathBuf },
}

/// `[[types]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub namespace: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Containing scopes inside the namespace, outermost first.
    #[serde(default)]
    pub containers: Vec<ContainerEntry>,
    #[serde(default)]
    pub fragments: Vec<FragmentEntry>,
}

/// `[[methods]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MethodEntry {
    pub name: String,
    #[serde(default = "default_return_type")]
    pub return_type: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    pub namespace: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerEntry>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

fn default_kind() -> String {
    "class".to_string()
}

fn default_return_type() -> String {
    "string".to_string()
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "declsnap.toml")
    }
}

impl Manifest {
    /// Parse a declsnap.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a declsnap.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }

    /// Generator options with defaults filled in.
    pub fn options(&self) -> GeneratorOptions {
        let config = &self.generator;
        let defaults = GeneratorOptions::default();
        let marker_defaults = MarkerName::default();

        GeneratorOptions {
            indent: match &config.indent {
                Some(IndentSetting::Width(width)) => IndentStyle::Spaces(*width),
                Some(IndentSetting::Keyword(_)) => IndentStyle::Tab,
                None => defaults.indent,
            },
            escape: config.escape,
            marker: MarkerName::new(
                config
                    .marker
                    .clone()
                    .unwrap_or(marker_defaults.name),
                config
                    .marker_namespace
                    .clone()
                    .unwrap_or(marker_defaults.namespace),
            ),
            emit_marker: config.emit_marker.unwrap_or(defaults.emit_marker),
            header: match &config.header {
                Some(header) if header.is_empty() => None,
                Some(header) => Some(header.clone()),
                None => defaults.header,
            },
        }
    }

    /// Lower into a [`Compilation`], reading fragment files relative to `base_dir`.
    pub fn lower(&self, base_dir: &Path) -> Result<Compilation> {
        let mut compilation = Compilation::new().with_options(self.options());

        for entry in &self.types {
            let mut ty = TypeSymbol::new(TypeHeader {
                kind: kind_of(&entry.kind).unwrap_or(TypeKind::Class),
                name: entry.name.clone(),
                modifiers: entry.modifiers.clone(),
                type_parameters: entry.type_parameters.clone(),
            });
            ty.containing = chain(entry.namespace.as_deref(), &entry.containers);

            for fragment in &entry.fragments {
                ty.fragments.push(match fragment {
                    FragmentEntry::Inline(text) => text.clone(),
                    FragmentEntry::File { file } => {
                        let path = base_dir.join(file);
                        std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?
                    }
                });
            }
            compilation.types.push(ty);
        }

        for entry in &self.methods {
            let mut method = MethodSymbol::new(MethodSignature {
                name: entry.name.clone(),
                return_type: entry.return_type.clone(),
                modifiers: entry.modifiers.clone(),
                parameters: entry.parameters.clone(),
                type_parameters: entry.type_parameters.clone(),
            });
            method.containing = chain(entry.namespace.as_deref(), &entry.containers);
            method.annotations = entry.annotations.clone();
            compilation.methods.push(method);
        }

        Ok(compilation)
    }
}

fn kind_of(kind: &str) -> Option<TypeKind> {
    TypeKind::from_keyword(kind.trim())
}

fn chain(namespace: Option<&str>, containers: &[ContainerEntry]) -> Vec<Scope> {
    namespace
        .map(Scope::namespace)
        .into_iter()
        .chain(containers.iter().map(|container| {
            match kind_of(&container.kind) {
                Some(kind) => Scope::Type(TypeHeader {
                    kind,
                    name: container.name.clone(),
                    modifiers: container.modifiers.clone(),
                    type_parameters: container.type_parameters.clone(),
                }),
                None => Scope::namespace(container.name.clone()),
            }
        }))
        .collect()
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source.parse_error(e))?;
    validate_manifest(&manifest, &source)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, source: &SourceContext) -> Result<()> {
    let ctx = ParseContext::new(source);
    validate_generator(&manifest.generator, &ctx.push("generator"))?;

    let mut seen: HashMap<String, usize> = HashMap::new();
    for entry in &manifest.types {
        let type_ctx = ctx.push("types").push(entry.name.clone());
        type_ctx.validate_name(&entry.name, "type")?;
        if kind_of(&entry.kind).is_none() {
            return Err(source.unknown_kind_error(
                &entry.kind,
                type_ctx.context_for("type"),
                type_ctx.find_span(&entry.kind),
            ));
        }
        validate_scopes(entry.namespace.as_deref(), &entry.containers, &type_ctx)?;
        for name in &entry.type_parameters {
            type_ctx.validate_name(name, "type parameter")?;
        }

        if entry.fragments.is_empty() {
            return Err(source.missing_fragments_error(&entry.name, type_ctx.find_span(&entry.name)));
        }

        let qualified = qualified_name(entry);
        let count = seen.entry(qualified.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            let first = find_value_span(source.src(), &entry.name, 0);
            let second = find_value_span(source.src(), &entry.name, *count - 1);
            return match (first, second) {
                (Some(first), Some(second)) => {
                    Err(source.duplicate_type_error(qualified, first, second))
                }
                _ => Err(source.validation_error(
                    format!("type '{}' is declared more than once", qualified),
                    first,
                )),
            };
        }
    }

    for entry in &manifest.methods {
        let method_ctx = ctx.push("methods").push(entry.name.clone());
        method_ctx.validate_name(&entry.name, "method")?;
        validate_scopes(entry.namespace.as_deref(), &entry.containers, &method_ctx)?;
        for parameter in &entry.parameters {
            method_ctx.validate_name(&parameter.name, "parameter")?;
        }
        for annotation in &entry.annotations {
            if annotation.name.trim().is_empty() {
                return Err(source.validation_error(
                    format!("annotation on '{}' has an empty name", method_ctx.path_string()),
                    None,
                ));
            }
        }
    }

    Ok(())
}

fn validate_generator(config: &GeneratorConfig, ctx: &ParseContext<'_>) -> Result<()> {
    match &config.indent {
        Some(IndentSetting::Width(0)) => {
            return Err(ctx.source().validation_error("indent width must be at least 1", None));
        }
        Some(IndentSetting::Keyword(keyword)) if keyword != "tab" => {
            return Err(ctx.source().validation_error(
                format!("indent must be a width or \"tab\", found \"{}\"", keyword),
                ctx.find_span(keyword),
            ));
        }
        _ => {}
    }
    if let Some(marker) = &config.marker {
        ctx.validate_name(marker, "marker")?;
    }
    if let Some(namespace) = config.marker_namespace.as_deref().filter(|ns| !ns.is_empty()) {
        ctx.validate_namespace(namespace)?;
    }
    Ok(())
}

fn validate_scopes(
    namespace: Option<&str>,
    containers: &[ContainerEntry],
    ctx: &ParseContext<'_>,
) -> Result<()> {
    if let Some(namespace) = namespace {
        ctx.validate_namespace(namespace)?;
    }
    for container in containers {
        if container.kind.trim() == "namespace" {
            ctx.validate_namespace(&container.name)?;
        } else if kind_of(&container.kind).is_some() {
            ctx.validate_name(&container.name, "container")?;
        } else {
            return Err(ctx.source().unknown_kind_error(
                &container.kind,
                ctx.context_for("container"),
                ctx.find_span(&container.kind),
            ));
        }
    }
    Ok(())
}

fn qualified_name(entry: &TypeEntry) -> String {
    entry
        .namespace
        .iter()
        .map(String::as_str)
        .chain(entry.containers.iter().map(|c| c.name.as_str()))
        .chain(std::iter::once(entry.name.as_str()))
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use declsnap_ir::AnnotationArg;

    use super::*;

    const BASIC: &str = r#"
        [[types]]
        name = "Foo"
        namespace = "App.Models"
        containers = [{ kind = "class", name = "Outer", modifiers = ["public"] }]
        fragments = ["class Foo { int X; }"]

        [[methods]]
        name = "Bar"
        modifiers = ["public"]
        parameters = [{ type = "int", name = "x" }]
        containers = [{ kind = "class", name = "Baz" }]
        annotations = [{ name = "TypeSource", args = [{ type = "Foo" }, { int = 2 }, "null"] }]
    "#;

    #[test]
    fn test_parse_basic_manifest() {
        let manifest: Manifest = BASIC.parse().expect("valid manifest");
        assert_eq!(manifest.types.len(), 1);
        assert_eq!(manifest.methods[0].return_type, "string");
        assert_eq!(
            manifest.methods[0].annotations[0].args,
            vec![
                AnnotationArg::Type("Foo".into()),
                AnnotationArg::Int(2),
                AnnotationArg::Null
            ]
        );
    }

    #[test]
    fn test_lower_builds_chains() {
        let manifest: Manifest = BASIC.parse().unwrap();
        let compilation = manifest.lower(Path::new(".")).unwrap();

        let foo = &compilation.types[0];
        assert_eq!(foo.qualified_name(), "App.Models.Outer.Foo");
        assert_eq!(foo.containing[0], Scope::namespace("App.Models"));
        assert_eq!(foo.fragments, vec!["class Foo { int X; }".to_string()]);

        let bar = &compilation.methods[0];
        assert_eq!(bar.display_name(), "Baz.Bar(int)");
        assert_eq!(bar.signature.parameters[0], Parameter::new("int", "x"));
        assert!(compilation.resolve_type("Foo").is_some());
    }

    #[test]
    fn test_generator_defaults() {
        let manifest: Manifest = "".parse().unwrap();
        assert_eq!(manifest.options(), GeneratorOptions::default());
    }

    #[test]
    fn test_generator_settings() {
        let manifest: Manifest = r#"
            [generator]
            indent = "tab"
            escape = "double-quotes"
            marker = "Snapshot"
            marker_namespace = "Tools"
            emit_marker = false
            header = ""
        "#
        .parse()
        .unwrap();

        let options = manifest.options();
        assert_eq!(options.indent, IndentStyle::Tab);
        assert_eq!(options.escape, LiteralEscape::DoubleQuotes);
        assert_eq!(options.marker, MarkerName::new("Snapshot", "Tools"));
        assert!(!options.emit_marker);
        assert_eq!(options.header, None);

        let manifest: Manifest = "[generator]\nindent = 2\n".parse().unwrap();
        assert_eq!(manifest.options().indent, IndentStyle::Spaces(2));
    }

    #[test]
    fn test_bad_indent_keyword() {
        let err = "[generator]\nindent = \"wide\"\n"
            .parse::<Manifest>()
            .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = "[generator]\ncolour = true\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_fragments() {
        let err = "[[types]]\nname = \"Foo\"\n".parse::<Manifest>().unwrap_err();
        assert!(matches!(*err, Error::MissingFragments { .. }));
    }

    #[test]
    fn test_duplicate_type() {
        let err = r#"
            [[types]]
            name = "Foo"
            fragments = ["class Foo { }"]

            [[types]]
            name = "Foo"
            fragments = ["class Foo { }"]
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(matches!(*err, Error::DuplicateType { .. }));
    }

    #[test]
    fn test_same_name_in_other_namespace_is_fine() {
        let manifest = r#"
            [[types]]
            name = "Foo"
            namespace = "A"
            fragments = ["class Foo { }"]

            [[types]]
            name = "Foo"
            namespace = "B"
            fragments = ["class Foo { }"]
        "#
        .parse::<Manifest>();
        assert!(manifest.is_ok());
    }

    #[test]
    fn test_unknown_container_kind() {
        let err = r#"
            [[methods]]
            name = "Bar"
            containers = [{ kind = "module", name = "Baz" }]
        "#
        .parse::<Manifest>()
        .unwrap_err();
        assert!(matches!(*err, Error::UnknownKind { .. }));
    }

    #[test]
    fn test_invalid_type_name() {
        let err = "[[types]]\nname = \"Foo-Bar\"\nfragments = [\"x\"]\n"
            .parse::<Manifest>()
            .unwrap_err();
        match *err {
            Error::InvalidIdentifier { name, span, .. } => {
                assert_eq!(name, "Foo-Bar");
                assert!(span.is_some());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_record_struct_kind() {
        let manifest: Manifest = r#"
            [[types]]
            name = "Point"
            kind = "record struct"
            fragments = ["record struct Point(int X);"]
        "#
        .parse()
        .unwrap();
        let compilation = manifest.lower(Path::new(".")).unwrap();
        assert_eq!(compilation.types[0].header.kind, TypeKind::RecordStruct);
    }
}
