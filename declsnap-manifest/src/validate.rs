//! Validation utilities for C# identifiers and manifest spans.

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// C# reserved keywords that cannot be used as identifiers without `@`.
pub(crate) const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub(crate) fn is_csharp_keyword(name: &str) -> bool {
    CSHARP_KEYWORDS.contains(&name)
}

/// Validate a single C# identifier.
/// Returns None if valid, Some(reason) if invalid.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let (verbatim, body) = match name.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, name),
    };

    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Some("name must contain only letters, digits and underscores");
    }

    if !verbatim && is_csharp_keyword(body) {
        return Some("name is a C# keyword; prefix it with '@' to use it as an identifier");
    }

    None
}

/// Validate a dotted namespace name such as `App.Models`.
pub(crate) fn validate_namespace(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("name cannot be empty");
    }
    name.split('.').find_map(|segment| {
        if segment.is_empty() {
            Some("namespace segments cannot be empty")
        } else {
            validate_identifier(segment)
        }
    })
}

/// Find the span of the `occurrence`-th quoted string value `"name"` in the TOML source.
pub(crate) fn find_value_span(src: &str, name: &str, occurrence: usize) -> Option<SourceSpan> {
    let pattern = format!("\"{}\"", name);
    src.match_indices(&pattern)
        .nth(occurrence)
        // +1 to skip the opening quote
        .map(|(pos, _)| SourceSpan::from((pos + 1, name.len())))
}

/// Validation context that carries source information and the path of the
/// entry being checked (e.g. `types.Foo`).
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    path: Vec<String>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            source: self.source,
            path,
        }
    }

    pub fn source(&self) -> &'a SourceContext {
        self.source
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages, e.g. "container in 'types.Foo'".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), name, 0)
    }

    /// Validate a plain identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        match validate_identifier(name) {
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            )),
            None => Ok(()),
        }
    }

    /// Validate a dotted namespace name.
    pub fn validate_namespace(&self, name: &str) -> Result<()> {
        match validate_namespace(name) {
            Some(reason) => Err(self.source.invalid_identifier_error(
                name,
                self.context_for("namespace"),
                reason,
                self.find_span(name),
            )),
            None => Ok(()),
        }
    }
}
