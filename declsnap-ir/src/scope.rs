//! Scope definitions for containing chains.

use serde::{Deserialize, Serialize};

/// Kind of a named type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Record,
    RecordStruct,
}

impl TypeKind {
    /// Get the declaration keyword(s) for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Record => "record",
            TypeKind::RecordStruct => "record struct",
        }
    }

    /// Parse a declaration keyword, accepting both `record struct` and `record_struct`.
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "class" => Some(TypeKind::Class),
            "struct" => Some(TypeKind::Struct),
            "interface" => Some(TypeKind::Interface),
            "record" | "record class" => Some(TypeKind::Record),
            "record struct" | "record_struct" => Some(TypeKind::RecordStruct),
            _ => None,
        }
    }
}

/// Header of a type declaration, enough to reproduce `partial class Foo<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeHeader {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
}

impl TypeHeader {
    /// Create a header with no modifiers or type parameters.
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    /// Add a modifier (e.g. `public`, `static`).
    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Add a type parameter.
    pub fn type_parameter(mut self, name: impl Into<String>) -> Self {
        self.type_parameters.push(name.into());
        self
    }

    /// Name used in generated file names: generic arity is written as `` `N ``.
    pub fn metadata_name(&self) -> String {
        if self.type_parameters.is_empty() {
            self.name.clone()
        } else {
            format!("{}`{}", self.name, self.type_parameters.len())
        }
    }
}

/// A method parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
}

impl Parameter {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Signature of a method, enough to reproduce its partial declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
}

impl MethodSignature {
    /// Create a parameterless method signature.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            modifiers: Vec::new(),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
        }
    }

    /// Add a modifier.
    pub fn modifier(mut self, modifier: impl Into<String>) -> Self {
        self.modifiers.push(modifier.into());
        self
    }

    /// Add a parameter.
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Name plus type parameters and parameter types, e.g. `Bar<T>(int, string)`.
    ///
    /// Distinct for every overload a C# type can declare.
    pub fn overload_name(&self) -> String {
        let mut out = self.name.clone();
        if !self.type_parameters.is_empty() {
            out.push('<');
            out.push_str(&self.type_parameters.join(", "));
            out.push('>');
        }
        out.push('(');
        out.push_str(
            &self
                .parameters
                .iter()
                .map(|p| p.ty.trim())
                .collect::<Vec<_>>()
                .join(", "),
        );
        out.push(')');
        out
    }
}

/// One entry of a containing chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Scope {
    /// A namespace; a dotted name such as `App.Models` is a single scope.
    Namespace { name: String },
    /// A containing type.
    Type(TypeHeader),
    /// A method; only ever the last entry of a host chain.
    Method(MethodSignature),
}

impl Scope {
    /// Create a namespace scope.
    pub fn namespace(name: impl Into<String>) -> Self {
        Scope::Namespace { name: name.into() }
    }

    /// Create a type scope.
    pub fn ty(kind: TypeKind, name: impl Into<String>) -> Self {
        Scope::Type(TypeHeader::new(kind, name))
    }

    /// Name of the scope as written in source.
    pub fn name(&self) -> &str {
        match self {
            Scope::Namespace { name } => name,
            Scope::Type(header) => &header.name,
            Scope::Method(signature) => &signature.name,
        }
    }

    pub fn is_namespace(&self) -> bool {
        matches!(self, Scope::Namespace { .. })
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Scope::Method(_))
    }
}
