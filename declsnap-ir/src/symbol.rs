//! Type and method symbols, annotations and the compilation that holds them.

use serde::{Deserialize, Serialize};

use crate::{GeneratorOptions, MethodSignature, Scope, TypeHeader};

/// A named type together with its raw declaration text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSymbol {
    pub header: TypeHeader,
    /// Containing chain, outermost first. Does not include the type itself.
    pub containing: Vec<Scope>,
    /// Raw text of each declaration, in source declaration order.
    pub fragments: Vec<String>,
}

impl TypeSymbol {
    pub fn new(header: TypeHeader) -> Self {
        Self {
            header,
            containing: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Append a containing scope (inner to the ones already present).
    pub fn within(mut self, scope: Scope) -> Self {
        self.containing.push(scope);
        self
    }

    /// Append a declaration fragment.
    pub fn fragment(mut self, text: impl Into<String>) -> Self {
        self.fragments.push(text.into());
        self
    }

    /// Dotted name including every containing namespace and type.
    pub fn qualified_name(&self) -> String {
        qualify(&self.containing, &self.header.name)
    }
}

/// A method that may carry a marker annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSymbol {
    pub signature: MethodSignature,
    /// Containing chain, outermost first. Does not include the method itself.
    pub containing: Vec<Scope>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl MethodSymbol {
    pub fn new(signature: MethodSignature) -> Self {
        Self {
            signature,
            containing: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Append a containing scope (inner to the ones already present).
    pub fn within(mut self, scope: Scope) -> Self {
        self.containing.push(scope);
        self
    }

    /// Attach an annotation.
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The full chain a generated body must be nested in: containers, then the method.
    pub fn scope_chain(&self) -> Vec<Scope> {
        let mut chain = self.containing.clone();
        chain.push(Scope::Method(self.signature.clone()));
        chain
    }

    /// Dotted name of the containing type, generic arity written as `` `N ``.
    pub fn containing_type_name(&self) -> String {
        self.containing
            .iter()
            .map(|scope| match scope {
                Scope::Type(header) => header.metadata_name(),
                other => other.name().to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Human readable identity, e.g. `App.Baz.Bar(int)`.
    pub fn display_name(&self) -> String {
        qualify(&self.containing, &self.signature.overload_name())
    }
}

/// A positional annotation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationArg {
    /// A type reference, e.g. `typeof(Foo)`.
    Type(String),
    Int(i64),
    String(String),
    Bool(bool),
    Null,
}

/// An annotation applied to a method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default)]
    pub args: Vec<AnnotationArg>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Append a positional argument.
    pub fn arg(mut self, arg: AnnotationArg) -> Self {
        self.args.push(arg);
        self
    }
}

/// Everything the generator sees for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilation {
    pub types: Vec<TypeSymbol>,
    pub methods: Vec<MethodSymbol>,
    #[serde(default)]
    pub options: GeneratorOptions,
}

impl Compilation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, ty: TypeSymbol) -> Self {
        self.types.push(ty);
        self
    }

    pub fn with_method(mut self, method: MethodSymbol) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve a type reference.
    ///
    /// An exact qualified-name match wins; otherwise the simple name must match
    /// exactly one type. Anything else does not resolve.
    pub fn resolve_type(&self, reference: &str) -> Option<&TypeSymbol> {
        let reference = reference.trim().trim_start_matches("global::");
        if reference.is_empty() {
            return None;
        }

        if let Some(ty) = self
            .types
            .iter()
            .find(|ty| ty.qualified_name() == reference)
        {
            return Some(ty);
        }

        let mut candidates = self.types.iter().filter(|ty| ty.header.name == reference);
        match (candidates.next(), candidates.next()) {
            (Some(ty), None) => Some(ty),
            _ => None,
        }
    }
}

fn qualify(containing: &[Scope], name: &str) -> String {
    containing
        .iter()
        .map(Scope::name)
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join(".")
}
