//! Turning marker annotations into work items.

use declsnap_ir::{AnnotationArg, Compilation, MarkerName, MethodSymbol, TypeSymbol};
use serde::Serialize;

/// How many containing scopes of the target type are reproduced around its
/// declaration inside the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DepthLimit {
    /// Reproduce every containing scope.
    Unlimited,
    /// Reproduce at most this many of the nearest containing scopes.
    Levels(usize),
}

impl DepthLimit {
    /// Resolve the depth argument of a marker annotation.
    ///
    /// The requested value is reduced by one and clamped at `-1`, which stands
    /// for "unlimited". An omitted argument counts as `0`, so omitting it and
    /// passing `0` explicitly both end up unlimited, while `1` reproduces no
    /// containers at all.
    pub fn from_requested(requested: Option<i64>) -> Self {
        Self::from_effective(requested.unwrap_or(0).saturating_sub(1).max(-1))
    }

    /// Build from the already adjusted integer form.
    pub fn from_effective(effective: i64) -> Self {
        match usize::try_from(effective) {
            Ok(levels) => Self::Levels(levels),
            Err(_) => Self::Unlimited,
        }
    }

    /// The integer form; `-1` when unlimited.
    pub fn effective(&self) -> i64 {
        match self {
            Self::Unlimited => -1,
            Self::Levels(levels) => i64::try_from(*levels).unwrap_or(i64::MAX),
        }
    }

    /// Number of scopes kept out of a chain of `len` scopes.
    pub fn take(&self, len: usize) -> usize {
        match self {
            Self::Unlimited => len,
            Self::Levels(levels) => (*levels).min(len),
        }
    }
}

/// One unit of generation work: a host method, the type it snapshots, and
/// how much of that type's surroundings to reproduce.
#[derive(Debug, Clone, Copy)]
pub struct WorkItem<'a> {
    pub method: &'a MethodSymbol,
    pub target: &'a TypeSymbol,
    pub depth: DepthLimit,
}

impl WorkItem<'_> {
    /// Identity used in diagnostics, e.g. `App.Baz.Bar()`.
    pub fn identity(&self) -> String {
        self.method.display_name()
    }

    /// Key the generated unit is registered under.
    ///
    /// Parameterless, non-generic methods keep the plain `Source.Baz.Bar.g.cs`
    /// form. Anything else gets its overload signature appended, with generic
    /// brackets written as `{}` so the name stays a valid file name.
    pub fn hint_name(&self) -> String {
        let signature = &self.method.signature;
        let name = if signature.parameters.is_empty() && signature.type_parameters.is_empty() {
            signature.name.clone()
        } else {
            file_safe(&signature.overload_name())
        };

        let owner = self.method.containing_type_name();
        if owner.is_empty() {
            format!("Source.{}.g.cs", name)
        } else {
            format!("Source.{}.{}.g.cs", owner, name)
        }
    }
}

fn file_safe(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '<' => '{',
            '>' => '}',
            c if c.is_alphanumeric() || "_.,()[]{}`@".contains(c) => c,
            _ => '_',
        })
        .collect()
}

/// Serializable summary of a work item, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct WorkItemSummary {
    pub method: String,
    pub target: String,
    pub depth: i64,
    pub fragments: usize,
    pub hint_name: String,
}

impl From<&WorkItem<'_>> for WorkItemSummary {
    fn from(item: &WorkItem<'_>) -> Self {
        Self {
            method: item.identity(),
            target: item.target.qualified_name(),
            depth: item.depth.effective(),
            fragments: item.target.fragments.len(),
            hint_name: item.hint_name(),
        }
    }
}

/// Resolve the work item for a single method, if it carries a usable marker.
///
/// Only the first matching annotation counts. A missing or non-type first
/// argument, or a type that does not resolve, yields `None` without any
/// diagnostic.
pub fn resolve<'a>(
    compilation: &'a Compilation,
    marker: &MarkerName,
    method: &'a MethodSymbol,
) -> Option<WorkItem<'a>> {
    let annotation = method
        .annotations
        .iter()
        .find(|annotation| marker.matches(&annotation.name))?;

    let target = match annotation.args.first()? {
        AnnotationArg::Type(reference) => compilation.resolve_type(reference)?,
        _ => return None,
    };

    let requested = match annotation.args.get(1) {
        Some(AnnotationArg::Int(depth)) => Some(*depth),
        _ => None,
    };

    Some(WorkItem {
        method,
        target,
        depth: DepthLimit::from_requested(requested),
    })
}

/// Resolve work items for every method of a compilation, in declaration order.
pub fn resolve_all(compilation: &Compilation) -> Vec<WorkItem<'_>> {
    let marker = &compilation.options.marker;
    compilation
        .methods
        .iter()
        .filter_map(|method| {
            let item = resolve(compilation, marker, method);
            if item.is_none() && method.annotations.iter().any(|a| marker.matches(&a.name)) {
                tracing::debug!(
                    method = %method.display_name(),
                    "discarding marker without a resolvable target type"
                );
            }
            item
        })
        .collect()
}
