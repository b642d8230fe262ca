//! Generation pass: one unit per work item.

use declsnap_ir::Compilation;
use eyre::{Result, WrapErr};

use crate::{
    diagnostic::Diagnostic,
    error::GenerateError,
    literal,
    marker::marker_unit,
    normalize::NormalizedFragment,
    registry::{GeneratedUnit, UnitRegistry},
    resolve::{DepthLimit, WorkItem, resolve_all},
    scope::{ScopeMode, ScopeWriter},
};

/// Outcome of a generation pass.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub units: UnitRegistry,
    pub diagnostics: Vec<Diagnostic>,
    /// Number of work items that were resolved.
    pub work_items: usize,
    /// Number of marked methods dropped because their target did not resolve.
    pub discarded: usize,
}

impl GenerationReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }
}

/// Produces declaration snapshots for every marked method of a compilation.
pub struct Generator<'a> {
    compilation: &'a Compilation,
}

impl<'a> Generator<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        Self { compilation }
    }

    /// Run the pass.
    ///
    /// A failing work item is recorded as an error diagnostic and does not
    /// stop the others.
    pub fn generate(&self) -> GenerationReport {
        let options = &self.compilation.options;
        let items = resolve_all(self.compilation);
        let marked = self
            .compilation
            .methods
            .iter()
            .filter(|m| m.annotations.iter().any(|a| options.marker.matches(&a.name)))
            .count();

        let mut report = GenerationReport {
            work_items: items.len(),
            discarded: marked.saturating_sub(items.len()),
            ..GenerationReport::default()
        };

        if options.emit_marker {
            if let Err(err) = report.units.register(marker_unit(options)) {
                report.diagnostics.push(Diagnostic::error("register", err.to_string()));
            }
        }

        for item in &items {
            report.diagnostics.extend(self.lint(item));

            let registered = self
                .emit(item)
                .and_then(|unit| report.units.register(unit).map_err(eyre::Report::from));

            if let Err(err) = registered {
                let failure = GenerateError::emission_failure(item.identity(), &err);
                tracing::warn!(item = %item.identity(), "{}", failure);
                report
                    .diagnostics
                    .push(Diagnostic::error("emit", failure.to_string()).at(item.identity()));
            }
        }

        report
    }

    /// Assemble the unit for one work item.
    pub fn emit(&self, item: &WorkItem<'_>) -> Result<GeneratedUnit> {
        let options = &self.compilation.options;
        let mut writer = ScopeWriter::new(options.indent.into(), options.escape);

        if let Some(header) = &options.header {
            writer.line(ScopeMode::Code, header);
        }

        if let Some(method) = item.target.containing.iter().find(|s| s.is_method()) {
            return Err(GenerateError::malformed(
                method.name(),
                "a target type cannot be declared inside a method",
            ))
            .wrap_err_with(|| format!("invalid containing chain for {}", item.target.qualified_name()));
        }

        {
            let mut host = writer
                .enter(&item.method.scope_chain(), DepthLimit::Unlimited, ScopeMode::Code)
                .wrap_err_with(|| format!("cannot declare {}", item.identity()))?;

            host.line(ScopeMode::Code, "return @\"");
            let saved = host.indent_level();
            host.set_indent_level(0);

            for fragment in &item.target.fragments {
                let mut wrapper = host
                    .enter(&item.target.containing, item.depth, ScopeMode::Literal)
                    .wrap_err_with(|| {
                        format!("cannot wrap {}", item.target.qualified_name())
                    })?;

                for line in NormalizedFragment::new(fragment).lines() {
                    if line.is_empty() {
                        wrapper.blank();
                    } else {
                        wrapper.line(ScopeMode::Literal, line);
                    }
                }
            }

            host.line(ScopeMode::Code, "\";");
            host.set_indent_level(saved);
        }

        tracing::debug!(
            item = %item.identity(),
            target = %item.target.qualified_name(),
            depth = item.depth.effective(),
            "emitted snapshot"
        );

        Ok(GeneratedUnit::new(item.hint_name(), writer.finish()))
    }

    /// Warnings for a work item that will still be emitted.
    ///
    /// Only the declaration fragments are checked.
    fn lint(&self, item: &WorkItem<'_>) -> Vec<Diagnostic> {
        let escape = self.compilation.options.escape;
        let breaks = item
            .target
            .fragments
            .iter()
            .any(|fragment| literal::breaks_literal(fragment, escape));

        if breaks {
            vec![
                Diagnostic::warning(
                    "emit",
                    format!(
                        "declaration of {} contains '\"', which ends the verbatim literal early; \
                         set escape = \"double-quotes\" to keep it intact",
                        item.target.qualified_name()
                    ),
                )
                .at(item.identity()),
            ]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use declsnap_ir::{
        Annotation, AnnotationArg, GeneratorOptions, MethodSignature, MethodSymbol, Scope,
        TypeHeader, TypeKind, TypeSymbol,
    };

    use super::*;

    fn bare_options() -> GeneratorOptions {
        GeneratorOptions {
            emit_marker: false,
            header: None,
            ..GeneratorOptions::default()
        }
    }

    fn host(name: &str, target: &str) -> MethodSymbol {
        MethodSymbol::new(MethodSignature::new(name, "string"))
            .within(Scope::ty(TypeKind::Class, "Baz"))
            .annotate(Annotation::new("TypeSource").arg(AnnotationArg::Type(target.into())))
    }

    fn foo() -> TypeSymbol {
        TypeSymbol::new(TypeHeader::new(TypeKind::Class, "Foo")).fragment("class Foo { int X; }")
    }

    #[test]
    fn test_emit_minimal() {
        let compilation = Compilation::new()
            .with_type(foo())
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());

        let report = Generator::new(&compilation).generate();
        assert!(!report.has_errors());
        assert_eq!(report.units.len(), 1);

        let unit = report.units.get("Source.Baz.Bar.g.cs").expect("unit");
        assert_eq!(
            unit.content,
            "partial class Baz\n{\n    partial string Bar()\n    {\n        return @\"\nclass Foo { int X; }\n\";\n    }\n}\n"
        );
    }

    #[test]
    fn test_marker_unit_is_registered_first() {
        let compilation = Compilation::new()
            .with_type(foo())
            .with_method(host("Bar", "Foo"));

        let report = Generator::new(&compilation).generate();
        let names: Vec<_> = report.units.units().map(|u| u.hint_name.as_str()).collect();
        assert_eq!(names, vec!["TypeSourceAttribute.g.cs", "Source.Baz.Bar.g.cs"]);
    }

    #[test]
    fn test_failure_is_isolated() {
        let broken = MethodSymbol::new(MethodSignature::new("Broken", "string"))
            .within(Scope::ty(TypeKind::Class, "Baz"))
            .within(Scope::namespace("Nested"))
            .annotate(Annotation::new("TypeSource").arg(AnnotationArg::Type("Foo".into())));

        let compilation = Compilation::new()
            .with_type(foo())
            .with_method(broken)
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());

        let report = Generator::new(&compilation).generate();
        assert_eq!(report.work_items, 2);
        assert_eq!(report.error_count(), 1);
        assert!(report.units.get("Source.Baz.Bar.g.cs").is_some());
        assert!(report.units.get("Source.Baz.Nested.Broken.g.cs").is_none());

        let diag = &report.diagnostics[0];
        assert_eq!(diag.location.as_deref(), Some("Baz.Nested.Broken()"));
        assert!(diag.message.starts_with("MalformedScope was raised. Message: cannot declare"));
        assert!(!diag.message.contains('\n'));
    }

    #[test]
    fn test_duplicate_hint_name_is_reported() {
        let compilation = Compilation::new()
            .with_type(foo())
            .with_method(host("Bar", "Foo"))
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());

        let report = Generator::new(&compilation).generate();
        assert_eq!(report.units.len(), 1);
        assert_eq!(report.error_count(), 1);
        assert!(report.diagnostics[0].message.starts_with("DuplicateUnit was raised."));
    }

    #[test]
    fn test_discarded_markers_are_counted_silently() {
        let literal = MethodSymbol::new(MethodSignature::new("Literal", "string"))
            .within(Scope::ty(TypeKind::Class, "Baz"))
            .annotate(Annotation::new("TypeSource").arg(AnnotationArg::String("Foo".into())));

        let compilation = Compilation::new()
            .with_type(foo())
            .with_method(literal)
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());

        let report = Generator::new(&compilation).generate();
        assert_eq!(report.discarded, 1);
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.units.len(), 1);
    }

    #[test]
    fn test_quote_in_declaration_warns() {
        let quoted = TypeSymbol::new(TypeHeader::new(TypeKind::Class, "Foo"))
            .fragment("class Foo { string S = \"x\"; }");
        let compilation = Compilation::new()
            .with_type(quoted)
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());

        let report = Generator::new(&compilation).generate();
        assert_eq!(report.warning_count(), 1);
        assert!(!report.has_errors());
    }

    #[test]
    fn test_quote_warning_counts_fragments_once() {
        let quoted = TypeSymbol::new(TypeHeader::new(TypeKind::Class, "Foo"))
            .within(Scope::namespace("App"))
            .within(Scope::ty(TypeKind::Class, "Outer"))
            .fragment("class Foo { }")
            .fragment("partial class Foo { char C = '\"'; }");
        let compilation = Compilation::new()
            .with_type(quoted)
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());

        let report = Generator::new(&compilation).generate();
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.diagnostics[0].location.as_deref(), Some("Baz.Bar()"));

        let clean = Compilation::new()
            .with_type(
                TypeSymbol::new(TypeHeader::new(TypeKind::Class, "Foo"))
                    .within(Scope::namespace("App"))
                    .fragment("class Foo { }"),
            )
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());
        assert!(Generator::new(&clean).generate().diagnostics.is_empty());
    }

    #[test]
    fn test_target_inside_method_fails() {
        let local = TypeSymbol::new(TypeHeader::new(TypeKind::Class, "Foo"))
            .within(Scope::ty(TypeKind::Class, "Outer"))
            .within(Scope::Method(MethodSignature::new("Run", "void")))
            .fragment("class Foo { }");
        let compilation = Compilation::new()
            .with_type(local)
            .with_method(host("Bar", "Foo"))
            .with_options(bare_options());

        let report = Generator::new(&compilation).generate();
        assert_eq!(report.error_count(), 1);
        assert!(report.units.is_empty());
    }
}
