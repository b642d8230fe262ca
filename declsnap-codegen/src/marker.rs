//! Source of the marker annotation itself.
//!
//! Projects reference the marker without shipping it; the generator emits its
//! declaration once per pass so the annotation always resolves.

use declsnap_ir::GeneratorOptions;

use crate::{
    builder::{CodeBuilder, Indent},
    registry::GeneratedUnit,
};

/// Render the marker declaration unit.
pub fn marker_unit(options: &GeneratorOptions) -> GeneratedUnit {
    let class_name = options.marker.class_name();
    let mut b = CodeBuilder::new(Indent::from(options.indent));

    if let Some(header) = &options.header {
        b.push_line(header);
    }
    if !options.marker.namespace.is_empty() {
        b.push_line(&format!("namespace {}", options.marker.namespace))
            .push_line("{")
            .push_indent();
    }

    b.push_line("[global::System.AttributeUsage(global::System.AttributeTargets.Method)]")
        .push_line(&format!(
            "internal sealed class {} : global::System.Attribute",
            class_name
        ))
        .push_line("{")
        .push_indent()
        .push_line(&format!(
            "public {}(global::System.Type type, global::System.Int32 depthLimit = -1)",
            class_name
        ))
        .push_line("{")
        .push_indent()
        .push_line("this.Type = type;")
        .push_line("this.DepthLimit = depthLimit;")
        .push_dedent()
        .push_line("}")
        .push_blank()
        .push_line("public global::System.Type Type { get; }")
        .push_line("public global::System.Int32 DepthLimit { get; }")
        .push_dedent()
        .push_line("}");

    if !options.marker.namespace.is_empty() {
        b.push_dedent().push_line("}");
    }

    GeneratedUnit::new(format!("{}.g.cs", class_name), b.build())
}

#[cfg(test)]
mod tests {
    use declsnap_ir::MarkerName;

    use super::*;

    #[test]
    fn test_marker_unit_defaults() {
        let unit = marker_unit(&GeneratorOptions::default());
        assert_eq!(unit.hint_name, "TypeSourceAttribute.g.cs");
        assert!(unit.content.starts_with("// <auto-generated/>\nnamespace DeclSnap\n{\n"));
        assert!(unit.content.contains(
            "    internal sealed class TypeSourceAttribute : global::System.Attribute\n"
        ));
        assert!(unit.content.contains("global::System.Int32 depthLimit = -1)"));
        assert!(unit.content.ends_with("    }\n}\n"));
    }

    #[test]
    fn test_marker_without_namespace() {
        let options = GeneratorOptions {
            marker: MarkerName::new("Snapshot", ""),
            header: None,
            ..GeneratorOptions::default()
        };
        let unit = marker_unit(&options);
        assert_eq!(unit.hint_name, "SnapshotAttribute.g.cs");
        assert!(unit.content.starts_with("[global::System.AttributeUsage"));
        assert!(unit.content.ends_with("DepthLimit { get; }\n}\n"));
    }
}
