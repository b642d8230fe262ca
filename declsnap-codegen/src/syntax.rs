//! C# declaration headers for containing scopes.

use declsnap_ir::{MethodSignature, Scope, TypeHeader};

/// Render the header line that opens `scope`.
pub fn header(scope: &Scope) -> String {
    match scope {
        Scope::Namespace { name } => format!("namespace {}", name),
        Scope::Type(header) => type_header(header),
        Scope::Method(signature) => method_header(signature),
    }
}

fn type_header(header: &TypeHeader) -> String {
    let mut out = modifiers(&header.modifiers);
    out.push_str("partial ");
    out.push_str(header.kind.keyword());
    out.push(' ');
    out.push_str(&header.name);
    out.push_str(&type_parameters(&header.type_parameters));
    out
}

fn method_header(signature: &MethodSignature) -> String {
    let params = signature
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{}partial {} {}{}({})",
        modifiers(&signature.modifiers),
        signature.return_type,
        signature.name,
        type_parameters(&signature.type_parameters),
        params
    )
}

/// Modifiers followed by a space, with `partial` left out since it is always
/// written right before the declaration keyword.
fn modifiers(modifiers: &[String]) -> String {
    modifiers
        .iter()
        .filter(|m| m.as_str() != "partial")
        .map(|m| format!("{} ", m))
        .collect()
}

fn type_parameters(params: &[String]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        format!("<{}>", params.join(", "))
    }
}
