//! Escaping of text placed inside the verbatim string literal.

use std::borrow::Cow;

use declsnap_ir::LiteralEscape;

/// Apply the escape policy to one line of literal content.
pub fn escape(text: &str, policy: LiteralEscape) -> Cow<'_, str> {
    match policy {
        LiteralEscape::Verbatim => Cow::Borrowed(text),
        LiteralEscape::DoubleQuotes if text.contains('"') => Cow::Owned(text.replace('"', "\"\"")),
        LiteralEscape::DoubleQuotes => Cow::Borrowed(text),
    }
}

/// Whether `text` would end a verbatim literal early under `policy`.
pub fn breaks_literal(text: &str, policy: LiteralEscape) -> bool {
    policy == LiteralEscape::Verbatim && text.contains('"')
}
