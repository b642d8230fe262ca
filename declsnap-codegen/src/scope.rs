//! Nested scope emission with a shared indentation cursor.
//!
//! [`ScopeWriter::enter`] writes the opening headers of a containing chain and
//! hands back a [`ScopeGuard`]. Dropping the guard writes the matching
//! closers and puts the cursor back where it was, so a scope is closed on
//! every exit path, including early returns through `?`.
//!
//! The same machinery produces real declarations around a generated method
//! ([`ScopeMode::Code`]) and the synthetic wrapper text inside the string
//! literal ([`ScopeMode::Literal`]).

use std::ops::{Deref, DerefMut};

use declsnap_ir::{LiteralEscape, Scope};

use crate::{
    builder::{CodeBuilder, Indent},
    error::GenerateError,
    literal,
    resolve::DepthLimit,
    syntax,
};

/// Whether emitted lines are compiled code or content of the string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    Code,
    Literal,
}

/// Writes scope headers, closers and body lines for one emission session.
#[derive(Debug)]
pub struct ScopeWriter {
    builder: CodeBuilder,
    escape: LiteralEscape,
}

impl ScopeWriter {
    pub fn new(indent: Indent, escape: LiteralEscape) -> Self {
        Self {
            builder: CodeBuilder::new(indent),
            escape,
        }
    }

    /// Open the scopes of `chain` selected by `depth`.
    ///
    /// With a limit, only the scopes nearest the end of the chain are opened,
    /// still outermost first. The whole chain is validated before anything is
    /// written.
    pub fn enter(
        &mut self,
        chain: &[Scope],
        depth: DepthLimit,
        mode: ScopeMode,
    ) -> Result<ScopeGuard<'_>, GenerateError> {
        validate_chain(chain)?;

        let selected = &chain[chain.len() - depth.take(chain.len())..];
        let saved_level = self.builder.current_indent();

        for scope in selected {
            self.line(mode, &syntax::header(scope));
            self.line(mode, "{");
            self.builder.push_indent();
        }

        Ok(ScopeGuard {
            writer: self,
            opened: selected.len(),
            mode,
            saved_level,
        })
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, mode: ScopeMode, text: &str) -> &mut Self {
        match mode {
            ScopeMode::Code => self.builder.push_line(text),
            ScopeMode::Literal => self.builder.push_line(&literal::escape(text, self.escape)),
        };
        self
    }

    /// Write an empty line without indentation.
    pub fn blank(&mut self) -> &mut Self {
        self.builder.push_blank();
        self
    }

    /// Current nesting depth of the cursor.
    pub fn indent_level(&self) -> usize {
        self.builder.current_indent()
    }

    /// Move the cursor to an arbitrary nesting depth.
    pub fn set_indent_level(&mut self, level: usize) {
        self.builder.set_indent(level);
    }

    /// Consume the writer and return everything written.
    pub fn finish(self) -> String {
        self.builder.build()
    }
}

/// Open scopes of a [`ScopeWriter`]; closes them when dropped.
#[derive(Debug)]
pub struct ScopeGuard<'w> {
    writer: &'w mut ScopeWriter,
    opened: usize,
    mode: ScopeMode,
    saved_level: usize,
}

impl ScopeGuard<'_> {
    /// Number of scopes this guard opened.
    pub fn opened(&self) -> usize {
        self.opened
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = ScopeWriter;

    fn deref(&self) -> &ScopeWriter {
        self.writer
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut ScopeWriter {
        self.writer
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        for depth in (0..self.opened).rev() {
            self.writer.set_indent_level(self.saved_level + depth);
            self.writer.line(self.mode, "}");
        }
        self.writer.set_indent_level(self.saved_level);
    }
}

/// Check that a chain can be written as nested C# declarations.
pub fn validate_chain(chain: &[Scope]) -> Result<(), GenerateError> {
    let mut seen_type = false;
    for (index, scope) in chain.iter().enumerate() {
        if scope.name().trim().is_empty() {
            return Err(GenerateError::malformed(scope.name(), "scope has an empty name"));
        }
        match scope {
            Scope::Namespace { name } if seen_type => {
                return Err(GenerateError::malformed(
                    name.as_str(),
                    "a namespace cannot be nested inside a type",
                ));
            }
            Scope::Method(signature) if index + 1 != chain.len() => {
                return Err(GenerateError::malformed(
                    signature.name.as_str(),
                    "a method must be the innermost scope",
                ));
            }
            Scope::Method(signature) if !seen_type => {
                return Err(GenerateError::malformed(
                    signature.name.as_str(),
                    "a method must be declared inside a type",
                ));
            }
            Scope::Type(_) => seen_type = true,
            _ => {}
        }
    }
    Ok(())
}
