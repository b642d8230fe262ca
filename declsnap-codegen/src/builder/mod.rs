//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - line buffer with an indentation cursor
//! - [`Indent`] - indentation configuration

mod code_builder;
mod indent;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
