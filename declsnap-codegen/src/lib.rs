//! Declaration-to-literal generation engine.
//!
//! For every method carrying the marker annotation, the generator emits a
//! partial method body that returns the normalized source of the referenced
//! type as a verbatim string literal.
//!
//! # Module Organization
//!
//! - [`builder`] - line buffer and indentation primitives
//! - [`resolve`] - marker annotations to [`WorkItem`]s
//! - [`normalize`] - de-indentation of declaration fragments
//! - [`scope`] - nested scope headers around code or literal text
//! - [`Generator`] - one [`GeneratedUnit`] per work item

pub mod builder;
mod diagnostic;
mod error;
mod generator;
mod literal;
mod marker;
pub mod normalize;
mod registry;
pub mod resolve;
pub mod scope;
mod syntax;

pub use diagnostic::{Diagnostic, Severity};
pub use error::GenerateError;
pub use generator::{GenerationReport, Generator};
pub use literal::{breaks_literal, escape};
pub use marker::marker_unit;
pub use normalize::{NormalizedFragment, normalize};
pub use registry::{GeneratedUnit, UnitRegistry, WriteStats};
pub use resolve::{DepthLimit, WorkItem, WorkItemSummary, resolve, resolve_all};
pub use scope::{ScopeGuard, ScopeMode, ScopeWriter};
pub use syntax::header;
