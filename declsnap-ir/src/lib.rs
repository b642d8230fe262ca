//! Symbol model for the declsnap declaration-to-literal generator.
//!
//! These types describe, as plain data, everything the generator needs from
//! the host compiler: the containing-scope chains of symbols, the raw
//! declaration fragments of types, and the annotations attached to methods.
//!
//! # Architecture
//!
//! ```text
//! declsnap.toml (TOML) → declsnap-manifest (parsing) → declsnap-ir (symbols) → codegen
//! ```

mod options;
mod scope;
mod symbol;

pub use options::{GeneratorOptions, IndentStyle, LiteralEscape, MarkerName};
pub use scope::{MethodSignature, Parameter, Scope, TypeHeader, TypeKind};
pub use symbol::{Annotation, AnnotationArg, Compilation, MethodSymbol, TypeSymbol};
