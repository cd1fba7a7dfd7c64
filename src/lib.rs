//! Type resolution and implicit conversion for shader cross-compilation.
//!
//! Given the types of the operands of an expression, [`resolve_common`]
//! picks the cheapest common type and one [`ConversionAction`] per operand.
//! [`Converter`] applies those decisions to typed text [`Snippet`]s,
//! renders the casts, dereferences and references through an [`Emitter`],
//! and reports implicit casts as [`Diagnostic`]s.

pub mod access;
pub mod apply;
pub mod batch;
mod coerce;
pub mod config;
pub mod convert;
pub mod diagnostic;
pub mod emit;
pub mod error;
pub mod host;
pub mod literal;
pub mod snippet;
pub mod span;
pub mod types;

pub use access::{index_access, property_access};
pub use apply::Converter;
pub use batch::{parse_batch, resolve_batch, BatchLine};
pub use config::{ConversionOptions, ImplicitCastPolicy};
pub use convert::{
    conversion_cost, resolve_common, resolve_common_with, resolve_single, ConversionAction,
    ConversionPlan, ResolveOptions,
};
pub use diagnostic::{render_diagnostics, Diagnostic, Severity};
pub use emit::{Emitter, Wgsl};
pub use error::ConversionError;
pub use host::HostValue;
pub use literal::classify_literal;
pub use snippet::Snippet;
pub use span::Span;
pub use types::{Scalar, StructTy, Ty, TypeParseError};
