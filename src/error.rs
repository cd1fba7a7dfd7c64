use std::fmt;

use crate::diagnostic::{operand_note, Diagnostic};
use crate::span::Span;
use crate::types::{display_list, Ty};

/// Why a conversion could not be carried out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionError {
    /// No target type reaches every operand. `target` is set when a single
    /// target was requested.
    IncompatibleTypes { sources: Vec<Ty>, target: Option<Ty> },
    /// A struct literal left out a declared field.
    MissingField { struct_name: String, field: String },
    /// A struct literal named a field the struct does not declare.
    UnknownField { struct_name: String, field: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::IncompatibleTypes {
                sources,
                target: Some(target),
            } => write!(
                f,
                "cannot convert [{}] to {}",
                display_list(sources),
                target
            ),
            ConversionError::IncompatibleTypes {
                sources,
                target: None,
            } => write!(f, "no common type for [{}]", display_list(sources)),
            ConversionError::MissingField { struct_name, field } => {
                write!(f, "missing field '{}' in '{}' literal", field, struct_name)
            }
            ConversionError::UnknownField { struct_name, field } => {
                write!(f, "struct '{}' has no field '{}'", struct_name, field)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl ConversionError {
    pub(crate) fn incompatible(sources: Vec<Ty>, target: Option<Ty>) -> Self {
        ConversionError::IncompatibleTypes { sources, target }
    }

    pub fn to_diagnostic(&self, span: Span) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string(), span);
        match self {
            ConversionError::IncompatibleTypes { sources, target } => diag
                .with_note(operand_note(sources))
                .with_help("convert the operands explicitly to a shared type".to_string())
                .with_types(sources.clone(), target.clone()),
            ConversionError::MissingField { .. } => diag.with_help(
                "struct literals must provide every declared field".to_string(),
            ),
            ConversionError::UnknownField { .. } => diag,
        }
    }
}
