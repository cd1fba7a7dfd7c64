use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Ty;

/// One operand on its way through conversion: target-language text plus
/// its type. For unbound literals `text` is the literal value itself.
///
/// Snippets are plain values; every conversion produces a new one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snippet {
    pub text: String,
    pub ty: Ty,
}

impl Snippet {
    pub fn new(text: impl Into<String>, ty: Ty) -> Self {
        Self {
            text: text.into(),
            ty,
        }
    }

    /// A snippet whose type could not be determined. `text` keeps the
    /// original value for diagnostics.
    pub fn unknown(text: impl Into<String>) -> Self {
        Self::new(text, Ty::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        self.ty.is_unknown()
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.text, self.ty)
    }
}

/// Text of each snippet, comma separated.
pub fn join_text(snippets: &[Snippet]) -> String {
    let parts: Vec<&str> = snippets.iter().map(|s| s.text.as_str()).collect();
    parts.join(", ")
}

/// Types of each snippet, in order.
pub fn types_of(snippets: &[Snippet]) -> Vec<Ty> {
    snippets.iter().map(|s| s.ty.clone()).collect()
}
