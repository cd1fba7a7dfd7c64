//! Structural access: the type produced by `parent.name` and `parent[i]`.
//!
//! Pure lookups. Index values are never checked here; bounds are the
//! target language's runtime concern.

use crate::types::Ty;

const SWIZZLE_SETS: [&str; 2] = ["xyzw", "rgba"];

/// Type of `parent.name`: a struct field or a vector swizzle.
/// Anything else is `Unknown`.
pub fn property_access(parent: &Ty, name: &str) -> Ty {
    match parent {
        Ty::Struct(s) => s.field(name).cloned().unwrap_or(Ty::Unknown),
        Ty::Vector { size, element } => match swizzle_len(name, *size) {
            Some(1) => Ty::scalar(*element),
            Some(n) => Ty::vec(n, *element),
            None => Ty::Unknown,
        },
        _ => Ty::Unknown,
    }
}

/// Number of components in a valid swizzle mask for a vector of `size`.
/// A mask draws from one name set and only names existing components.
fn swizzle_len(mask: &str, size: u8) -> Option<u8> {
    if mask.is_empty() || mask.len() > 4 {
        return None;
    }
    SWIZZLE_SETS.iter().find_map(|set| {
        let in_range = mask
            .chars()
            .all(|ch| set.find(ch).is_some_and(|i| i < size as usize));
        in_range.then_some(mask.len() as u8)
    })
}

/// Type of `parent[index]`: array element, vector component, or matrix
/// column. Anything else is `Unknown`.
pub fn index_access(parent: &Ty) -> Ty {
    match parent {
        Ty::Array { element, .. } => (**element).clone(),
        Ty::Vector { element, .. } => Ty::scalar(*element),
        Ty::Matrix { rows, element, .. } => Ty::vec(*rows, *element),
        _ => Ty::Unknown,
    }
}
