//! Type-name parsing: `f32`, `vec3f`, `vec2<bool>`, `mat3x2h`, `ptr<i32>`,
//! `array<f32, 4>`, `abstract-int`.

use std::fmt;
use std::str::FromStr;

use super::{Scalar, Ty};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParseError {
    pub input: String,
}

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized type name '{}'", self.input)
    }
}

impl std::error::Error for TypeParseError {}

impl FromStr for Scalar {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "f32" => Ok(Scalar::F32),
            "f16" => Ok(Scalar::F16),
            "i32" => Ok(Scalar::I32),
            "u32" => Ok(Scalar::U32),
            "bool" => Ok(Scalar::Bool),
            other => Err(TypeParseError {
                input: other.to_string(),
            }),
        }
    }
}

impl FromStr for Ty {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || TypeParseError {
            input: s.to_string(),
        };
        let ty = parse_ty(s).ok_or_else(err)?;
        if ty.is_unknown() {
            return Err(err());
        }
        Ok(ty)
    }
}

fn parse_ty(s: &str) -> Option<Ty> {
    let s = s.trim();
    match s {
        "abstract-int" | "abstractInt" => return Some(Ty::AbstractInt),
        "abstract-float" | "abstractFloat" => return Some(Ty::AbstractFloat),
        _ => {}
    }
    if let Ok(scalar) = s.parse::<Scalar>() {
        return Some(Ty::scalar(scalar));
    }
    if let Some(inner) = generic_args(s, "ptr") {
        let referent = parse_ty(inner)?;
        return known(Ty::ptr(referent));
    }
    if let Some(inner) = generic_args(s, "array") {
        return parse_array(inner);
    }
    if let Some(rest) = s.strip_prefix("vec") {
        let (size, element) = parse_shape_tail(rest)?;
        return known(Ty::vec(size, element));
    }
    if let Some(rest) = s.strip_prefix("mat") {
        let (cols, rest) = split_digit(rest)?;
        let rest = rest.strip_prefix('x')?;
        let (rows, element) = parse_shape_tail(rest)?;
        return known(Ty::mat(cols, rows, element));
    }
    None
}

fn known(ty: Ty) -> Option<Ty> {
    (!ty.is_unknown()).then_some(ty)
}

/// `"ptr<f32>"` with prefix `"ptr"` yields `"f32"`.
fn generic_args<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    s.strip_prefix(prefix)?
        .trim_start()
        .strip_prefix('<')?
        .strip_suffix('>')
}

/// Parses the tail after `vec`/`matCx`: a digit then either a shorthand
/// suffix (`3f`) or a generic element (`3<f32>`).
fn parse_shape_tail(rest: &str) -> Option<(u8, Scalar)> {
    let (size, rest) = split_digit(rest)?;
    let element = if let Some(inner) = rest.strip_prefix('<') {
        inner.strip_suffix('>')?.parse::<Scalar>().ok()?
    } else {
        let mut chars = rest.chars();
        let suffix = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Scalar::from_suffix(suffix)?
    };
    Some((size, element))
}

fn split_digit(s: &str) -> Option<(u8, &str)> {
    let first = s.chars().next()?;
    let digit = first.to_digit(10)? as u8;
    Some((digit, &s[1..]))
}

fn parse_array(inner: &str) -> Option<Ty> {
    // Split on the last comma outside nested angle brackets.
    let mut depth = 0i32;
    let mut split_at = None;
    for (i, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth -= 1,
            ',' if depth == 0 => split_at = Some(i),
            _ => {}
        }
    }
    match split_at {
        Some(i) => {
            let element = parse_ty(inner[..i].trim())?;
            let length = inner[i + 1..].trim().parse::<u32>().ok()?;
            Some(Ty::array(element, Some(length)))
        }
        None => Some(Ty::array(parse_ty(inner.trim())?, None)),
    }
}
