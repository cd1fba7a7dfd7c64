//! The type lattice: the closed set of type shapes the conversion engine
//! reasons about, plus the conversion rank table.

mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use parse::TypeParseError;

/// A fixed-width scalar type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    F32,
    F16,
    I32,
    U32,
    Bool,
}

/// Conversion rank per scalar, indexed by `Scalar as usize`.
/// Lower rank is the more preferred unification target; `Bool` has none.
const CONVERSION_RANK: [Option<u8>; 5] = [Some(0), Some(1), Some(2), Some(3), None];

impl Scalar {
    /// Numeric scalars in rank order.
    pub const NUMERIC: [Scalar; 4] = [Scalar::F32, Scalar::F16, Scalar::I32, Scalar::U32];

    pub fn rank(self) -> Option<u8> {
        CONVERSION_RANK[self as usize]
    }

    pub fn is_numeric(self) -> bool {
        self.rank().is_some()
    }

    pub fn is_float(self) -> bool {
        matches!(self, Scalar::F32 | Scalar::F16)
    }

    pub fn name(self) -> &'static str {
        match self {
            Scalar::F32 => "f32",
            Scalar::F16 => "f16",
            Scalar::I32 => "i32",
            Scalar::U32 => "u32",
            Scalar::Bool => "bool",
        }
    }

    /// Shorthand suffix used by `vec3f`, `mat2x2h` and friends.
    pub(crate) fn suffix(self) -> Option<char> {
        match self {
            Scalar::F32 => Some('f'),
            Scalar::F16 => Some('h'),
            Scalar::I32 => Some('i'),
            Scalar::U32 => Some('u'),
            Scalar::Bool => None,
        }
    }

    pub(crate) fn from_suffix(ch: char) -> Option<Scalar> {
        match ch {
            'f' => Some(Scalar::F32),
            'h' => Some(Scalar::F16),
            'i' => Some(Scalar::I32),
            'u' => Some(Scalar::U32),
            _ => None,
        }
    }
}

/// A struct type with an ordered field list. Field names are unique.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTy {
    pub name: String,
    pub fields: Vec<(String, Ty)>,
}

impl StructTy {
    /// Build a struct type. Returns `None` if two fields share a name.
    pub fn new(name: impl Into<String>, fields: Vec<(String, Ty)>) -> Option<Self> {
        for (i, (field, _)) in fields.iter().enumerate() {
            if fields[..i].iter().any(|(other, _)| other == field) {
                return None;
            }
        }
        Some(Self {
            name: name.into(),
            fields,
        })
    }

    pub fn field(&self, name: &str) -> Option<&Ty> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, ty)| ty)
    }
}

/// Semantic types seen by the conversion engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ty {
    /// Integer literal not yet bound to a concrete width.
    AbstractInt,
    /// Float literal not yet bound to a concrete width.
    AbstractFloat,
    Scalar { scalar: Scalar },
    Vector { size: u8, element: Scalar },
    /// Column-major matrix; `cols` vectors of `rows` float components.
    Matrix { cols: u8, rows: u8, element: Scalar },
    /// Pointer of depth one. Build with [`Ty::ptr`].
    Pointer { referent: Box<Ty> },
    Array { element: Box<Ty>, length: Option<u32> },
    Struct(StructTy),
    /// A value whose type could not be determined.
    Unknown,
}

impl Ty {
    pub const F32: Ty = Ty::Scalar { scalar: Scalar::F32 };
    pub const F16: Ty = Ty::Scalar { scalar: Scalar::F16 };
    pub const I32: Ty = Ty::Scalar { scalar: Scalar::I32 };
    pub const U32: Ty = Ty::Scalar { scalar: Scalar::U32 };
    pub const BOOL: Ty = Ty::Scalar { scalar: Scalar::Bool };

    pub fn scalar(scalar: Scalar) -> Ty {
        Ty::Scalar { scalar }
    }

    /// Vector of 2, 3 or 4 components; any other size is `Unknown`.
    pub fn vec(size: u8, element: Scalar) -> Ty {
        if (2..=4).contains(&size) {
            Ty::Vector { size, element }
        } else {
            Ty::Unknown
        }
    }

    /// Float matrix with 2..=4 columns and rows; anything else is `Unknown`.
    pub fn mat(cols: u8, rows: u8, element: Scalar) -> Ty {
        if (2..=4).contains(&cols) && (2..=4).contains(&rows) && element.is_float() {
            Ty::Matrix {
                cols,
                rows,
                element,
            }
        } else {
            Ty::Unknown
        }
    }

    /// Pointer to `referent`. Pointers to pointers and pointers to unknown
    /// or abstract values do not exist and come back as `Unknown`.
    pub fn ptr(referent: Ty) -> Ty {
        match referent {
            Ty::Pointer { .. } | Ty::Unknown | Ty::AbstractInt | Ty::AbstractFloat => Ty::Unknown,
            other => Ty::Pointer {
                referent: Box::new(other),
            },
        }
    }

    pub fn array(element: Ty, length: Option<u32>) -> Ty {
        Ty::Array {
            element: Box::new(element),
            length,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Ty::Scalar { scalar } => Some(*scalar),
            _ => None,
        }
    }

    /// Conversion rank of a numeric concrete scalar.
    pub fn rank(&self) -> Option<u8> {
        self.as_scalar().and_then(Scalar::rank)
    }

    pub fn referent(&self) -> Option<&Ty> {
        match self {
            Ty::Pointer { referent } => Some(referent),
            _ => None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, Ty::AbstractInt | Ty::AbstractFloat)
    }

    pub fn is_concrete_numeric(&self) -> bool {
        self.rank().is_some()
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Ty::Pointer { .. })
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Ty::Vector { .. } | Ty::Matrix { .. } | Ty::Array { .. } | Ty::Struct(_)
        )
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Ty::Unknown)
    }

    /// Neither abstract nor unknown.
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract() && !self.is_unknown()
    }

    /// Lattice identity. Unlike `==`, an `Unknown` never matches anything,
    /// not even another `Unknown`.
    pub fn matches(&self, other: &Ty) -> bool {
        !self.is_unknown() && !other.is_unknown() && self == other
    }

    /// Whether an abstract type binds to `target` for free. Integer
    /// literals also widen to abstract floats at no cost.
    pub fn absorbs_into(&self, target: &Ty) -> bool {
        match (self, target) {
            (Ty::AbstractInt, Ty::AbstractFloat) => true,
            (Ty::AbstractInt, Ty::Scalar { scalar }) => scalar.is_numeric(),
            (Ty::AbstractFloat, Ty::Scalar { scalar }) => scalar.is_float(),
            _ => false,
        }
    }

    /// The default concrete type of an abstract literal type.
    pub fn concretize(&self) -> Ty {
        match self {
            Ty::AbstractInt => Ty::I32,
            Ty::AbstractFloat => Ty::F32,
            other => other.clone(),
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::AbstractInt => write!(f, "abstract-int"),
            Ty::AbstractFloat => write!(f, "abstract-float"),
            Ty::Scalar { scalar } => write!(f, "{}", scalar.name()),
            Ty::Vector { size, element } => match element.suffix() {
                Some(suffix) => write!(f, "vec{}{}", size, suffix),
                None => write!(f, "vec{}<{}>", size, element.name()),
            },
            Ty::Matrix {
                cols,
                rows,
                element,
            } => match element.suffix() {
                Some(suffix) => write!(f, "mat{}x{}{}", cols, rows, suffix),
                None => write!(f, "mat{}x{}<{}>", cols, rows, element.name()),
            },
            Ty::Pointer { referent } => write!(f, "ptr<{}>", referent),
            Ty::Array {
                element,
                length: Some(n),
            } => write!(f, "array<{}, {}>", element, n),
            Ty::Array {
                element,
                length: None,
            } => write!(f, "array<{}>", element),
            Ty::Struct(s) => write!(f, "{}", s.name),
            Ty::Unknown => write!(f, "unknown"),
        }
    }
}

/// Comma-separated list of type names, in order.
pub fn display_list(tys: &[Ty]) -> String {
    let parts: Vec<String> = tys.iter().map(|t| t.to_string()).collect();
    parts.join(", ")
}
