//! Error types for geometry construction.

use std::fmt;

/// Errors arising from geometry configuration or construction.
///
/// Validation happens before any tree is built; a builder never returns
/// a partially-constructed hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The stacked-detector unit count is below the minimum of 1.
    InvalidUnitCount {
        /// The configured count that was too small.
        configured: u32,
    },
    /// The radiator thickness is not a positive, finite length.
    InvalidThickness {
        /// The invalid value (mm).
        value: f64,
    },
    /// Two sibling volumes intersect (optional post-build check).
    Overlap {
        /// Name of the first offending volume.
        first: String,
        /// Name of the second offending volume.
        second: String,
    },
    /// A builder referenced a material the registry does not define.
    UnknownMaterial {
        /// The missing material name.
        name: String,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUnitCount { configured } => {
                write!(f, "unit count {configured} is below the minimum of 1")
            }
            Self::InvalidThickness { value } => {
                write!(
                    f,
                    "radiator thickness must be positive and finite, got {value} mm"
                )
            }
            Self::Overlap { first, second } => {
                write!(f, "volumes '{first}' and '{second}' overlap")
            }
            Self::UnknownMaterial { name } => {
                write!(f, "material '{name}' is not defined in the registry")
            }
        }
    }
}

impl std::error::Error for GeometryError {}
