//! Geometry configuration and validation.

use crate::error::GeometryError;

/// Which of the four selectable layouts to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeometryVariant {
    /// Two identical lead blocks with a fixed gap.
    TwoSlab,
    /// The fixed multi-layer experimental layout; materials and
    /// thicknesses are hard-coded per layer, first layer nearest the
    /// beam origin.
    ReferenceStack,
    /// One radiator plus one sensitive volume; radiator thickness comes
    /// from configuration.
    MinimalDetector,
    /// `unit_count` radiator/detector pairs stacked along the beam axis
    /// with uniform spacing.
    StackedDetector,
}

/// Parameters selected at construction time.
///
/// Radiator thickness and unit count may be mutated later through
/// [`GeometryModel`](crate::GeometryModel), which rebuilds the tree
/// from scratch; that is the only supported runtime reconfiguration.
///
/// # Examples
///
/// ```
/// use mott_geometry::{GeometryConfig, GeometryVariant};
///
/// let config = GeometryConfig {
///     variant: GeometryVariant::StackedDetector,
///     unit_count: 3,
///     radiator_thickness: 2.0,
///     ..GeometryConfig::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let bad = GeometryConfig { radiator_thickness: -1.0, ..config };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryConfig {
    /// Layout selector.
    pub variant: GeometryVariant,
    /// Number of radiator/detector units for the stacked variant. Must
    /// be at least 1.
    pub unit_count: u32,
    /// Radiator thickness in mm. Must be positive and finite.
    pub radiator_thickness: f64,
    /// Run the post-build sibling-overlap check.
    pub check_overlaps: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            variant: GeometryVariant::MinimalDetector,
            unit_count: 1,
            radiator_thickness: 3.2,
            check_overlaps: true,
        }
    }
}

impl GeometryConfig {
    /// Check every parameter before anything is built.
    ///
    /// The caller must reject an invalid configuration (or surface the
    /// failure) without invoking a builder, so no malformed tree is
    /// ever produced.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.unit_count < 1 {
            return Err(GeometryError::InvalidUnitCount {
                configured: self.unit_count,
            });
        }
        if !self.radiator_thickness.is_finite() || self.radiator_thickness <= 0.0 {
            return Err(GeometryError::InvalidThickness {
                value: self.radiator_thickness,
            });
        }
        Ok(())
    }
}
