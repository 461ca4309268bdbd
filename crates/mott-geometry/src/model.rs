//! The held geometry tree and its atomic rebuild discipline.

use mott_core::MaterialRegistry;

use crate::builder::build_geometry;
use crate::config::GeometryConfig;
use crate::error::GeometryError;
use crate::volume::Volume;

/// The geometry a run holds while events are processed.
///
/// Reconfiguration never mutates the live tree: a candidate
/// configuration is validated, a fresh tree is built from it, and only
/// then are both swapped in. On any error the previous configuration
/// and tree remain untouched. Callers must not hold references to the
/// old tree across a rebuild.
///
/// # Examples
///
/// ```
/// use mott_core::MaterialRegistry;
/// use mott_geometry::{GeometryConfig, GeometryModel, GeometryVariant};
///
/// let config = GeometryConfig {
///     variant: GeometryVariant::StackedDetector,
///     unit_count: 2,
///     ..GeometryConfig::default()
/// };
/// let mut model = GeometryModel::new(config, MaterialRegistry::reference()).unwrap();
/// assert_eq!(model.root().node_count(), 5);
///
/// model.set_unit_count(3).unwrap();
/// assert_eq!(model.root().node_count(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct GeometryModel {
    config: GeometryConfig,
    materials: MaterialRegistry,
    root: Volume,
}

impl GeometryModel {
    /// Build the initial tree from `config`.
    pub fn new(
        config: GeometryConfig,
        materials: MaterialRegistry,
    ) -> Result<Self, GeometryError> {
        let root = build_geometry(&config, &materials)?;
        Ok(Self {
            config,
            materials,
            root,
        })
    }

    /// The current world volume.
    pub fn root(&self) -> &Volume {
        &self.root
    }

    /// The configuration the current tree was built from.
    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    /// The material registry the builders resolve names against.
    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    /// Change the radiator thickness and rebuild.
    pub fn set_radiator_thickness(&mut self, thickness: f64) -> Result<(), GeometryError> {
        self.reconfigure(GeometryConfig {
            radiator_thickness: thickness,
            ..self.config
        })
    }

    /// Change the stacked-detector unit count and rebuild.
    pub fn set_unit_count(&mut self, unit_count: u32) -> Result<(), GeometryError> {
        self.reconfigure(GeometryConfig {
            unit_count,
            ..self.config
        })
    }

    /// Rebuild from the currently held configuration.
    ///
    /// Produces a tree geometrically identical to the held one; useful
    /// after replacing materials.
    pub fn rebuild(&mut self) -> Result<(), GeometryError> {
        self.reconfigure(self.config)
    }

    fn reconfigure(&mut self, candidate: GeometryConfig) -> Result<(), GeometryError> {
        let root = build_geometry(&candidate, &self.materials)?;
        self.config = candidate;
        self.root = root;
        Ok(())
    }
}
