//! Run configuration, validation, and error types.
//!
//! [`RunConfig`] is the builder-input for a [`TransportRun`](crate::TransportRun).
//! [`validate()`](RunConfig::validate) checks every parameter before
//! any geometry is built or any store is created — no partial state is
//! ever exposed on a configuration error.

use std::error::Error;
use std::fmt;

use mott_geometry::{GeometryConfig, GeometryError};
use mott_record::{Histogram, StoreError};

/// Everything a run needs, validated up front.
///
/// # Examples
///
/// ```
/// use mott_engine::RunConfig;
///
/// let config = RunConfig::default();
/// assert!(config.validate().is_ok());
///
/// let bad = RunConfig { step_hint: 0.0, ..RunConfig::default() };
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Geometry layout and parameters.
    pub geometry: GeometryConfig,
    /// Material names the recorder watches.
    pub watched_materials: Vec<String>,
    /// Step-size hint in mm, forwarded to the transport engine
    /// unmodified.
    pub step_hint: f64,
    /// RNG seed, recorded in the store header and available to seeded
    /// transport/generator implementations.
    pub seed: u64,
    /// Number of events to simulate. Must be at least 1.
    pub events: u64,
    /// Upper bound on steps per track, guarding against a track that
    /// never leaves the world.
    pub max_steps_per_track: u32,
    /// Optional entry-energy summary histogram persisted in the store.
    pub energy_histogram: Option<Histogram>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            watched_materials: vec!["detectorMat".to_string(), "radiatorMat".to_string()],
            step_hint: 1.0,
            seed: 0,
            events: 1,
            max_steps_per_track: 10_000,
            energy_histogram: None,
        }
    }
}

impl RunConfig {
    /// Check structural invariants before anything is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.geometry.validate()?;
        if self.watched_materials.is_empty() {
            return Err(ConfigError::NoWatchedMaterials);
        }
        if !self.step_hint.is_finite() || self.step_hint <= 0.0 {
            return Err(ConfigError::InvalidStepHint {
                value: self.step_hint,
            });
        }
        if self.events == 0 {
            return Err(ConfigError::NoEvents);
        }
        if self.max_steps_per_track == 0 {
            return Err(ConfigError::ZeroMaxSteps);
        }
        Ok(())
    }
}

/// Errors detected during [`RunConfig::validate()`] or run setup.
#[derive(Debug)]
pub enum ConfigError {
    /// Geometry configuration or construction failed.
    Geometry(GeometryError),
    /// The diagnostic store could not be created.
    Store(StoreError),
    /// The step-size hint is not a positive, finite length.
    InvalidStepHint {
        /// The invalid value (mm).
        value: f64,
    },
    /// The run would simulate zero events.
    NoEvents,
    /// The per-track step bound is zero.
    ZeroMaxSteps,
    /// The recorder has no materials to watch.
    NoWatchedMaterials,
    /// A reconfiguration command arrived while an event was being
    /// stepped. Commands apply only between runs or at event
    /// boundaries.
    CommandDuringEvent,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(e) => write!(f, "geometry: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::InvalidStepHint { value } => {
                write!(f, "step hint must be positive and finite, got {value} mm")
            }
            Self::NoEvents => write!(f, "events must be at least 1"),
            Self::ZeroMaxSteps => write!(f, "max_steps_per_track must be at least 1"),
            Self::NoWatchedMaterials => {
                write!(f, "watched_materials must name at least one material")
            }
            Self::CommandDuringEvent => {
                write!(f, "commands apply only between runs or at event boundaries")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Geometry(e) => Some(e),
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeometryError> for ConfigError {
    fn from(e: GeometryError) -> Self {
        Self::Geometry(e)
    }
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
