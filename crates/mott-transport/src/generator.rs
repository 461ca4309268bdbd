//! Primary-particle generation.

use mott_core::{EventId, PdgCode, StepPoint, Vec3};

use crate::transport::TrackSeed;

/// Produces the primary particle each event starts from.
///
/// Called once per event, before the first step. Implementations must
/// be deterministic for a given construction (seeded if they sample).
pub trait PrimaryGenerator: Send {
    /// Generator name for diagnostics.
    fn name(&self) -> &str;

    /// Produce the primary for `event`.
    fn generate(&mut self, event: EventId) -> TrackSeed;
}

/// A monoenergetic pencil beam along +z.
///
/// Every event gets an identical primary: an electron of the configured
/// energy starting on the beam axis at `start_z`, aimed straight down
/// the stack.
///
/// # Examples
///
/// ```
/// use mott_core::EventId;
/// use mott_transport::{PencilBeam, PrimaryGenerator};
///
/// let mut beam = PencilBeam::new(855.0, -400.0).unwrap();
/// let primary = beam.generate(EventId(0));
/// assert_eq!(primary.point.total_energy, 855.0);
/// assert_eq!(primary.point.position.z, -400.0);
/// ```
#[derive(Clone, Debug)]
pub struct PencilBeam {
    energy: f64,
    start_z: f64,
    pdg: PdgCode,
}

impl PencilBeam {
    /// Create a beam of electrons with the given total energy (MeV),
    /// starting at `start_z` (mm) on the axis.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the energy is not finite and positive.
    pub fn new(energy: f64, start_z: f64) -> Result<Self, String> {
        if !energy.is_finite() || energy <= 0.0 {
            return Err(format!(
                "beam energy must be finite and positive, got {energy}"
            ));
        }
        Ok(Self {
            energy,
            start_z,
            pdg: PdgCode::ELECTRON,
        })
    }

    /// Override the beam particle species (default: electron).
    pub fn with_particle(mut self, pdg: PdgCode) -> Self {
        self.pdg = pdg;
        self
    }

    /// Beam energy (MeV).
    pub fn energy(&self) -> f64 {
        self.energy
    }
}

impl PrimaryGenerator for PencilBeam {
    fn name(&self) -> &str {
        "pencil_beam"
    }

    fn generate(&mut self, _event: EventId) -> TrackSeed {
        TrackSeed {
            point: StepPoint {
                position: Vec3::new(0.0, 0.0, self.start_z),
                momentum: Vec3::new(0.0, 0.0, self.energy),
                total_energy: self.energy,
            },
            pdg: self.pdg,
        }
    }
}
