//! The [`TransportEngine`] trait and its step-outcome types.

use mott_core::{EventPhysicsState, PdgCode, ScatterSample, StepPoint, TransportError};
use smallvec::SmallVec;

use crate::context::StepContext;

/// What happened to the track over one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackStatus {
    /// The track continues; the driver will step it again.
    Alive,
    /// The track ran out of energy (or the engine otherwise ended it).
    Stopped,
    /// The track left the world volume.
    Escaped,
}

/// A particle ready to be tracked: the starting kinematic state and
/// species. Produced by primary generators and as secondaries by
/// transport engines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackSeed {
    /// Initial kinematic state.
    pub point: StepPoint,
    /// Particle species.
    pub pdg: PdgCode,
}

/// Result of one transport step.
#[derive(Clone, Debug, PartialEq)]
pub struct StepOutcome {
    /// Track state at the end of the step.
    pub post: StepPoint,
    /// The scattering this step produced, if any.
    ///
    /// Informational: the engine has already folded it into the shared
    /// state via `record_scatter`. The driver must not apply it again.
    pub scatter: Option<ScatterSample>,
    /// Whether the track survives this step.
    pub status: TrackStatus,
    /// Secondary particles created during the step, to be pushed onto
    /// the tracking stack.
    pub secondaries: SmallVec<[TrackSeed; 2]>,
}

impl StepOutcome {
    /// An outcome that just moves the track, with no scatter and no
    /// secondaries.
    pub fn advance(post: StepPoint, status: TrackStatus) -> Self {
        Self {
            post,
            scatter: None,
            status,
            secondaries: SmallVec::new(),
        }
    }
}

/// The external transport seam, called once per step by the driver.
///
/// # Contract
///
/// - The engine is the **only** writer of the asymmetry products and
///   scattering-geometry slots of [`EventPhysicsState`]; when a step
///   scatters it must call
///   [`record_scatter`](EventPhysicsState::record_scatter) before
///   returning, with the asymmetry in `[-1, 1]`.
/// - Control bits are read-only to the engine: bit 0 selects whether
///   the trajectory is altered from the accumulated asymmetry, bit 1
///   restricts azimuthal sampling to two dimensions.
/// - The step-size hint arrives through [`StepContext::step_hint`]
///   unmodified; the engine may use or ignore it.
/// - Identical inputs (context, state, internal seed) must produce
///   identical outcomes.
///
/// Object-safe: the driver stores `Box<dyn TransportEngine>`.
pub trait TransportEngine: Send {
    /// Engine name for error reporting and diagnostics.
    fn name(&self) -> &str;

    /// Advance the track by one step, folding any scattering into the
    /// shared state.
    fn transport(
        &mut self,
        ctx: &StepContext<'_>,
        state: &mut EventPhysicsState,
    ) -> Result<StepOutcome, TransportError>;
}
