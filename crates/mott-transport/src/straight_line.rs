//! Straight-line reference transport: advance and lose energy, never
//! scatter.
//!
//! Useful for geometry-traversal tests and as the simplest possible
//! conforming [`TransportEngine`]: it honours the step hint, applies a
//! density-proportional energy loss, and leaves the shared state
//! untouched (no scattering means no asymmetry to fold in).

use mott_core::{EventPhysicsState, StepPoint, TransportError};

use crate::context::StepContext;
use crate::transport::{StepOutcome, TrackStatus, TransportEngine};

/// Nominal minimum-ionizing energy loss per unit density and path
/// length, in MeV / (mm · g/cm³). Chosen so lead loses ~1.25 MeV/mm.
const LOSS_PER_DENSITY_MM: f64 = 0.11;

/// Tracks below this total energy are stopped (MeV).
const TRACKING_CUTOFF: f64 = 1.0;

/// A transport engine that moves the track along its momentum
/// direction in step-hint increments with density-proportional energy
/// loss. It never scatters and never creates secondaries.
///
/// # Examples
///
/// ```
/// use mott_core::{EventId, EventPhysicsState, Material, StepPoint, TrackId, Vec3};
/// use mott_transport::{StepContext, StraightLineTransport, TransportEngine};
///
/// let vacuum = Material::element("Vacuum", "H", 1.0e-25);
/// let pre = StepPoint {
///     position: Vec3::ZERO,
///     momentum: Vec3::new(0.0, 0.0, 100.0),
///     total_energy: 100.0,
/// };
/// let ctx = StepContext::new(&vacuum, pre, 1.0, EventId(0), TrackId::PRIMARY);
/// let mut state = EventPhysicsState::new();
///
/// let mut engine = StraightLineTransport::new();
/// let outcome = engine.transport(&ctx, &mut state).unwrap();
/// assert_eq!(outcome.post.position.z, 1.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StraightLineTransport;

impl StraightLineTransport {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn advance_point(
        pre: &StepPoint,
        length: f64,
        density: f64,
    ) -> (StepPoint, TrackStatus) {
        let direction = pre.momentum.normalized();
        let energy = (pre.total_energy - LOSS_PER_DENSITY_MM * density * length).max(0.0);
        let post = StepPoint {
            position: pre.position + direction * length,
            // Ultra-relativistic: |p| tracks the total energy.
            momentum: direction * energy,
            total_energy: energy,
        };
        let status = if energy <= TRACKING_CUTOFF {
            TrackStatus::Stopped
        } else {
            TrackStatus::Alive
        };
        (post, status)
    }
}

impl TransportEngine for StraightLineTransport {
    fn name(&self) -> &str {
        "straight_line"
    }

    fn transport(
        &mut self,
        ctx: &StepContext<'_>,
        _state: &mut EventPhysicsState,
    ) -> Result<StepOutcome, TransportError> {
        let pre = ctx.pre();
        if pre.momentum.norm() == 0.0 {
            return Err(TransportError::ExecutionFailed {
                reason: "pre-step momentum is zero, no direction to advance".to_string(),
            });
        }
        let (post, status) =
            Self::advance_point(&pre, ctx.step_hint(), ctx.material().density());
        if !post.position.is_finite() || !post.total_energy.is_finite() {
            return Err(TransportError::NonFiniteSample {
                quantity: "post-step kinematics",
            });
        }
        Ok(StepOutcome::advance(post, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mott_core::{EventId, Material, TrackId, Vec3, UNSET_SENTINEL};

    fn point(energy: f64) -> StepPoint {
        StepPoint {
            position: Vec3::ZERO,
            momentum: Vec3::new(0.0, 0.0, energy),
            total_energy: energy,
        }
    }

    fn step(material: &Material, pre: StepPoint, hint: f64) -> StepOutcome {
        let ctx = StepContext::new(material, pre, hint, EventId(0), TrackId::PRIMARY);
        let mut state = EventPhysicsState::new();
        let mut engine = StraightLineTransport::new();
        let outcome = engine.transport(&ctx, &mut state).unwrap();
        // Never touches the shared state.
        assert_eq!(state.asym_plus(), UNSET_SENTINEL);
        outcome
    }

    #[test]
    fn advances_along_momentum_direction() {
        let vacuum = Material::element("Vacuum", "H", 1.0e-25);
        let outcome = step(&vacuum, point(100.0), 2.5);
        assert_eq!(outcome.post.position, Vec3::new(0.0, 0.0, 2.5));
        assert_eq!(outcome.status, TrackStatus::Alive);
        assert!(outcome.scatter.is_none());
    }

    #[test]
    fn dense_material_drains_energy() {
        let lead = Material::element("PBA", "Pb", 11.35);
        let outcome = step(&lead, point(100.0), 1.0);
        let expected = 100.0 - LOSS_PER_DENSITY_MM * 11.35;
        assert!((outcome.post.total_energy - expected).abs() < 1e-12);
    }

    #[test]
    fn exhausted_track_is_stopped() {
        let lead = Material::element("PBA", "Pb", 11.35);
        let outcome = step(&lead, point(2.0), 10.0);
        assert_eq!(outcome.status, TrackStatus::Stopped);
        assert_eq!(outcome.post.total_energy, 0.0);
    }

    #[test]
    fn zero_momentum_is_an_error() {
        let vacuum = Material::element("Vacuum", "H", 1.0e-25);
        let pre = StepPoint {
            position: Vec3::ZERO,
            momentum: Vec3::ZERO,
            total_energy: 1.0,
        };
        let ctx = StepContext::new(&vacuum, pre, 1.0, EventId(0), TrackId::PRIMARY);
        let mut state = EventPhysicsState::new();
        let mut engine = StraightLineTransport::new();
        assert!(engine.transport(&ctx, &mut state).is_err());
    }
}
