//! The per-step view handed to a transport engine.

use mott_core::{EventId, Material, StepPoint, TrackId};

/// Borrowed context for one transport step.
///
/// Carries everything the engine may read: the material the track
/// currently occupies, the pre-step kinematic state, the step-size hint
/// (forwarded unmodified from configuration), and the event/track
/// identifiers for diagnostics.
pub struct StepContext<'a> {
    material: &'a Material,
    pre: StepPoint,
    step_hint: f64,
    event: EventId,
    track: TrackId,
}

impl<'a> StepContext<'a> {
    /// Assemble the context for one step.
    pub fn new(
        material: &'a Material,
        pre: StepPoint,
        step_hint: f64,
        event: EventId,
        track: TrackId,
    ) -> Self {
        Self {
            material,
            pre,
            step_hint,
            event,
            track,
        }
    }

    /// The material the track currently occupies.
    pub fn material(&self) -> &Material {
        self.material
    }

    /// Track state at the start of the step.
    pub fn pre(&self) -> StepPoint {
        self.pre
    }

    /// Step-size hint in mm, forwarded unmodified from configuration.
    pub fn step_hint(&self) -> f64 {
        self.step_hint
    }

    /// The event being simulated.
    pub fn event(&self) -> EventId {
        self.event
    }

    /// The track being stepped.
    pub fn track(&self) -> TrackId {
        self.track
    }
}
