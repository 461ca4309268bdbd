//! Test utilities and scripted mocks for Mott development.
//!
//! Provides a [`ScriptedTransport`] that plays back a fixed sequence of
//! per-step outcomes (for exact assertions on asymmetry products and
//! recorded rows) and a [`FixedBeam`] generator that fires an identical
//! primary every event.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::VecDeque;

use mott_core::{EventPhysicsState, PdgCode, ScatterSample, StepPoint, TransportError, Vec3};
use mott_transport::{
    PrimaryGenerator, StepContext, StepOutcome, TrackSeed, TrackStatus, TransportEngine,
};

/// One scripted step: the asymmetry to fold into the shared state (if
/// any) and the track status to report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScriptedStep {
    pub asymmetry: Option<f64>,
    pub status: TrackStatus,
}

impl ScriptedStep {
    /// Scatter with asymmetry `a`, track continues.
    pub fn scatter(a: f64) -> Self {
        Self {
            asymmetry: Some(a),
            status: TrackStatus::Alive,
        }
    }

    /// Scatter with asymmetry `a`, then the track stops.
    pub fn last_scatter(a: f64) -> Self {
        Self {
            asymmetry: Some(a),
            status: TrackStatus::Stopped,
        }
    }

    /// Pure drift, track continues.
    pub fn drift() -> Self {
        Self {
            asymmetry: None,
            status: TrackStatus::Alive,
        }
    }

    /// Pure drift, then the track stops.
    pub fn stop() -> Self {
        Self {
            asymmetry: None,
            status: TrackStatus::Stopped,
        }
    }
}

/// A transport engine that advances the track by the step hint and
/// plays back a fixed script of outcomes.
///
/// Once the script is exhausted every further step is a drift that
/// stops the track, so tests control exactly how many steps run.
pub struct ScriptedTransport {
    script: VecDeque<ScriptedStep>,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = ScriptedStep>) -> Self {
        Self {
            script: steps.into_iter().collect(),
        }
    }

    /// Steps remaining in the script.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl TransportEngine for ScriptedTransport {
    fn name(&self) -> &str {
        "scripted"
    }

    fn transport(
        &mut self,
        ctx: &StepContext<'_>,
        state: &mut EventPhysicsState,
    ) -> Result<StepOutcome, TransportError> {
        let pre = ctx.pre();
        let direction = pre.momentum.normalized();
        let post = StepPoint {
            position: pre.position + direction * ctx.step_hint(),
            momentum: pre.momentum,
            total_energy: pre.total_energy,
        };

        let Some(scripted) = self.script.pop_front() else {
            return Ok(StepOutcome::advance(post, TrackStatus::Stopped));
        };

        let mut outcome = StepOutcome::advance(post, scripted.status);
        if let Some(asymmetry) = scripted.asymmetry {
            let sample = ScatterSample {
                asymmetry,
                cos_theta: 1.0,
                phi: 0.0,
                polarization_phi: 0.0,
                lab_phi: 0.0,
                analyzing_power: asymmetry.abs(),
            };
            state.record_scatter(&sample);
            outcome.scatter = Some(sample);
        }
        Ok(outcome)
    }
}

/// A generator that fires an identical primary every event: an electron
/// aimed along +z from a fixed position.
#[derive(Clone, Copy, Debug)]
pub struct FixedBeam {
    seed: TrackSeed,
}

impl FixedBeam {
    pub fn new(position: Vec3, energy: f64) -> Self {
        Self {
            seed: TrackSeed {
                point: StepPoint {
                    position,
                    momentum: Vec3::new(0.0, 0.0, energy),
                    total_energy: energy,
                },
                pdg: PdgCode::ELECTRON,
            },
        }
    }
}

impl PrimaryGenerator for FixedBeam {
    fn name(&self) -> &str {
        "fixed_beam"
    }

    fn generate(&mut self, _event: mott_core::EventId) -> TrackSeed {
        self.seed
    }
}
