//! Toy multiple-scattering reference transport.
//!
//! Deterministic, seeded model: each step in a dense material samples a
//! small-angle deflection and an azimuth, derives a per-step asymmetry
//! from the material's analyzing power, and folds it into the shared
//! state. Honours both control bits:
//!
//! - **reduce-2D**: azimuthal sampling restricted to φ ∈ {0, π}
//! - **modify-trajectory**: the outgoing momentum is deflected, with
//!   the azimuth biased by the accumulated asymmetry
//!
//! This is a reference implementation of the seam, not cross-section
//! physics; magnitudes are plausible, shapes are simple.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use mott_core::{EventPhysicsState, ScatterSample, TransportError};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::context::StepContext;
use crate::straight_line::StraightLineTransport;
use crate::transport::{StepOutcome, TransportEngine};

/// Materials below this density (g/cm³) do not scatter.
const MIN_SCATTER_DENSITY: f64 = 1.0e-6;

/// Hard cap on the sampled polar deflection (radians); keeps the toy
/// model in its small-angle regime.
const MAX_THETA: f64 = 0.5;

/// A seeded toy scattering engine.
///
/// Constructed via the builder pattern: [`FoilScatterTransport::builder`].
///
/// # Examples
///
/// ```
/// use mott_transport::FoilScatterTransport;
///
/// let engine = FoilScatterTransport::builder()
///     .seed(42)
///     .analyzing_power(0.1)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug)]
pub struct FoilScatterTransport {
    analyzing_power: f64,
    scatter_scale: f64,
    rng: ChaCha8Rng,
}

/// Builder for [`FoilScatterTransport`].
pub struct FoilScatterTransportBuilder {
    seed: u64,
    analyzing_power: f64,
    scatter_scale: f64,
}

impl FoilScatterTransport {
    /// Create a new builder with default parameters.
    pub fn builder() -> FoilScatterTransportBuilder {
        FoilScatterTransportBuilder {
            seed: 0,
            analyzing_power: 0.05,
            scatter_scale: 14.0,
        }
    }

    /// Generate a Gaussian sample using the Box-Muller transform.
    /// Avoids the `rand_distr` dependency.
    fn box_muller(rng: &mut ChaCha8Rng) -> f64 {
        let u1: f64 = rng.gen::<f64>().max(1e-300); // avoid ln(0)
        let u2: f64 = rng.gen();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }
}

impl FoilScatterTransportBuilder {
    /// Set the RNG seed (default: 0). Same seed, same run.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the analyzing-power magnitude (default: 0.05).
    ///
    /// Must lie in `[0, 1]`; it bounds every per-step asymmetry.
    pub fn analyzing_power(mut self, value: f64) -> Self {
        self.analyzing_power = value;
        self
    }

    /// Set the deflection scale coefficient (default: 14.0, roughly the
    /// Highland constant in MeV).
    pub fn scatter_scale(mut self, value: f64) -> Self {
        self.scatter_scale = value;
        self
    }

    /// Build the engine, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `analyzing_power` is outside `[0, 1]` or
    /// `scatter_scale` is not finite and positive.
    pub fn build(self) -> Result<FoilScatterTransport, String> {
        if !(0.0..=1.0).contains(&self.analyzing_power) {
            return Err(format!(
                "analyzing_power must be in [0, 1], got {}",
                self.analyzing_power
            ));
        }
        if !self.scatter_scale.is_finite() || self.scatter_scale <= 0.0 {
            return Err(format!(
                "scatter_scale must be finite and positive, got {}",
                self.scatter_scale
            ));
        }
        Ok(FoilScatterTransport {
            analyzing_power: self.analyzing_power,
            scatter_scale: self.scatter_scale,
            rng: ChaCha8Rng::seed_from_u64(self.seed),
        })
    }
}

fn wrap_angle(a: f64) -> f64 {
    a.rem_euclid(TAU)
}

impl TransportEngine for FoilScatterTransport {
    fn name(&self) -> &str {
        "foil_scatter"
    }

    fn transport(
        &mut self,
        ctx: &StepContext<'_>,
        state: &mut EventPhysicsState,
    ) -> Result<StepOutcome, TransportError> {
        let pre = ctx.pre();
        if pre.momentum.norm() == 0.0 {
            return Err(TransportError::ExecutionFailed {
                reason: "pre-step momentum is zero, no direction to advance".to_string(),
            });
        }

        let density = ctx.material().density();
        let (mut post, status) =
            StraightLineTransport::advance_point(&pre, ctx.step_hint(), density);

        // Thin media: pure drift, nothing to fold into the state.
        if density < MIN_SCATTER_DENSITY {
            return Ok(StepOutcome::advance(post, status));
        }

        let control = state.control();

        // Small-angle polar deflection, Highland-shaped in the step's
        // areal density and the pre-step energy.
        let theta0 = self.scatter_scale * (density * ctx.step_hint()).sqrt()
            / pre.total_energy.max(1.0);
        let theta = (theta0 * Self::box_muller(&mut self.rng).abs()).min(MAX_THETA);

        let phi = if control.reduce_2d() {
            // Two-dimensional sampling: scatter in the x-z plane only.
            if self.rng.gen::<bool>() {
                0.0
            } else {
                PI
            }
        } else {
            self.rng.gen::<f64>() * TAU
        };
        let polarization_phi = wrap_angle(phi - FRAC_PI_2);

        // Transverse polarization picks out cos φ in the polarization
        // frame; the analyzing power bounds the magnitude.
        let asymmetry = self.analyzing_power * theta.sin() * polarization_phi.cos();
        if !asymmetry.is_finite() {
            return Err(TransportError::NonFiniteSample {
                quantity: "asymmetry",
            });
        }

        let lab_phi = if control.modify_trajectory() {
            let pp = state.asym_plus();
            let pm = state.asym_minus();
            let bias = if pp + pm != 0.0 {
                (pp - pm) / (pp + pm)
            } else {
                0.0
            };
            wrap_angle(phi + bias)
        } else {
            phi
        };

        let sample = ScatterSample {
            asymmetry,
            cos_theta: theta.cos(),
            phi,
            polarization_phi,
            lab_phi,
            analyzing_power: self.analyzing_power,
        };
        state.record_scatter(&sample);

        if control.modify_trajectory() {
            let direction = post.momentum.normalized();
            let kicked = mott_core::Vec3::new(
                direction.x + theta * lab_phi.cos(),
                direction.y + theta * lab_phi.sin(),
                direction.z,
            )
            .normalized();
            post.momentum = kicked * post.total_energy;
        }

        Ok(StepOutcome {
            post,
            scatter: Some(sample),
            status,
            secondaries: smallvec::SmallVec::new(),
        })
    }
}
