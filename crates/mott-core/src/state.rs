//! The shared per-event physics state and its cross-component protocol.
//!
//! [`EventPhysicsState`] is the named-field rendition of the 9-slot
//! vector threaded through configuration, generation, transport, and
//! recording. The write protocol is enforced through visibility:
//!
//! - the event-lifecycle owner calls [`begin_event`](EventPhysicsState::begin_event)
//!   (resets the asymmetry products, leaves control bits alone),
//! - the transport engine calls [`record_scatter`](EventPhysicsState::record_scatter)
//!   (the only writer of the products and the scattering-geometry slots),
//! - the command surface calls [`set_control`](EventPhysicsState::set_control)
//!   between runs or at event boundaries, never mid-step,
//! - everyone else reads.
//!
//! End-of-event readers must not observe the state until every step of
//! the event has been processed; the products are running values until
//! then.

use std::fmt;

/// Sentinel stored in every numeric slot at process start, meaning
/// "never written". Replaced by real values on the first
/// [`begin_event`](EventPhysicsState::begin_event) /
/// [`record_scatter`](EventPhysicsState::record_scatter).
pub const UNSET_SENTINEL: f64 = -2.0;

/// Run-level control bits consumed by the external transport engine.
///
/// Bit 0 instructs the engine to alter the simulated trajectory based
/// on the accumulated asymmetry; bit 1 restricts scattering-angle
/// sampling to two dimensions. Bits persist across events — they are
/// run configuration, not per-event state.
///
/// # Examples
///
/// ```
/// use mott_core::ControlBits;
///
/// let bits = ControlBits::from_flags(true, false);
/// assert!(bits.modify_trajectory());
/// assert!(!bits.reduce_2d());
/// assert_eq!(bits.as_raw(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlBits(u8);

impl ControlBits {
    const MODIFY_TRAJECTORY: u8 = 1 << 0;
    const REDUCE_2D: u8 = 1 << 1;

    /// Both flags off.
    pub fn none() -> Self {
        Self(0)
    }

    /// Build from the two defined flags.
    pub fn from_flags(modify_trajectory: bool, reduce_2d: bool) -> Self {
        let mut raw = 0;
        if modify_trajectory {
            raw |= Self::MODIFY_TRAJECTORY;
        }
        if reduce_2d {
            raw |= Self::REDUCE_2D;
        }
        Self(raw)
    }

    /// Reconstruct from a raw bit field (e.g. a decoded slot value).
    /// Undefined bits are preserved for round-tripping.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Whether the trajectory-modification flag is set.
    pub fn modify_trajectory(&self) -> bool {
        self.0 & Self::MODIFY_TRAJECTORY != 0
    }

    /// Whether scattering-angle sampling is restricted to two dimensions.
    pub fn reduce_2d(&self) -> bool {
        self.0 & Self::REDUCE_2D != 0
    }

    /// The raw bit field, as stored in slot 3.
    pub fn as_raw(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ControlBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "modify_trajectory={} reduce_2d={}",
            self.modify_trajectory() as u8,
            self.reduce_2d() as u8
        )
    }
}

/// The scattering geometry of one step, as computed by the transport
/// engine.
///
/// `asymmetry` is the per-step polarization weight `A_i ∈ [-1, 1]`; the
/// remaining fields overwrite the last-scatter slots of the state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScatterSample {
    /// Per-step asymmetry `A_i`, in `[-1, 1]`.
    pub asymmetry: f64,
    /// cos θ of the scattering deflection.
    pub cos_theta: f64,
    /// Azimuthal scattering angle φ (radians).
    pub phi: f64,
    /// φ in the polarization frame (radians).
    pub polarization_phi: f64,
    /// φ after rotation into the lab frame (radians).
    pub lab_phi: f64,
    /// Analyzing-power magnitude used for this step.
    pub analyzing_power: f64,
}

/// Per-event physics state shared across components.
///
/// Slot layout (for the positional [`to_slots`](Self::to_slots) /
/// [`from_slots`](Self::from_slots) encoding):
///
/// | slot | field |
/// |------|-------|
/// | 0 | running product ∏(1+Aᵢ) |
/// | 1 | running product ∏(1−Aᵢ) |
/// | 2 | calculation-stop flag (reserved) |
/// | 3 | control bit field |
/// | 4 | cos θ of last scatter |
/// | 5 | φ of last scatter |
/// | 6 | polarization-frame φ |
/// | 7 | lab-frame φ |
/// | 8 | analyzing power |
///
/// Created once per run and passed `&mut` into every call that mutates
/// it; no component reassigns its identity. A multithreaded driver must
/// give each concurrent event its own instance.
///
/// # Examples
///
/// ```
/// use mott_core::{EventPhysicsState, ScatterSample};
///
/// let mut state = EventPhysicsState::new();
/// state.begin_event();
/// state.record_scatter(&ScatterSample {
///     asymmetry: 0.5,
///     cos_theta: 0.99,
///     phi: 0.1,
///     polarization_phi: 0.1,
///     lab_phi: 0.1,
///     analyzing_power: 0.5,
/// });
/// assert_eq!(state.asym_plus(), 1.5);
/// assert_eq!(state.asym_minus(), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EventPhysicsState {
    asym_plus: f64,
    asym_minus: f64,
    stop_flag: f64,
    control: ControlBits,
    cos_theta: f64,
    phi: f64,
    polarization_phi: f64,
    lab_phi: f64,
    analyzing_power: f64,
}

impl Default for EventPhysicsState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPhysicsState {
    /// Fresh process-start state: every numeric slot holds
    /// [`UNSET_SENTINEL`], both control bits are off.
    pub fn new() -> Self {
        Self {
            asym_plus: UNSET_SENTINEL,
            asym_minus: UNSET_SENTINEL,
            stop_flag: UNSET_SENTINEL,
            control: ControlBits::none(),
            cos_theta: UNSET_SENTINEL,
            phi: UNSET_SENTINEL,
            polarization_phi: UNSET_SENTINEL,
            lab_phi: UNSET_SENTINEL,
            analyzing_power: UNSET_SENTINEL,
        }
    }

    /// Reset for a new event, before its first step is processed.
    ///
    /// Sets both asymmetry products to the identity 1.0. Control bits
    /// persist — they are run configuration. The remaining slots keep
    /// their previous values until the next scatter overwrites them.
    pub fn begin_event(&mut self) {
        self.asym_plus = 1.0;
        self.asym_minus = 1.0;
    }

    /// Fold one step's scattering into the state.
    ///
    /// Multiplies the running products by `(1 ± A_i)` and overwrites the
    /// last-scatter geometry slots. Only the transport engine may call
    /// this.
    pub fn record_scatter(&mut self, sample: &ScatterSample) {
        debug_assert!(
            (-1.0..=1.0).contains(&sample.asymmetry),
            "asymmetry {} outside [-1, 1]",
            sample.asymmetry
        );
        self.asym_plus *= 1.0 + sample.asymmetry;
        self.asym_minus *= 1.0 - sample.asymmetry;
        self.cos_theta = sample.cos_theta;
        self.phi = sample.phi;
        self.polarization_phi = sample.polarization_phi;
        self.lab_phi = sample.lab_phi;
        self.analyzing_power = sample.analyzing_power;
    }

    /// Write the control bits. Commands apply this only between runs or
    /// at event boundaries, never mid-step.
    pub fn set_control(&mut self, control: ControlBits) {
        self.control = control;
    }

    /// Write the reserved calculation-stop flag. Stored but not
    /// consumed by any built-in component.
    pub fn set_stop_flag(&mut self, value: f64) {
        self.stop_flag = value;
    }

    /// Running product ∏(1+Aᵢ) for the current event.
    pub fn asym_plus(&self) -> f64 {
        self.asym_plus
    }

    /// Running product ∏(1−Aᵢ) for the current event.
    pub fn asym_minus(&self) -> f64 {
        self.asym_minus
    }

    /// Reserved calculation-stop flag.
    pub fn stop_flag(&self) -> f64 {
        self.stop_flag
    }

    /// Current control bits.
    pub fn control(&self) -> ControlBits {
        self.control
    }

    /// cos θ of the most recent scatter.
    pub fn cos_theta(&self) -> f64 {
        self.cos_theta
    }

    /// φ of the most recent scatter (radians).
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Polarization-frame φ of the most recent scatter.
    pub fn polarization_phi(&self) -> f64 {
        self.polarization_phi
    }

    /// Lab-frame φ of the most recent scatter.
    pub fn lab_phi(&self) -> f64 {
        self.lab_phi
    }

    /// Analyzing-power magnitude of the most recent scatter.
    pub fn analyzing_power(&self) -> f64 {
        self.analyzing_power
    }

    /// Encode into the positional 9-slot layout.
    pub fn to_slots(&self) -> [f64; 9] {
        [
            self.asym_plus,
            self.asym_minus,
            self.stop_flag,
            f64::from(self.control.as_raw()),
            self.cos_theta,
            self.phi,
            self.polarization_phi,
            self.lab_phi,
            self.analyzing_power,
        ]
    }

    /// Decode from the positional 9-slot layout.
    ///
    /// Slot 3 is truncated to its low byte; only bits 0 and 1 are
    /// defined.
    pub fn from_slots(slots: [f64; 9]) -> Self {
        Self {
            asym_plus: slots[0],
            asym_minus: slots[1],
            stop_flag: slots[2],
            control: ControlBits::from_raw(slots[3] as u8),
            cos_theta: slots[4],
            phi: slots[5],
            polarization_phi: slots[6],
            lab_phi: slots[7],
            analyzing_power: slots[8],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample(a: f64) -> ScatterSample {
        ScatterSample {
            asymmetry: a,
            cos_theta: 0.9,
            phi: 0.2,
            polarization_phi: 0.3,
            lab_phi: 0.4,
            analyzing_power: a.abs(),
        }
    }

    // ── Protocol tests ──────────────────────────────────────────

    #[test]
    fn new_state_is_all_sentinel() {
        let s = EventPhysicsState::new();
        let slots = s.to_slots();
        for (i, v) in slots.iter().enumerate() {
            if i == 3 {
                assert_eq!(*v, 0.0, "control defaults to no bits set");
            } else {
                assert_eq!(*v, UNSET_SENTINEL, "slot {i} should be unset");
            }
        }
    }

    #[test]
    fn begin_event_resets_products_to_identity() {
        let mut s = EventPhysicsState::new();
        s.begin_event();
        assert_eq!(s.asym_plus(), 1.0);
        assert_eq!(s.asym_minus(), 1.0);
        // Everything else untouched.
        assert_eq!(s.cos_theta(), UNSET_SENTINEL);
        assert_eq!(s.stop_flag(), UNSET_SENTINEL);
    }

    #[test]
    fn begin_event_preserves_control_bits() {
        let mut s = EventPhysicsState::new();
        s.set_control(ControlBits::from_flags(true, false));
        s.begin_event();
        assert!(s.control().modify_trajectory());
        assert!(!s.control().reduce_2d());
        assert_eq!(s.to_slots()[3], 1.0);
    }

    #[test]
    fn record_scatter_accumulates_products() {
        let mut s = EventPhysicsState::new();
        s.begin_event();
        s.record_scatter(&sample(0.5));
        s.record_scatter(&sample(-0.2));
        assert!((s.asym_plus() - 1.5 * 0.8).abs() < 1e-12);
        assert!((s.asym_minus() - 0.5 * 1.2).abs() < 1e-12);
    }

    #[test]
    fn record_scatter_overwrites_geometry_slots() {
        let mut s = EventPhysicsState::new();
        s.begin_event();
        s.record_scatter(&ScatterSample {
            asymmetry: 0.0,
            cos_theta: 0.5,
            phi: 1.0,
            polarization_phi: 2.0,
            lab_phi: 3.0,
            analyzing_power: 0.25,
        });
        assert_eq!(s.cos_theta(), 0.5);
        assert_eq!(s.phi(), 1.0);
        assert_eq!(s.polarization_phi(), 2.0);
        assert_eq!(s.lab_phi(), 3.0);
        assert_eq!(s.analyzing_power(), 0.25);
    }

    #[test]
    fn products_reset_between_events() {
        let mut s = EventPhysicsState::new();
        s.begin_event();
        s.record_scatter(&sample(0.9));
        s.begin_event();
        assert_eq!(s.asym_plus(), 1.0);
        assert_eq!(s.asym_minus(), 1.0);
    }

    #[test]
    fn slot_roundtrip() {
        let mut s = EventPhysicsState::new();
        s.set_control(ControlBits::from_flags(true, true));
        s.begin_event();
        s.record_scatter(&sample(0.3));
        s.set_stop_flag(1.0);
        let decoded = EventPhysicsState::from_slots(s.to_slots());
        assert_eq!(decoded, s);
    }

    // ── Control bits ────────────────────────────────────────────

    #[test]
    fn control_bit_layout() {
        assert_eq!(ControlBits::from_flags(true, false).as_raw(), 1);
        assert_eq!(ControlBits::from_flags(false, true).as_raw(), 2);
        assert_eq!(ControlBits::from_flags(true, true).as_raw(), 3);
        assert_eq!(ControlBits::none().as_raw(), 0);
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn products_match_closed_form(asyms in prop::collection::vec(-1.0f64..=1.0, 0..32)) {
            let mut s = EventPhysicsState::new();
            s.begin_event();
            for &a in &asyms {
                s.record_scatter(&sample(a));
            }
            let expect_plus: f64 = asyms.iter().map(|a| 1.0 + a).product();
            let expect_minus: f64 = asyms.iter().map(|a| 1.0 - a).product();
            prop_assert!((s.asym_plus() - expect_plus).abs() <= 1e-9 * expect_plus.abs().max(1.0));
            prop_assert!((s.asym_minus() - expect_minus).abs() <= 1e-9 * expect_minus.abs().max(1.0));
        }

        #[test]
        fn reset_is_independent_of_history(asyms in prop::collection::vec(-1.0f64..=1.0, 1..16)) {
            let mut s = EventPhysicsState::new();
            s.begin_event();
            for &a in &asyms {
                s.record_scatter(&sample(a));
            }
            s.begin_event();
            prop_assert_eq!(s.asym_plus(), 1.0);
            prop_assert_eq!(s.asym_minus(), 1.0);
        }

        #[test]
        fn control_roundtrips_through_slots(modify in any::<bool>(), reduce in any::<bool>()) {
            let mut s = EventPhysicsState::new();
            s.set_control(ControlBits::from_flags(modify, reduce));
            let decoded = EventPhysicsState::from_slots(s.to_slots());
            prop_assert_eq!(decoded.control().modify_trajectory(), modify);
            prop_assert_eq!(decoded.control().reduce_2d(), reduce);
        }
    }
}
