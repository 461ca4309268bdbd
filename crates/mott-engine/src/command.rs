//! The reconfiguration command surface.
//!
//! These are the entry points an external command interface (macro
//! file, UI, FFI) reaches the core through. The driver applies them
//! only between runs or at event boundaries, never mid-step.

/// A reconfiguration request for a run.
///
/// # Examples
///
/// ```
/// use mott_engine::RunCommand;
///
/// let cmd = RunCommand::SetControlBits {
///     modify_trajectory: true,
///     reduce_2d: false,
/// };
/// assert!(matches!(cmd, RunCommand::SetControlBits { .. }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunCommand {
    /// Change the stacked-detector unit count. Must be at least 1;
    /// triggers a full geometry rebuild.
    SetUnitCount(u32),
    /// Change the radiator thickness (mm). Must be positive; triggers a
    /// full geometry rebuild.
    SetRadiatorThickness(f64),
    /// Change the step-size hint (mm). Must be positive; forwarded to
    /// the transport engine unmodified.
    SetStepHint(f64),
    /// Write the control bits of the shared physics state.
    SetControlBits {
        /// Whether the transport engine alters the trajectory from the
        /// accumulated asymmetry.
        modify_trajectory: bool,
        /// Whether scattering-angle sampling is restricted to two
        /// dimensions.
        reduce_2d: bool,
    },
}
