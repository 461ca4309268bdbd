//! The transport seam for Mott simulations.
//!
//! The [`TransportEngine`] trait is the boundary behind which the
//! actual scattering and energy-loss physics lives. The run driver
//! calls it once per step with a [`StepContext`] and the shared
//! [`EventPhysicsState`](mott_core::EventPhysicsState); the engine
//! advances the track and — when it scatters — folds the per-step
//! asymmetry into the state. No other component writes the asymmetry
//! slots.
//!
//! The implementations shipped here are deliberately simple,
//! deterministic reference models, not cross-section physics:
//!
//! - [`StraightLineTransport`]: advance + energy loss, never scatters
//! - [`FoilScatterTransport`]: seeded toy multiple scattering that
//!   honours both control bits
//!
//! [`PrimaryGenerator`] and [`PencilBeam`] produce the primary particle
//! each event starts from.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod foil_scatter;
pub mod generator;
pub mod straight_line;
pub mod transport;

pub use context::StepContext;
pub use foil_scatter::FoilScatterTransport;
pub use generator::{PencilBeam, PrimaryGenerator};
pub use straight_line::StraightLineTransport;
pub use transport::{StepOutcome, TrackSeed, TrackStatus, TransportEngine};
