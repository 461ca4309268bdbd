//! Core types for the Mott polarized-transport framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Mott workspace:
//! typed identifiers, kinematic value types, the material registry,
//! the shared [`EventPhysicsState`] protocol, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod material;
pub mod state;
pub mod vec3;

pub use error::TransportError;
pub use id::{EventId, PdgCode, TrackId};
pub use material::{Material, MaterialRegistry};
pub use state::{ControlBits, EventPhysicsState, ScatterSample, UNSET_SENTINEL};
pub use vec3::{Step, StepPoint, Vec3};
