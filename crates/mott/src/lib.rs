//! Mott: polarized-particle transport through radiator/detector stacks.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Mott sub-crates. For most users, adding `mott` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use mott::prelude::*;
//!
//! // A three-unit stacked detector, toy scattering transport, and a
//! // monoenergetic electron beam.
//! let config = RunConfig {
//!     geometry: GeometryConfig {
//!         variant: GeometryVariant::StackedDetector,
//!         unit_count: 3,
//!         radiator_thickness: 2.0,
//!         ..GeometryConfig::default()
//!     },
//!     events: 5,
//!     ..RunConfig::default()
//! };
//! let transport = FoilScatterTransport::builder().seed(1).build().unwrap();
//! let beam = PencilBeam::new(855.0, -90.0).unwrap();
//!
//! let mut store = Vec::new();
//! let mut run = TransportRun::new(
//!     config,
//!     Box::new(transport),
//!     Box::new(beam),
//!     &mut store,
//! )
//! .unwrap();
//! let report = run.run().unwrap();
//! assert_eq!(report.metrics.events_processed, 5);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mott-core` | IDs, materials, the shared state protocol |
//! | [`geometry`] | `mott-geometry` | Volume trees and layout builders |
//! | [`transport`] | `mott-transport` | Transport seam and reference engines |
//! | [`record`] | `mott-record` | Diagnostic records and the persisted store |
//! | [`engine`] | `mott-engine` | Run lifecycle and the synchronous driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and the shared state protocol (`mott-core`).
pub use mott_core as types;

/// Volume trees, layout variants, and the geometry model
/// (`mott-geometry`).
pub use mott_geometry as geometry;

/// The transport seam, reference engines, and primary generators
/// (`mott-transport`).
pub use mott_transport as transport;

/// Diagnostic records, the binary store, and the step recorder
/// (`mott-record`).
pub use mott_record as record;

/// Run configuration, lifecycle, commands, and the synchronous driver
/// (`mott-engine`).
pub use mott_engine as engine;

/// Common imports for typical Mott usage.
///
/// ```rust
/// use mott::prelude::*;
/// ```
pub mod prelude {
    // Core types and the shared state protocol
    pub use mott_core::{
        ControlBits, EventId, EventPhysicsState, Material, MaterialRegistry, PdgCode,
        ScatterSample, Step, StepPoint, TrackId, TransportError, Vec3,
    };

    // Geometry
    pub use mott_geometry::{
        GeometryConfig, GeometryError, GeometryModel, GeometryVariant, Volume,
    };

    // Transport seam and reference implementations
    pub use mott_transport::{
        FoilScatterTransport, PencilBeam, PrimaryGenerator, StepContext, StepOutcome,
        StraightLineTransport, TrackSeed, TrackStatus, TransportEngine,
    };

    // Recording
    pub use mott_record::{
        DiagnosticRecord, Histogram, StepRecorder, StoreError, StoreHeader, StoreReader,
        StoreWriter,
    };

    // Engine
    pub use mott_engine::{
        ConfigError, RunCommand, RunConfig, RunError, RunMetrics, RunReport, RunState,
        TransportRun,
    };
}
