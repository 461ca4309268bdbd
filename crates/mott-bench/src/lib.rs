//! Benchmark profiles for the Mott transport framework.
//!
//! Provides pre-built [`RunConfig`] profiles shared by the criterion
//! benches:
//!
//! - [`reference_profile`]: 3-unit stacked detector, 100 events
//! - [`stress_profile`]: 24-unit stacked detector, 1000 events

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mott_engine::RunConfig;
use mott_geometry::{GeometryConfig, GeometryVariant};

/// Reference profile: a 3-unit stacked detector, 100 events.
pub fn reference_profile(seed: u64) -> RunConfig {
    RunConfig {
        geometry: GeometryConfig {
            variant: GeometryVariant::StackedDetector,
            unit_count: 3,
            radiator_thickness: 3.2,
            ..GeometryConfig::default()
        },
        seed,
        events: 100,
        ..RunConfig::default()
    }
}

/// Stress profile: a 24-unit stacked detector, 1000 events.
pub fn stress_profile(seed: u64) -> RunConfig {
    RunConfig {
        geometry: GeometryConfig {
            variant: GeometryVariant::StackedDetector,
            unit_count: 24,
            radiator_thickness: 3.2,
            ..GeometryConfig::default()
        },
        seed,
        events: 1000,
        ..RunConfig::default()
    }
}
