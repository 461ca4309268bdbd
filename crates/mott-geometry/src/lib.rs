//! Detector-stack geometry for Mott simulations.
//!
//! This crate builds the spatial hierarchy a particle moves through:
//! a world [`Volume`] containing one of four selectable layouts, each
//! volume tagged with a material name.
//!
//! # Layouts
//!
//! - [`GeometryVariant::TwoSlab`]: two identical lead blocks with a fixed gap
//! - [`GeometryVariant::ReferenceStack`]: the fixed multi-layer experimental layout
//! - [`GeometryVariant::MinimalDetector`]: one radiator + one sensitive volume
//! - [`GeometryVariant::StackedDetector`]: N radiator/detector pairs along the beam axis
//!
//! Construction is a pure function of [`GeometryConfig`];
//! [`GeometryModel`] holds the built tree and replaces it atomically on
//! reconfiguration — there is no in-place mutation of a live tree.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod volume;

pub use builder::build_geometry;
pub use config::{GeometryConfig, GeometryVariant};
pub use error::GeometryError;
pub use model::GeometryModel;
pub use volume::Volume;
