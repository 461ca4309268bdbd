//! Pure construction functions for the four geometry layouts.
//!
//! Each builder is a function of configuration and the material
//! registry only; two calls with equal inputs produce identical trees.
//! Validation runs before construction and the optional overlap check
//! after it, so an `Err` never leaves a partial hierarchy behind.

use mott_core::{MaterialRegistry, Vec3};

use crate::config::{GeometryConfig, GeometryVariant};
use crate::error::GeometryError;
use crate::volume::Volume;

/// Transverse half-extent of every slab and detector element (mm).
const SLAB_HALF_XY: f64 = 50.0;

/// Transverse half-extent of the world box (mm).
const WORLD_HALF_XY: f64 = 100.0;

/// Margin added beyond the stack on both ends of the world (mm).
const WORLD_MARGIN_Z: f64 = 50.0;

/// Full thickness of a sensitive detector element (mm).
const DETECTOR_THICKNESS: f64 = 12.5;

/// Gap between a radiator and its detector within one unit (mm).
const ELEMENT_GAP: f64 = 5.0;

/// Gap between consecutive units of the stacked layout (mm).
const UNIT_SPACING: f64 = 20.0;

/// Centre-to-centre separation of the two-slab layout (mm).
const TWO_SLAB_GAP: f64 = 100.0;

/// Full thickness of each slab in the two-slab layout (mm).
const TWO_SLAB_THICKNESS: f64 = 10.0;

/// The fixed reference layout: `(volume name, material, thickness mm)`,
/// first layer nearest the beam origin. Order matters.
const REFERENCE_LAYERS: &[(&str, &str, f64)] = &[
    ("entranceWindow", "Alu", 0.127),
    ("upstreamAir", "Air", 250.0),
    ("preRadiator", "PBA", 3.2),
    ("quartzBar", "detectorMat", 12.5),
    ("downstreamAir", "Air", 50.0),
    ("backingPlate", "Alu", 6.35),
];

/// Build the geometry selected by `config`.
///
/// Pure function of its inputs: validates the configuration, constructs
/// the tree for the selected variant, and (if enabled) verifies that no
/// sibling volumes intersect.
///
/// # Errors
///
/// - [`GeometryError::InvalidUnitCount`] / [`GeometryError::InvalidThickness`]
///   from validation, before anything is built
/// - [`GeometryError::UnknownMaterial`] if the registry lacks a material
///   the layout needs
/// - [`GeometryError::Overlap`] from the optional post-build check,
///   naming both offending volumes
pub fn build_geometry(
    config: &GeometryConfig,
    materials: &MaterialRegistry,
) -> Result<Volume, GeometryError> {
    config.validate()?;
    let root = match config.variant {
        GeometryVariant::TwoSlab => build_two_slab(materials)?,
        GeometryVariant::ReferenceStack => build_reference_stack(materials)?,
        GeometryVariant::MinimalDetector => build_minimal_detector(config, materials)?,
        GeometryVariant::StackedDetector => build_stacked_detector(config, materials)?,
    };
    if config.check_overlaps {
        check_sibling_overlaps(&root)?;
    }
    Ok(root)
}

fn require<'a>(
    materials: &'a MaterialRegistry,
    name: &str,
) -> Result<&'a str, GeometryError> {
    materials
        .get(name)
        .map(|m| m.name())
        .ok_or_else(|| GeometryError::UnknownMaterial {
            name: name.to_string(),
        })
}

fn world(half_z: f64) -> Volume {
    Volume::new(
        "world",
        "Vacuum",
        Vec3::new(WORLD_HALF_XY, WORLD_HALF_XY, half_z),
        Vec3::ZERO,
    )
}

fn slab(name: String, material: &str, thickness: f64, centre_z: f64) -> Volume {
    Volume::new(
        name,
        material,
        Vec3::new(SLAB_HALF_XY, SLAB_HALF_XY, thickness / 2.0),
        Vec3::new(0.0, 0.0, centre_z),
    )
}

fn build_two_slab(materials: &MaterialRegistry) -> Result<Volume, GeometryError> {
    require(materials, "Vacuum")?;
    let lead = require(materials, "PBA")?;
    let mut root = world(TWO_SLAB_GAP / 2.0 + TWO_SLAB_THICKNESS + WORLD_MARGIN_Z);
    root.add_child(slab(
        "leadSlab0".to_string(),
        lead,
        TWO_SLAB_THICKNESS,
        -TWO_SLAB_GAP / 2.0,
    ));
    root.add_child(slab(
        "leadSlab1".to_string(),
        lead,
        TWO_SLAB_THICKNESS,
        TWO_SLAB_GAP / 2.0,
    ));
    Ok(root)
}

fn build_reference_stack(materials: &MaterialRegistry) -> Result<Volume, GeometryError> {
    require(materials, "Vacuum")?;
    let total: f64 = REFERENCE_LAYERS.iter().map(|(_, _, t)| t).sum();
    let mut root = world(total / 2.0 + WORLD_MARGIN_Z);

    // First layer's front face sits at -total/2, nearest the beam
    // origin; layers follow in table order.
    let mut front = -total / 2.0;
    for (name, material, thickness) in REFERENCE_LAYERS {
        let material = require(materials, material)?;
        root.add_child(slab(
            (*name).to_string(),
            material,
            *thickness,
            front + thickness / 2.0,
        ));
        front += thickness;
    }
    Ok(root)
}

fn build_minimal_detector(
    config: &GeometryConfig,
    materials: &MaterialRegistry,
) -> Result<Volume, GeometryError> {
    require(materials, "Vacuum")?;
    let radiator = require(materials, "radiatorMat")?;
    let detector = require(materials, "detectorMat")?;

    let t = config.radiator_thickness;
    let total = t + ELEMENT_GAP + DETECTOR_THICKNESS;
    let mut root = world(total / 2.0 + WORLD_MARGIN_Z);

    let front = -total / 2.0;
    root.add_child(slab("radiator".to_string(), radiator, t, front + t / 2.0));
    root.add_child(slab(
        "detector".to_string(),
        detector,
        DETECTOR_THICKNESS,
        front + t + ELEMENT_GAP + DETECTOR_THICKNESS / 2.0,
    ));
    Ok(root)
}

fn build_stacked_detector(
    config: &GeometryConfig,
    materials: &MaterialRegistry,
) -> Result<Volume, GeometryError> {
    require(materials, "Vacuum")?;
    let radiator = require(materials, "radiatorMat")?;
    let detector = require(materials, "detectorMat")?;

    let t = config.radiator_thickness;
    let n = config.unit_count as f64;
    let pitch = t + ELEMENT_GAP + DETECTOR_THICKNESS + UNIT_SPACING;
    let total = n * pitch - UNIT_SPACING;
    let mut root = world(total / 2.0 + WORLD_MARGIN_Z);

    for i in 0..config.unit_count {
        let front = -total / 2.0 + f64::from(i) * pitch;
        root.add_child(slab(
            format!("radiator{i}"),
            radiator,
            t,
            front + t / 2.0,
        ));
        root.add_child(slab(
            format!("detector{i}"),
            detector,
            DETECTOR_THICKNESS,
            front + t + ELEMENT_GAP + DETECTOR_THICKNESS / 2.0,
        ));
    }
    Ok(root)
}

/// Verify that no two siblings anywhere in the tree intersect.
///
/// Quadratic in the child count per node, which is fine at stack scale.
pub fn check_sibling_overlaps(root: &Volume) -> Result<(), GeometryError> {
    for node in root.iter() {
        let children = node.children();
        for (i, a) in children.iter().enumerate() {
            for b in &children[i + 1..] {
                if a.intersects(b) {
                    return Err(GeometryError::Overlap {
                        first: a.name().to_string(),
                        second: b.name().to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
