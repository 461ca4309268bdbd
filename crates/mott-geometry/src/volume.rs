//! The [`Volume`] tree: axis-aligned boxes placed relative to a parent.

use mott_core::Vec3;

/// A node in the geometry tree.
///
/// Every volume is an axis-aligned rectangular box described by its
/// half-extents, placed by a translation relative to its parent's
/// centre, and tagged with a material name. Exactly one root (the
/// world) has no parent.
///
/// Invariants maintained by the builders and checked optionally after
/// construction: sibling volumes do not overlap, and children are fully
/// contained in their parent's extent.
///
/// # Examples
///
/// ```
/// use mott_core::Vec3;
/// use mott_geometry::Volume;
///
/// let mut world = Volume::new("world", "Vacuum", Vec3::new(100.0, 100.0, 100.0), Vec3::ZERO);
/// world.add_child(Volume::new(
///     "slab",
///     "PBA",
///     Vec3::new(50.0, 50.0, 5.0),
///     Vec3::new(0.0, 0.0, -20.0),
/// ));
/// assert_eq!(world.node_count(), 2);
/// assert_eq!(world.material_at(Vec3::new(0.0, 0.0, -20.0)), Some("PBA"));
/// assert_eq!(world.material_at(Vec3::new(0.0, 0.0, 50.0)), Some("Vacuum"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Volume {
    name: String,
    material: String,
    half_extents: Vec3,
    translation: Vec3,
    children: Vec<Volume>,
}

impl Volume {
    /// Create a leaf volume.
    pub fn new(
        name: impl Into<String>,
        material: impl Into<String>,
        half_extents: Vec3,
        translation: Vec3,
    ) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
            half_extents,
            translation,
            children: Vec::new(),
        }
    }

    /// Attach a child volume, placed relative to this volume's centre.
    pub fn add_child(&mut self, child: Volume) {
        self.children.push(child);
    }

    /// Volume name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Assigned material name.
    pub fn material(&self) -> &str {
        &self.material
    }

    /// Box half-extents (mm).
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Full thickness along the beam (z) axis (mm).
    pub fn thickness(&self) -> f64 {
        2.0 * self.half_extents.z
    }

    /// Placement of this volume's centre relative to its parent's centre.
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Direct children.
    pub fn children(&self) -> &[Volume] {
        &self.children
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Volume::node_count).sum::<usize>()
    }

    /// Depth-first iteration over the subtree, parent before children.
    pub fn iter(&self) -> VolumeIter<'_> {
        VolumeIter { stack: vec![self] }
    }

    /// Number of volumes in the subtree made of `material`.
    pub fn count_material(&self, material: &str) -> usize {
        self.iter().filter(|v| v.material == material).count()
    }

    /// Find a volume by name anywhere in the subtree.
    pub fn find(&self, name: &str) -> Option<&Volume> {
        self.iter().find(|v| v.name == name)
    }

    /// Whether a point (in this volume's local frame) lies inside the box.
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x.abs() <= self.half_extents.x
            && point.y.abs() <= self.half_extents.y
            && point.z.abs() <= self.half_extents.z
    }

    /// Material at a point, resolved to the deepest enclosing volume.
    ///
    /// `point` is in this volume's local frame (the world frame when
    /// called on the root). Returns `None` if the point is outside this
    /// volume entirely.
    pub fn material_at(&self, point: Vec3) -> Option<&str> {
        if !self.contains_point(point) {
            return None;
        }
        for child in &self.children {
            if let Some(m) = child.material_at(point - child.translation) {
                return Some(m);
            }
        }
        Some(&self.material)
    }

    /// Whether `child`'s extent would be fully contained in this volume.
    pub fn would_contain(&self, child: &Volume) -> bool {
        child.translation.x.abs() + child.half_extents.x <= self.half_extents.x
            && child.translation.y.abs() + child.half_extents.y <= self.half_extents.y
            && child.translation.z.abs() + child.half_extents.z <= self.half_extents.z
    }

    /// Whether two volumes placed in the same parent frame intersect.
    ///
    /// Touching faces do not count as an overlap.
    pub fn intersects(&self, other: &Volume) -> bool {
        (self.translation.x - other.translation.x).abs()
            < self.half_extents.x + other.half_extents.x
            && (self.translation.y - other.translation.y).abs()
                < self.half_extents.y + other.half_extents.y
            && (self.translation.z - other.translation.z).abs()
                < self.half_extents.z + other.half_extents.z
    }
}

/// Depth-first iterator over a [`Volume`] subtree.
pub struct VolumeIter<'a> {
    stack: Vec<&'a Volume>,
}

impl<'a> Iterator for VolumeIter<'a> {
    type Item = &'a Volume;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Push in reverse so children come out in declaration order.
        for child in next.children.iter().rev() {
            self.stack.push(child);
        }
        Some(next)
    }
}
