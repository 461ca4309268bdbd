//! Materials and the name-keyed [`MaterialRegistry`].
//!
//! The core treats materials as opaque beyond name-based lookup: the
//! geometry builder tags volumes with a material name, the recorder
//! matches step materials against a watched set, and transport engines
//! may consult density for their own models.

use indexmap::IndexMap;

/// A material a volume can be made of.
///
/// Composition is a list of `(element symbol, mass fraction)` pairs.
/// Nothing in the core interprets it; it exists so external transport
/// engines have the same information the original detector description
/// carried.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    name: String,
    density: f64,
    composition: Vec<(String, f64)>,
}

impl Material {
    /// Define a material from its name, density (g/cm³), and composition.
    pub fn new(
        name: impl Into<String>,
        density: f64,
        composition: Vec<(String, f64)>,
    ) -> Self {
        Self {
            name: name.into(),
            density,
            composition,
        }
    }

    /// Single-element shorthand.
    pub fn element(name: impl Into<String>, symbol: &str, density: f64) -> Self {
        Self::new(name, density, vec![(symbol.to_string(), 1.0)])
    }

    /// Material name, the lookup key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Density in g/cm³.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Composition as `(element symbol, mass fraction)` pairs.
    pub fn composition(&self) -> &[(String, f64)] {
        &self.composition
    }
}

/// Name-keyed material table with deterministic iteration order.
///
/// Insertion order is preserved (`IndexMap`), so geometry construction
/// and diagnostics see materials in the order they were defined.
///
/// # Examples
///
/// ```
/// use mott_core::MaterialRegistry;
///
/// let reg = MaterialRegistry::reference();
/// assert!(reg.get("PBA").is_some());
/// assert!(reg.get("detectorMat").is_some());
/// assert!(reg.get("unobtainium").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MaterialRegistry {
    materials: IndexMap<String, Material>,
}

impl MaterialRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The reference material set used by the built-in geometries.
    ///
    /// `PBA` is the lead absorber of the two-slab and reference-stack
    /// layouts; `radiatorMat`/`detectorMat` are the configurable-stack
    /// materials. Densities are nominal values in g/cm³.
    pub fn reference() -> Self {
        let mut reg = Self::empty();
        reg.insert(Material::element("PBA", "Pb", 11.35));
        reg.insert(Material::element("radiatorMat", "Pb", 11.35));
        reg.insert(Material::new(
            "detectorMat",
            2.20,
            vec![("Si".to_string(), 0.4675), ("O".to_string(), 0.5325)],
        ));
        reg.insert(Material::new(
            "Air",
            1.29e-3,
            vec![("N".to_string(), 0.7), ("O".to_string(), 0.3)],
        ));
        reg.insert(Material::element("Alu", "Al", 2.70));
        // Near-vacuum world filler, density chosen so transport models
        // see effectively no energy loss.
        reg.insert(Material::element("Vacuum", "H", 1.0e-25));
        reg
    }

    /// Insert a material, replacing any previous definition of the name.
    pub fn insert(&mut self, material: Material) {
        self.materials.insert(material.name().to_string(), material);
    }

    /// Look up a material by name.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Whether a material with this name is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.materials.contains_key(name)
    }

    /// Number of defined materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns `true` if no materials are defined.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate over materials in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_set_has_stack_materials() {
        let reg = MaterialRegistry::reference();
        for name in ["PBA", "radiatorMat", "detectorMat", "Air", "Alu", "Vacuum"] {
            assert!(reg.contains(name), "missing reference material {name}");
        }
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut reg = MaterialRegistry::empty();
        reg.insert(Material::element("X", "Fe", 7.8));
        reg.insert(Material::element("X", "Fe", 7.9));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("X").unwrap().density(), 7.9);
    }

    #[test]
    fn iteration_preserves_definition_order() {
        let mut reg = MaterialRegistry::empty();
        reg.insert(Material::element("b", "B", 1.0));
        reg.insert(Material::element("a", "A", 2.0));
        let names: Vec<_> = reg.iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
