//! Seed management for island generation
//!
//! Provides separate seeds for each generation stage, allowing
//! fine-grained control over which aspects of a generation to vary or
//! keep constant.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Seeds for all generation stages.
///
/// Each stage gets its own seed, derived from a master seed by default.
/// Individual seeds can be overridden for experimentation.
#[derive(Clone, Debug)]
pub struct GenSeeds {
    /// Master seed (used for display/reference)
    pub master: u64,
    /// Height grid synthesis (base noise, mountains)
    pub heightmap: u64,
    /// Texture classification noise perturbation
    pub texture: u64,
    /// Prop scattering (candidate cells, yaw, scale)
    pub scatter: u64,
    /// Grass density noise
    pub grass: u64,
}

impl GenSeeds {
    /// Create seeds from a master seed, deriving all stage seeds
    /// deterministically.
    pub fn from_master(master: u64) -> Self {
        Self {
            master,
            heightmap: derive_seed(master, "heightmap"),
            texture: derive_seed(master, "texture"),
            scatter: derive_seed(master, "scatter"),
            grass: derive_seed(master, "grass"),
        }
    }

    /// Override the heightmap seed
    pub fn with_heightmap(mut self, seed: u64) -> Self {
        self.heightmap = seed;
        self
    }

    /// Override the scatter seed
    pub fn with_scatter(mut self, seed: u64) -> Self {
        self.scatter = seed;
        self
    }
}

impl Default for GenSeeds {
    fn default() -> Self {
        Self::from_master(rand::random())
    }
}

/// Derive a stage seed from a master seed and a stage name.
/// Hashing ensures different stages get different but deterministic seeds.
fn derive_seed(master: u64, stage: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    master.hash(&mut hasher);
    stage.hash(&mut hasher);
    hasher.finish()
}

impl std::fmt::Display for GenSeeds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GenSeeds {{ master: {}, heightmap: {}, texture: {}, scatter: {}, grass: {} }}",
            self.master, self.heightmap, self.texture, self.scatter, self.grass,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_derivation() {
        let seeds1 = GenSeeds::from_master(12345);
        let seeds2 = GenSeeds::from_master(12345);

        assert_eq!(seeds1.heightmap, seeds2.heightmap);
        assert_eq!(seeds1.texture, seeds2.texture);
        assert_eq!(seeds1.scatter, seeds2.scatter);
        assert_eq!(seeds1.grass, seeds2.grass);
    }

    #[test]
    fn test_different_stages_get_different_seeds() {
        let seeds = GenSeeds::from_master(12345);

        assert_ne!(seeds.heightmap, seeds.texture);
        assert_ne!(seeds.texture, seeds.scatter);
        assert_ne!(seeds.scatter, seeds.grass);
    }

    #[test]
    fn test_override() {
        let seeds = GenSeeds::from_master(12345).with_scatter(99999);

        assert_eq!(seeds.scatter, 99999);

        let defaults = GenSeeds::from_master(12345);
        assert_eq!(seeds.heightmap, defaults.heightmap);
    }
}
