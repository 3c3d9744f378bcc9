//! Generated island container
//!
//! Bundles everything one generation pass produces. A pass rebuilds all
//! artifacts wholesale; nothing is updated incrementally, and the height
//! grid computed here is the canonical intermediate the texture and
//! scatter stages read.

use crate::grass;
use crate::grid::Grid;
use crate::height::{self, HeightStats};
use crate::params::GenerationParams;
use crate::scatter::{self, Placement, PropKind, ScatterReport};
use crate::seeds::GenSeeds;
use crate::texture::{self, LayerWeights, TextureStats};

/// All artifacts of one generation pass.
pub struct Island {
    /// Seeds used for generation (allows recreation)
    pub seeds: GenSeeds,
    /// Parameters used for generation
    pub params: GenerationParams,
    /// Normalized height grid, the canonical intermediate
    pub heights: Grid<f32>,
    pub height_stats: HeightStats,
    /// Per-cell texture blend weights; None when no layers are configured
    pub layers: Option<LayerWeights>,
    pub texture_stats: Option<TextureStats>,
    /// Grass density map; None when grass density is zero
    pub grass: Option<Grid<u8>>,
    /// Accepted prop placements, ordered per category
    pub placements: Vec<Placement>,
    pub scatter_reports: Vec<ScatterReport>,
}

/// Run the full pipeline: heights, texture weights, grass, props.
pub fn generate(params: &GenerationParams, seeds: &GenSeeds) -> Island {
    let (heights, height_stats) = height::generate_height_grid(params, seeds.heightmap);

    let (layers, texture_stats) = if params.texture_layers.is_empty() {
        println!("[island] warning: no texture layers configured, skipping splat pass");
        (None, None)
    } else {
        let (weights, stats) = texture::classify(&heights, params, seeds.texture);
        (Some(weights), Some(stats))
    };

    let grass = if params.grass_density == 0 {
        println!("[island] warning: grass density is 0, skipping grass pass");
        None
    } else {
        Some(grass::grass_density_map(&heights, params, seeds.grass))
    };

    let (placements, scatter_reports) = scatter::scatter_props(&heights, params, seeds.scatter);

    Island {
        seeds: seeds.clone(),
        params: params.clone(),
        heights,
        height_stats,
        layers,
        texture_stats,
        grass,
        placements,
        scatter_reports,
    }
}

impl Island {
    /// Convenience accessor for the master seed.
    pub fn seed(&self) -> u64 {
        self.seeds.master
    }

    pub fn count_of(&self, kind: PropKind) -> usize {
        self.placements.iter().filter(|p| p.kind == kind).count()
    }

    /// Print distribution statistics for the generated artifacts.
    pub fn analyze(&self) {
        println!(
            "Height range: {:.3} - {:.3}, average: {:.3}",
            self.height_stats.min, self.height_stats.max, self.height_stats.mean
        );

        if let Some(stats) = &self.texture_stats {
            println!(
                "Percentile thresholds - low: {:.3} (40th), high: {:.3} (75th)",
                stats.thresholds.low, stats.thresholds.high
            );
            let names: Vec<String> = self
                .params
                .texture_layers
                .iter()
                .zip(stats.coverage.iter())
                .map(|(name, pct)| format!("{}: {:.1}%", name, pct))
                .collect();
            println!("Texture distribution - {}", names.join(", "));
        }

        if let Some(grass) = &self.grass {
            let covered = grass.iter().filter(|(_, _, &d)| d > 0).count();
            println!(
                "Grass coverage: {:.1}% of {} detail cells",
                100.0 * covered as f64 / grass.len() as f64,
                grass.len()
            );
        }

        for report in &self.scatter_reports {
            println!(
                "Placed {}: {}/{} ({:?} pass)",
                report.kind, report.placed, report.target, report.pass
            );
        }
    }
}
