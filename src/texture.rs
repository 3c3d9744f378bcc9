//! Texture classification
//!
//! Turns the height grid into per-cell blend weights for the configured
//! texture layers. Thresholds are percentile-based so classification
//! adapts to the actual height distribution instead of fixed cutoffs.

use noise::{NoiseFn, Perlin, Seedable};

use crate::grid::Grid;
use crate::island::IslandMask;
use crate::params::GenerationParams;

/// Percentile for the low (sand) threshold.
const LOW_PERCENTILE: f32 = 0.4;
/// Percentile for the high (rock) threshold.
const HIGH_PERCENTILE: f32 = 0.75;
/// Grid-space slope above which rock weight ramps up.
const STEEP_SLOPE: f32 = 0.2;
/// Grid-space slope below which a cell counts as near-flat.
const FLAT_SLOPE: f32 = 0.05;
/// Normalized center distance beyond which the coastal boost applies.
const COAST_EDGE: f32 = 0.6;
/// Coordinate scale of the perturbation noise (coarser than the grid).
const NOISE_SCALE: f64 = 8.0;
/// Below this pre-normalization sum a cell is forced to full grass.
const WEIGHT_EPSILON: f32 = 1e-4;

/// Role convention for the first three texture layers. The weight
/// composition works in these roles and writes them out by index, so
/// hosts must order their layers accordingly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerRole {
    /// Layer 0: low-lying material
    Sand,
    /// Layer 1: mid-elevation cover
    Grass,
    /// Layer 2: high-elevation and steep material
    Rock,
}

impl LayerRole {
    pub fn index(self) -> usize {
        match self {
            LayerRole::Sand => 0,
            LayerRole::Grass => 1,
            LayerRole::Rock => 2,
        }
    }
}

/// Per-cell blend weights for N texture layers. Every cell's weights
/// sum to 1.0 after composition.
pub struct LayerWeights {
    pub width: usize,
    pub depth: usize,
    pub layer_count: usize,
    data: Vec<f32>,
}

impl LayerWeights {
    pub fn new(width: usize, depth: usize, layer_count: usize) -> Self {
        Self {
            width,
            depth,
            layer_count,
            data: vec![0.0; width * depth * layer_count],
        }
    }

    fn cell_index(&self, x: usize, z: usize) -> usize {
        let x = x.min(self.width - 1);
        let z = z.min(self.depth - 1);
        (z * self.width + x) * self.layer_count
    }

    pub fn get(&self, x: usize, z: usize, layer: usize) -> f32 {
        self.data[self.cell_index(x, z) + layer.min(self.layer_count - 1)]
    }

    /// All layer weights of one cell.
    pub fn cell(&self, x: usize, z: usize) -> &[f32] {
        let idx = self.cell_index(x, z);
        &self.data[idx..idx + self.layer_count]
    }

    fn set_cell(&mut self, x: usize, z: usize, weights: &[f32]) {
        let idx = self.cell_index(x, z);
        self.data[idx..idx + self.layer_count].copy_from_slice(weights);
    }
}

/// Adaptive height thresholds derived from the grid's distribution.
#[derive(Clone, Copy, Debug)]
pub struct Thresholds {
    /// Height at the 40th percentile
    pub low: f32,
    /// Height at the 75th percentile
    pub high: f32,
}

/// Classification statistics for diagnostics.
#[derive(Clone, Debug)]
pub struct TextureStats {
    pub thresholds: Thresholds,
    /// Mean coverage per layer, in percent
    pub coverage: Vec<f32>,
}

/// Derive the low/high thresholds as order statistics over all cells.
pub fn percentile_thresholds(heights: &Grid<f32>) -> Thresholds {
    let mut all: Vec<f32> = heights.iter().map(|(_, _, &h)| h).collect();
    all.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let n = all.len();
    let low_idx = ((n as f32 * LOW_PERCENTILE).round() as usize).min(n - 1);
    let high_idx = ((n as f32 * HIGH_PERCENTILE).round() as usize).min(n - 1);

    Thresholds {
        low: all[low_idx],
        high: all[high_idx],
    }
}

/// Compute blend weights for every cell of the height grid.
///
/// The caller must supply at least one texture layer; the first three
/// follow the [`LayerRole`] convention and any further layers stay at
/// zero weight.
pub fn classify(
    heights: &Grid<f32>,
    params: &GenerationParams,
    seed: u64,
) -> (LayerWeights, TextureStats) {
    let layer_count = params.texture_layers.len();
    debug_assert!(layer_count > 0, "classify requires at least one texture layer");

    let thresholds = percentile_thresholds(heights);
    let mask = IslandMask::new(
        params.width,
        params.depth,
        params.island_radius,
        params.coast_smoothness,
    );
    let perlin = Perlin::new(1).set_seed(seed as u32);

    let mut weights = LayerWeights::new(params.width, params.depth, layer_count);
    let mut coverage = vec![0.0f64; layer_count];
    let mut cell = vec![0.0f32; layer_count];
    let grass_idx = LayerRole::Grass.index().min(layer_count - 1);

    for z in 0..params.depth {
        for x in 0..params.width {
            cell.fill(0.0);

            // Beyond the coast: hard rule, 100% low-lying material.
            if mask.is_outside(x, z) {
                cell[LayerRole::Sand.index().min(layer_count - 1)] = 1.0;
                weights.set_cell(x, z, &cell);
                for (c, w) in coverage.iter_mut().zip(cell.iter()) {
                    *c += *w as f64;
                }
                continue;
            }

            let h = *heights.get(x, z);
            let (sand, grass, rock) = compose_roles(
                heights, params, &mask, &perlin, &thresholds, x, z, h,
            );

            let roles = [sand, grass, rock];
            for l in 0..layer_count.min(3) {
                cell[l] = roles[l].max(0.0);
            }

            let sum: f32 = cell.iter().sum();
            if sum < WEIGHT_EPSILON {
                cell.fill(0.0);
                cell[grass_idx] = 1.0;
            } else {
                for w in cell.iter_mut() {
                    *w /= sum;
                }
            }

            weights.set_cell(x, z, &cell);
            for (c, w) in coverage.iter_mut().zip(cell.iter()) {
                *c += *w as f64;
            }
        }
    }

    let cells = (params.width * params.depth) as f64;
    let coverage = coverage
        .into_iter()
        .map(|c| (c / cells * 100.0) as f32)
        .collect();

    (weights, TextureStats { thresholds, coverage })
}

/// Raw sand/grass/rock weights for an inside-the-island cell, before
/// renormalization.
#[allow(clippy::too_many_arguments)]
fn compose_roles(
    heights: &Grid<f32>,
    params: &GenerationParams,
    mask: &IslandMask,
    perlin: &Perlin,
    thresholds: &Thresholds,
    x: usize,
    z: usize,
    h: f32,
) -> (f32, f32, f32) {
    // Grid-space slope: central differences scaled by the grid dimensions.
    let ((dx, _), (dz, _)) = heights.central_diff(x, z);
    let gx = dx * params.width as f32;
    let gz = dz * params.depth as f32;
    let slope = (gx * gx + gz * gz).sqrt();

    // 1. Base split by percentile band.
    let (mut sand, mut grass, mut rock) = if h < thresholds.low {
        (0.6, 0.4, 0.0)
    } else if h > thresholds.high {
        (0.0, 0.3, 0.7)
    } else {
        (0.2, 0.7, 0.1)
    };

    // 2. Slope correction.
    if slope > STEEP_SLOPE {
        let bonus = ((slope - STEEP_SLOPE) * 5.0).clamp(0.0, 1.0);
        rock += bonus * 0.6;
        grass *= 1.0 - bonus * 0.4;
        sand *= 1.0 - bonus * 0.2;
    } else if slope < FLAT_SLOPE {
        if h < thresholds.low * 1.2 {
            sand += 0.3;
            grass *= 0.7;
            rock *= 0.5;
        } else {
            grass += 0.3;
            sand *= 0.7;
            rock *= 0.5;
        }
    }

    // 3. Coastal correction: distance here is relative to the half-grid,
    // not the island radius.
    let center_distance = mask.normalized_distance(x, z) * params.island_radius;
    if center_distance > COAST_EDGE && h < thresholds.high {
        let coast = (center_distance - COAST_EDGE) * 2.5;
        sand += coast * 0.5;
        grass *= 1.0 - coast * 0.3;
        rock *= 1.0 - coast * 0.2;
    }

    // 4. Coarse noise perturbation to break up band boundaries.
    let nx = x as f64 / params.width as f64 * NOISE_SCALE;
    let nz = z as f64 / params.depth as f64 * NOISE_SCALE;
    let n = (perlin.get([nx, nz]) * 0.5 + 0.5) as f32;

    if n > 0.65 {
        rock += 0.15;
        grass *= 0.9;
    } else if n < 0.35 {
        sand += 0.15;
        grass *= 0.9;
    } else {
        grass += 0.1;
    }

    (sand, grass, rock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height::generate_height_grid;

    fn small_params() -> GenerationParams {
        GenerationParams {
            width: 32,
            depth: 32,
            ..GenerationParams::default()
        }
    }

    #[test]
    fn test_percentiles_are_exact_order_statistics() {
        // 100 cells holding 0.00, 0.01, ..., 0.99: the thresholds must be
        // the values at the 40th and 75th indices exactly.
        let mut grid = Grid::new_with(10, 10, 0.0f32);
        for i in 0..100 {
            grid.set(i % 10, i / 10, i as f32 * 0.01);
        }

        let t = percentile_thresholds(&grid);
        assert!((t.low - 0.40).abs() < 1e-6);
        assert!((t.high - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let params = small_params();
        let (heights, _) = generate_height_grid(&params, 42);
        let (weights, _) = classify(&heights, &params, 43);

        for z in 0..params.depth {
            for x in 0..params.width {
                let sum: f32 = weights.cell(x, z).iter().sum();
                assert!(
                    (sum - 1.0).abs() < 1e-4,
                    "cell ({}, {}) sums to {}",
                    x,
                    z,
                    sum
                );
                for &w in weights.cell(x, z) {
                    assert!(w >= 0.0);
                }
            }
        }
    }

    #[test]
    fn test_outside_island_is_all_sand() {
        let params = small_params();
        let (heights, _) = generate_height_grid(&params, 7);
        let (weights, _) = classify(&heights, &params, 8);

        // Grid corners lie beyond the island radius.
        let corner = weights.cell(0, 0);
        assert_eq!(corner[LayerRole::Sand.index()], 1.0);
        assert_eq!(corner[LayerRole::Grass.index()], 0.0);
        assert_eq!(corner[LayerRole::Rock.index()], 0.0);
    }

    #[test]
    fn test_two_layer_config_still_normalizes() {
        let mut params = small_params();
        params.texture_layers = vec!["sand".to_string(), "grass".to_string()];

        let (heights, _) = generate_height_grid(&params, 11);
        let (weights, _) = classify(&heights, &params, 12);

        assert_eq!(weights.layer_count, 2);
        for z in 0..params.depth {
            for x in 0..params.width {
                let sum: f32 = weights.cell(x, z).iter().sum();
                assert!((sum - 1.0).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_coverage_totals_one_hundred_percent() {
        let params = small_params();
        let (heights, _) = generate_height_grid(&params, 21);
        let (_, stats) = classify(&heights, &params, 22);

        let total: f32 = stats.coverage.iter().sum();
        assert!((total - 100.0).abs() < 0.1, "coverage totals {}", total);
        assert!(stats.thresholds.low <= stats.thresholds.high);
    }
}
