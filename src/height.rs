//! Height grid synthesis
//!
//! Combines the base noise field, the island mask, and the mountain
//! signal into the normalized height grid every downstream stage reads.
//! The composition order is load-bearing: plains flattening runs before
//! mountain blending so flattened lowland is not re-roughened, and the
//! island mask is the final multiplicative step so it suppresses edges
//! uniformly regardless of mountain or plains content.

use crate::grid::Grid;
use crate::island::IslandMask;
use crate::noise_field::NoiseField;
use crate::params::GenerationParams;

/// Biased base-noise value above which mountain noise blends in.
const MOUNTAIN_ONSET: f32 = 0.4;
/// Amplification of the blended mountain contribution.
const MOUNTAIN_STRENGTH: f32 = 1.5;
/// Seed offset for the mountain noise generator.
const MOUNTAIN_SEED_OFFSET: u64 = 2222;

/// Distribution statistics for a generated height grid.
#[derive(Clone, Copy, Debug)]
pub struct HeightStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
}

/// Generate the normalized height grid for one island.
pub fn generate_height_grid(params: &GenerationParams, seed: u64) -> (Grid<f32>, HeightStats) {
    let base = NoiseField::new(seed, params.octaves, params.persistence, params.lacunarity);
    let mountain = NoiseField::mountain(seed.wrapping_add(MOUNTAIN_SEED_OFFSET));
    let mask = IslandMask::new(
        params.width,
        params.depth,
        params.island_radius,
        params.coast_smoothness,
    );

    let mut heights = Grid::new_with(params.width, params.depth, 0.0f32);
    let mut sum = 0.0f64;

    for x in 0..params.width {
        for z in 0..params.depth {
            let xc = x as f64 / params.width as f64 * params.noise_scale;
            let zc = z as f64 / params.depth as f64 * params.noise_scale;

            let base_noise = base.sample(xc, zc);
            // Mountains sample at doubled frequency for a rougher signal.
            let mountain_noise = mountain.sample(xc * 2.0, zc * 2.0) * params.mountain_scale;

            let h = compose(base_noise, mask.weight(x, z), mountain_noise, params);
            heights.set(x, z, h);
            sum += h as f64;
        }
    }

    let (min, max) = heights.min_max();
    let mean = (sum / heights.len() as f64) as f32;

    (heights, HeightStats { min, max, mean })
}

/// Combine one cell's noise samples into a final normalized height.
pub fn compose(
    base_noise: f32,
    island_mask: f32,
    mountain_noise: f32,
    params: &GenerationParams,
) -> f32 {
    // 1. Height curve: power >1 expands the low-lying proportion.
    let base = base_noise
        .clamp(0.0, 1.0)
        .powf(params.height_bias_power);

    // 2. Working terrain value.
    let mut terrain = base * params.base_height_multiplier;

    // 3. Plains pull: squared so the effect concentrates on the lowest band.
    let pull = ((params.plains_threshold - base) / params.plains_threshold.max(1e-4))
        .clamp(0.0, 1.0);
    let pull = pull * pull;
    terrain = lerp(
        terrain,
        params.plains_target_height,
        pull * params.plains_flatten_strength,
    );

    // 4. Mountain blend: linear ramp from the onset up to full strength.
    if base > MOUNTAIN_ONSET {
        let blend = (base - MOUNTAIN_ONSET) / (1.0 - MOUNTAIN_ONSET);
        terrain += mountain_noise * blend * MOUNTAIN_STRENGTH;
    }

    // 5. Island mask last, then clamp.
    (terrain * island_mask).clamp(0.0, 1.0)
}

/// Terrain slope in degrees at a grid cell, in world units.
pub fn slope_degrees(heights: &Grid<f32>, params: &GenerationParams, x: usize, z: usize) -> f32 {
    let (gx, gz) = world_gradient(heights, params, x, z);
    (gx * gx + gz * gz).sqrt().atan().to_degrees()
}

/// Upward surface normal at a grid cell, in world units.
pub fn surface_normal(
    heights: &Grid<f32>,
    params: &GenerationParams,
    x: usize,
    z: usize,
) -> [f32; 3] {
    let (gx, gz) = world_gradient(heights, params, x, z);
    let len = (gx * gx + 1.0 + gz * gz).sqrt();
    [-gx / len, 1.0 / len, -gz / len]
}

/// World-space height gradient (dh/dx, dh/dz) from clamped central
/// differences.
fn world_gradient(
    heights: &Grid<f32>,
    params: &GenerationParams,
    x: usize,
    z: usize,
) -> (f32, f32) {
    let ((dx, span_x), (dz, span_z)) = heights.central_diff(x, z);

    let spacing_x = params.width as f32 / (params.width.max(2) - 1) as f32;
    let spacing_z = params.depth as f32 / (params.depth.max(2) - 1) as f32;

    let gx = dx * params.height_scale / (span_x.max(1) as f32 * spacing_x);
    let gz = dz * params.height_scale / (span_z.max(1) as f32 * spacing_z);
    (gx, gz)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> GenerationParams {
        GenerationParams {
            width: 16,
            depth: 16,
            octaves: 2,
            persistence: 0.5,
            lacunarity: 2.0,
            island_radius: 0.9,
            ..GenerationParams::default()
        }
    }

    #[test]
    fn test_end_to_end_small_island() {
        let params = small_params();
        let (heights, stats) = generate_height_grid(&params, 12345);

        // Exactly width x depth values, all normalized.
        assert_eq!(heights.len(), 256);
        for (_, _, &h) in heights.iter() {
            assert!((0.0..=1.0).contains(&h), "height {} out of range", h);
        }
        assert!(stats.min >= 0.0 && stats.max <= 1.0);

        // The corners are beyond the island radius and must sit strictly
        // below the center cell.
        let center = *heights.get(8, 8);
        assert!(center > 0.0);
        for &(cx, cz) in &[(0, 0), (15, 0), (0, 15), (15, 15)] {
            assert!(*heights.get(cx, cz) < center);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let params = small_params();
        let (a, _) = generate_height_grid(&params, 777);
        let (b, _) = generate_height_grid(&params, 777);

        for ((_, _, &va), (_, _, &vb)) in a.iter().zip(b.iter()) {
            assert_eq!(va, vb);
        }
    }

    #[test]
    fn test_compose_masks_to_zero() {
        let params = GenerationParams::default();
        assert_eq!(compose(0.8, 0.0, 0.5, &params), 0.0);
    }

    #[test]
    fn test_compose_flattens_lowland_without_mountains() {
        let params = GenerationParams::default();
        // A value well below the mountain onset gets pulled toward the
        // plains target; mountain noise must not contribute.
        let with_mountains = compose(0.1, 1.0, 0.9, &params);
        let without = compose(0.1, 1.0, 0.0, &params);
        assert_eq!(with_mountains, without);
    }

    #[test]
    fn test_compose_blends_mountains_above_onset() {
        let params = GenerationParams::default();
        let calm = compose(0.9, 1.0, 0.0, &params);
        let rough = compose(0.9, 1.0, 0.4, &params);
        assert!(rough > calm);
    }

    #[test]
    fn test_slope_of_flat_grid_is_zero() {
        let params = small_params();
        let heights = Grid::new_with(16, 16, 0.5f32);
        assert_eq!(slope_degrees(&heights, &params, 8, 8), 0.0);

        let n = surface_normal(&heights, &params, 8, 8);
        assert!((n[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_slope_detects_incline() {
        let params = small_params();
        let mut heights = Grid::new_with(16, 16, 0.0f32);
        for x in 0..16 {
            for z in 0..16 {
                heights.set(x, z, x as f32 / 15.0);
            }
        }
        let slope = slope_degrees(&heights, &params, 8, 8);
        assert!(slope > 45.0, "steep ramp reported as {} degrees", slope);
    }
}
