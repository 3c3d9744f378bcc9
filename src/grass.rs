//! Grass density layer
//!
//! A detail-resolution grid of per-cell grass densities, resampled from
//! the height grid. Grass grows on gentle mid-elevation terrain only,
//! with a coherent noise sample varying the density so meadows do not
//! look uniform.

use noise::{NoiseFn, Perlin, Seedable};

use crate::grid::Grid;
use crate::height::{lerp, slope_degrees};
use crate::params::GenerationParams;

/// Normalized height band that supports grass.
const GRASS_MIN_HEIGHT: f32 = 0.2;
const GRASS_MAX_HEIGHT: f32 = 0.6;
/// Maximum slope (degrees) that supports grass.
const GRASS_MAX_SLOPE: f32 = 18.0;
/// Coordinate scale of the density noise.
const GRASS_NOISE_SCALE: f64 = 6.0;
/// Hard cap on per-cell density.
const MAX_DENSITY: u8 = 16;

/// Build the grass density map at `params.detail_resolution`.
///
/// Each detail cell maps back to the nearest height-grid cell; cells in
/// the grass band get `grass_density` scaled by a noise draw in
/// [0.4, 1.0], everything else stays at zero.
pub fn grass_density_map(
    heights: &Grid<f32>,
    params: &GenerationParams,
    seed: u64,
) -> Grid<u8> {
    let res = params.detail_resolution.max(2);
    let perlin = Perlin::new(1).set_seed(seed as u32);
    let peak = params.grass_density.min(MAX_DENSITY);

    let mut map = Grid::new_with(res, res, 0u8);

    for gz in 0..res {
        for gx in 0..res {
            let u = gx as f32 / (res - 1) as f32;
            let v = gz as f32 / (res - 1) as f32;

            let ix = ((u * (params.width - 1) as f32).round() as usize).min(params.width - 1);
            let iz = ((v * (params.depth - 1) as f32).round() as usize).min(params.depth - 1);

            let h = *heights.get(ix, iz);
            if !(GRASS_MIN_HEIGHT..=GRASS_MAX_HEIGHT).contains(&h) {
                continue;
            }
            if slope_degrees(heights, params, ix, iz) > GRASS_MAX_SLOPE {
                continue;
            }

            let n = (perlin.get([
                u as f64 * GRASS_NOISE_SCALE,
                v as f64 * GRASS_NOISE_SCALE,
            ]) * 0.5
                + 0.5) as f32;
            let density = (peak as f32 * lerp(0.4, 1.0, n)).round() as u8;
            map.set(gx, gz, density.min(MAX_DENSITY));
        }
    }

    map
}
