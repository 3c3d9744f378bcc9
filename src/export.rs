//! PNG export of generated artifacts
//!
//! Preview images for inspecting a generation pass outside the host:
//! grayscale heights, a splat composite, and a placement overlay.

use image::{ImageBuffer, Luma, Rgb, RgbImage};

use crate::grid::Grid;
use crate::params::GenerationParams;
use crate::scatter::{Placement, PropKind};
use crate::texture::LayerWeights;

/// Representative colors for the first three layer roles (sand, grass,
/// rock). Layers beyond three render as mid-gray.
const ROLE_COLORS: [[u8; 3]; 3] = [[194, 178, 128], [86, 125, 70], [115, 115, 115]];
const EXTRA_LAYER_COLOR: [u8; 3] = [128, 128, 128];

/// Export the height grid as a grayscale PNG.
pub fn export_heightmap(heights: &Grid<f32>, path: &str) -> Result<(), image::ImageError> {
    let img = ImageBuffer::from_fn(heights.width as u32, heights.depth as u32, |x, z| {
        let h = heights.get(x as usize, z as usize).clamp(0.0, 1.0);
        Luma([(h * 255.0) as u8])
    });
    img.save(path)
}

/// Export the blend weights as a color composite PNG.
pub fn export_splat_map(weights: &LayerWeights, path: &str) -> Result<(), image::ImageError> {
    let img = ImageBuffer::from_fn(weights.width as u32, weights.depth as u32, |x, z| {
        let cell = weights.cell(x as usize, z as usize);
        let mut rgb = [0.0f32; 3];
        for (l, &w) in cell.iter().enumerate() {
            let color = ROLE_COLORS.get(l).unwrap_or(&EXTRA_LAYER_COLOR);
            for c in 0..3 {
                rgb[c] += color[c] as f32 * w;
            }
        }
        Rgb([
            rgb[0].clamp(0.0, 255.0) as u8,
            rgb[1].clamp(0.0, 255.0) as u8,
            rgb[2].clamp(0.0, 255.0) as u8,
        ])
    });
    img.save(path)
}

/// Export shaded terrain with prop markers: green for trees, dark gray
/// for rocks.
pub fn export_placement_map(
    heights: &Grid<f32>,
    placements: &[Placement],
    params: &GenerationParams,
    path: &str,
) -> Result<(), image::ImageError> {
    let width = heights.width as u32;
    let depth = heights.depth as u32;

    let mut img: RgbImage = ImageBuffer::from_fn(width, depth, |x, z| {
        let h = heights.get(x as usize, z as usize).clamp(0.0, 1.0);
        let shade = (60.0 + h * 180.0) as u8;
        Rgb([shade, shade, shade])
    });

    for p in placements {
        let px = (p.position[0] / params.width as f32 * (width - 1) as f32).round() as i64;
        let pz = (p.position[2] / params.depth as f32 * (depth - 1) as f32).round() as i64;
        let color = match p.kind {
            PropKind::Tree => Rgb([40, 160, 60]),
            PropKind::Rock => Rgb([70, 70, 80]),
        };

        for dz in -1i64..=1 {
            for dx in -1i64..=1 {
                let nx = px + dx;
                let nz = pz + dz;
                if nx >= 0 && nx < width as i64 && nz >= 0 && nz < depth as i64 {
                    img.put_pixel(nx as u32, nz as u32, color);
                }
            }
        }
    }

    img.save(path)
}
