//! Generation parameters
//!
//! One immutable record configures a full generation pass. Values are
//! serde-friendly so a parameter set can be loaded from a JSON file and
//! shared alongside its seed.

use serde::{Deserialize, Serialize};

/// Parameters for one island generation pass.
///
/// Grid cells double as world units: a 256-cell-wide grid spans 256
/// world units horizontally, with `height_scale` setting the vertical
/// extent of a normalized height of 1.0.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    /// Grid width in cells (and world units)
    pub width: usize,
    /// Grid depth in cells (and world units)
    pub depth: usize,
    /// Vertical world extent of a normalized height of 1.0
    pub height_scale: f32,
    /// Noise coordinate scale (lower = larger features)
    pub noise_scale: f64,
    /// Number of noise octaves for the base terrain
    pub octaves: u32,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f64,
    /// Frequency multiplier per octave
    pub lacunarity: f64,
    /// Island extent as a fraction of the half-grid
    pub island_radius: f32,
    /// Width of the smoothed coastline band
    pub coast_smoothness: f32,
    /// Mountain noise amplitude
    pub mountain_scale: f32,
    /// Multiplier applied to the biased base noise
    pub base_height_multiplier: f32,
    /// Heights below this band are pulled toward the plains target
    pub plains_threshold: f32,
    /// Normalized target height for flattened plains
    pub plains_target_height: f32,
    /// Strength of the plains pull (0.0-1.0)
    pub plains_flatten_strength: f32,
    /// Height curve exponent (>1 expands low-lying area)
    pub height_bias_power: f32,
    /// Ordered texture layer names; index 0 is the low-lying material
    pub texture_layers: Vec<String>,
    /// Resolution of the grass density map
    pub detail_resolution: usize,
    /// Peak grass density per detail cell (0-16)
    pub grass_density: u8,
    /// Rotate placed props to the local terrain normal
    pub align_to_normal: bool,
    /// Tree placement constraints
    pub trees: ScatterConfig,
    /// Rock placement constraints
    pub rocks: ScatterConfig,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            width: 256,
            depth: 256,
            height_scale: 100.0,
            noise_scale: 15.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            island_radius: 0.9,
            coast_smoothness: 0.15,
            mountain_scale: 1.2,
            base_height_multiplier: 1.5,
            plains_threshold: 0.45,
            plains_target_height: 0.28,
            plains_flatten_strength: 0.65,
            height_bias_power: 1.25,
            texture_layers: vec![
                "sand".to_string(),
                "grass".to_string(),
                "rock".to_string(),
            ],
            detail_resolution: 512,
            grass_density: 16,
            align_to_normal: true,
            trees: ScatterConfig::trees(),
            rocks: ScatterConfig::rocks(),
        }
    }
}

/// Placement constraints for one prop category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScatterConfig {
    /// Target number of placements
    pub count: usize,
    /// Minimum normalized height
    pub min_height: f32,
    /// Maximum normalized height
    pub max_height: f32,
    /// Maximum terrain slope in degrees
    pub max_slope_deg: f32,
    /// Minimum world-space spacing between placements of this category
    pub min_spacing: f32,
    /// Uniform scale draw range
    pub scale_range: (f32, f32),
    /// Category-wide scale multiplier
    pub scale_multiplier: f32,
}

impl ScatterConfig {
    pub fn trees() -> Self {
        Self {
            count: 300,
            min_height: 0.25,
            max_height: 0.7,
            max_slope_deg: 25.0,
            min_spacing: 3.0,
            scale_range: (0.85, 1.2),
            scale_multiplier: 1.0,
        }
    }

    pub fn rocks() -> Self {
        Self {
            count: 150,
            min_height: 0.35,
            max_height: 1.0,
            max_slope_deg: 35.0,
            min_spacing: 7.0,
            scale_range: (0.6, 1.1),
            scale_multiplier: 0.25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_profile() {
        let params = GenerationParams::default();
        assert_eq!(params.width, 256);
        assert_eq!(params.octaves, 4);
        assert_eq!(params.texture_layers.len(), 3);
        assert!(params.height_bias_power > 1.0);
    }

    #[test]
    fn test_params_json_roundtrip() {
        let params = GenerationParams::default();
        let json = serde_json::to_string(&params).unwrap();
        let back: GenerationParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width, params.width);
        assert_eq!(back.trees.count, params.trees.count);
        assert_eq!(back.rocks.min_spacing, params.rocks.min_spacing);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: GenerationParams = serde_json::from_str(r#"{"width": 64}"#).unwrap();
        assert_eq!(params.width, 64);
        assert_eq!(params.depth, 256);
        assert_eq!(params.grass_density, 16);
    }
}
