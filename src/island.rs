//! Island mask
//!
//! Radial falloff from the grid center, normalized by the configured
//! island radius and smoothed across the coastline band. The mask is
//! the final multiplicative step of height composition, so it must be
//! 1.0 across the interior and reach 0.0 beyond the coast.

/// Radial falloff weight based on distance from the grid center.
pub struct IslandMask {
    center_x: f32,
    center_z: f32,
    max_distance: f32,
    coast_smoothness: f32,
}

impl IslandMask {
    pub fn new(width: usize, depth: usize, island_radius: f32, coast_smoothness: f32) -> Self {
        Self {
            center_x: width as f32 * 0.5,
            center_z: depth as f32 * 0.5,
            max_distance: (width.min(depth) as f32 * 0.5 * island_radius).max(1e-4),
            coast_smoothness,
        }
    }

    /// Distance from the grid center, normalized so 1.0 is the island
    /// radius. Values above 1.0 are beyond the coast.
    pub fn normalized_distance(&self, x: usize, z: usize) -> f32 {
        let dx = x as f32 - self.center_x;
        let dz = z as f32 - self.center_z;
        (dx * dx + dz * dz).sqrt() / self.max_distance
    }

    /// Hard outside-the-island test used by the texture classifier.
    pub fn is_outside(&self, x: usize, z: usize) -> bool {
        self.normalized_distance(x, z) > 1.0
    }

    /// Falloff weight in [0, 1]: 1.0 across the interior, 0.0 beyond
    /// the coast, cubic-smooth across the coastline band.
    pub fn weight(&self, x: usize, z: usize) -> f32 {
        let inland = (1.0 - self.normalized_distance(x, z)).clamp(0.0, 1.0);
        smooth_step(0.0, self.coast_smoothness, inland)
    }
}

/// Smooth step interpolation: 0 below `edge0`, 1 above `edge1`,
/// cubic-smooth in between.
pub fn smooth_step(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 - edge0 <= f32::EPSILON {
        return if x >= edge1 { 1.0 } else { 0.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_weight_is_full() {
        let mask = IslandMask::new(256, 256, 0.9, 0.15);
        assert_eq!(mask.weight(128, 128), 1.0);
    }

    #[test]
    fn test_corners_are_outside() {
        let mask = IslandMask::new(256, 256, 0.9, 0.15);
        assert!(mask.is_outside(0, 0));
        assert!(mask.is_outside(255, 255));
        assert_eq!(mask.weight(0, 0), 0.0);
    }

    #[test]
    fn test_falloff_is_monotonic() {
        let mask = IslandMask::new(256, 256, 0.9, 0.15);

        // Walk outward from the center along one axis; the weight must
        // never increase with distance.
        let mut prev = mask.weight(128, 128);
        for x in 129..256 {
            let w = mask.weight(x, 128);
            assert!(
                w <= prev + 1e-6,
                "weight increased from {} to {} at x={}",
                prev,
                w,
                x
            );
            prev = w;
        }
    }

    #[test]
    fn test_smooth_step_edges() {
        assert_eq!(smooth_step(0.0, 1.0, -0.5), 0.0);
        assert_eq!(smooth_step(0.0, 1.0, 1.5), 1.0);
        assert_eq!(smooth_step(0.0, 1.0, 0.5), 0.5);

        // Degenerate band behaves like a hard threshold.
        assert_eq!(smooth_step(0.2, 0.2, 0.1), 0.0);
        assert_eq!(smooth_step(0.2, 0.2, 0.3), 1.0);
    }

    #[test]
    fn test_interior_reaches_full_weight() {
        // Any cell whose inverted distance clears the coast band gets
        // weight 1.0, not a fraction of the band width.
        let mask = IslandMask::new(64, 64, 0.9, 0.15);
        assert_eq!(mask.weight(32, 40), 1.0);
    }
}
