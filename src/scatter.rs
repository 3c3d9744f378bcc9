//! Prop scattering
//!
//! Rejection sampling over random grid cells, constrained by height
//! band, slope, and minimum spacing within a category. Unsatisfiable
//! constraints never fail the generation: a relaxed second pass and a
//! small forced pass keep the output non-empty for diagnosis.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;
use crate::height::{slope_degrees, surface_normal};
use crate::params::{GenerationParams, ScatterConfig};

/// Attempt budget multiplier per requested placement.
const ATTEMPTS_PER_PLACEMENT: usize = 20;
/// Attempt budget floor.
const MIN_ATTEMPTS: usize = 200;
/// Relaxed-pass height window.
const RELAXED_MIN_HEIGHT: f32 = 0.02;
const RELAXED_MAX_HEIGHT: f32 = 0.98;
/// Relaxed-pass slope allowance added on top of the category cap.
const RELAXED_SLOPE_BONUS: f32 = 35.0;
/// Upper bound on forced placements.
const FORCED_LIMIT: usize = 10;

/// Prop category tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropKind {
    Tree,
    Rock,
}

impl std::fmt::Display for PropKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropKind::Tree => write!(f, "trees"),
            PropKind::Rock => write!(f, "rocks"),
        }
    }
}

/// One accepted placement, in world space.
#[derive(Clone, Debug)]
pub struct Placement {
    /// World position (x, y, z)
    pub position: [f32; 3],
    /// Up vector for the prop; the terrain normal when alignment is on
    pub normal: [f32; 3],
    /// Random yaw around the up axis, degrees
    pub yaw_deg: f32,
    /// Uniform scale, category multiplier already applied
    pub scale: f32,
    pub kind: PropKind,
}

/// Which pass produced a category's placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScatterPass {
    Primary,
    Relaxed,
    Forced,
}

/// Per-category outcome for diagnostics.
#[derive(Clone, Debug)]
pub struct ScatterReport {
    pub kind: PropKind,
    pub placed: usize,
    pub target: usize,
    pub pass: ScatterPass,
}

/// Scatter every configured category over the height grid.
pub fn scatter_props(
    heights: &Grid<f32>,
    params: &GenerationParams,
    seed: u64,
) -> (Vec<Placement>, Vec<ScatterReport>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut placements = Vec::new();
    let mut reports = Vec::new();

    for (kind, cfg) in [
        (PropKind::Tree, &params.trees),
        (PropKind::Rock, &params.rocks),
    ] {
        let (placed, report) = scatter_category(heights, params, cfg, kind, &mut rng);
        placements.extend(placed);
        reports.push(report);
    }

    (placements, reports)
}

/// Scatter one category via rejection sampling with fallback passes.
pub fn scatter_category(
    heights: &Grid<f32>,
    params: &GenerationParams,
    cfg: &ScatterConfig,
    kind: PropKind,
    rng: &mut ChaCha8Rng,
) -> (Vec<Placement>, ScatterReport) {
    let mut placed: Vec<Placement> = Vec::with_capacity(cfg.count);
    let mut pass = ScatterPass::Primary;

    if cfg.count == 0 {
        return (
            placed,
            ScatterReport {
                kind,
                placed: 0,
                target: 0,
                pass,
            },
        );
    }

    // Primary pass: full constraints, bounded attempts.
    let max_attempts = (cfg.count * ATTEMPTS_PER_PLACEMENT).max(MIN_ATTEMPTS);
    let min_spacing_sq = cfg.min_spacing * cfg.min_spacing;
    let mut attempts = 0;

    while placed.len() < cfg.count && attempts < max_attempts {
        attempts += 1;

        let x = rng.gen_range(0..params.width.max(1));
        let z = rng.gen_range(0..params.depth.max(1));
        let h = *heights.get(x, z);
        if h < cfg.min_height || h > cfg.max_height {
            continue;
        }
        if slope_degrees(heights, params, x, z) > cfg.max_slope_deg {
            continue;
        }

        let position = world_position(heights, params, x, z);
        if !is_far_enough(&placed, position, min_spacing_sq) {
            continue;
        }

        placed.push(make_placement(heights, params, cfg, kind, x, z, position, rng));
    }

    // Relaxed pass: wide height window, generous slope, no spacing.
    // Separates "constraints too strict" from upstream failures.
    if placed.is_empty() {
        println!(
            "[scatter] warning: {} primary pass placed 0/{} after {} attempts, retrying with relaxed constraints",
            kind, cfg.count, max_attempts
        );
        pass = ScatterPass::Relaxed;
        let relaxed_slope = cfg.max_slope_deg + RELAXED_SLOPE_BONUS;

        for _ in 0..cfg.count {
            let x = rng.gen_range(0..params.width.max(1));
            let z = rng.gen_range(0..params.depth.max(1));
            let h = *heights.get(x, z);
            if !(RELAXED_MIN_HEIGHT..=RELAXED_MAX_HEIGHT).contains(&h) {
                continue;
            }
            if slope_degrees(heights, params, x, z) > relaxed_slope {
                continue;
            }

            let position = world_position(heights, params, x, z);
            placed.push(make_placement(heights, params, cfg, kind, x, z, position, rng));
        }
    }

    // Forced pass: a handful of unconstrained placements as a
    // last-resort diagnostic signal.
    if placed.is_empty() {
        println!(
            "[scatter] warning: {} relaxed pass placed 0, forcing a small unconstrained batch",
            kind
        );
        pass = ScatterPass::Forced;

        for _ in 0..cfg.count.min(FORCED_LIMIT) {
            let x = rng.gen_range(0..params.width.max(1));
            let z = rng.gen_range(0..params.depth.max(1));
            let position = world_position(heights, params, x, z);
            let yaw_deg = rng.gen_range(0.0..360.0);
            let scale = rng.gen_range(0.9..1.2);
            placed.push(Placement {
                position,
                normal: [0.0, 1.0, 0.0],
                yaw_deg,
                scale,
                kind,
            });
        }
    }

    let report = ScatterReport {
        kind,
        placed: placed.len(),
        target: cfg.count,
        pass,
    };
    (placed, report)
}

/// Horizontal spacing check against every prior accepted placement.
/// O(n) per candidate; category targets are small.
fn is_far_enough(placed: &[Placement], candidate: [f32; 3], min_spacing_sq: f32) -> bool {
    placed.iter().all(|p| {
        let dx = p.position[0] - candidate[0];
        let dz = p.position[2] - candidate[2];
        dx * dx + dz * dz >= min_spacing_sq
    })
}

/// World-space position of a grid cell's surface point.
fn world_position(heights: &Grid<f32>, params: &GenerationParams, x: usize, z: usize) -> [f32; 3] {
    let u = (x as f32 / (params.width.max(2) - 1) as f32).clamp(0.0, 1.0);
    let v = (z as f32 / (params.depth.max(2) - 1) as f32).clamp(0.0, 1.0);
    [
        u * params.width as f32,
        *heights.get(x, z) * params.height_scale,
        v * params.depth as f32,
    ]
}

#[allow(clippy::too_many_arguments)]
fn make_placement(
    heights: &Grid<f32>,
    params: &GenerationParams,
    cfg: &ScatterConfig,
    kind: PropKind,
    x: usize,
    z: usize,
    position: [f32; 3],
    rng: &mut ChaCha8Rng,
) -> Placement {
    let yaw_deg = rng.gen_range(0.0..360.0);
    let normal = if params.align_to_normal {
        surface_normal(heights, params, x, z)
    } else {
        [0.0, 1.0, 0.0]
    };

    let lo = cfg.scale_range.0.min(cfg.scale_range.1);
    let hi = cfg.scale_range.0.max(cfg.scale_range.1);
    let drawn = if hi > lo { rng.gen_range(lo..hi) } else { lo };
    let scale = drawn * cfg.scale_multiplier;

    Placement {
        position,
        normal,
        yaw_deg,
        scale,
        kind,
    }
}
