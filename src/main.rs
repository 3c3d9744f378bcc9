use clap::Parser;

mod export;
mod grass;
mod grid;
mod height;
mod island;
mod noise_field;
mod params;
mod scatter;
mod seeds;
mod texture;
mod world;

use params::GenerationParams;
use seeds::GenSeeds;

#[derive(Parser, Debug)]
#[command(name = "island_generator")]
#[command(about = "Generate procedural island terrain with texture blending and prop placement")]
struct Args {
    /// Grid width in cells (overrides the parameter file)
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Grid depth in cells (overrides the parameter file)
    #[arg(short = 'D', long)]
    depth: Option<usize>,

    /// Master seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Load generation parameters from a JSON file
    #[arg(short, long)]
    params: Option<String>,

    /// Target tree count (overrides the parameter file)
    #[arg(long)]
    trees: Option<usize>,

    /// Target rock count (overrides the parameter file)
    #[arg(long)]
    rocks: Option<usize>,

    /// Export the height grid as a grayscale PNG
    #[arg(long)]
    export_heightmap: Option<String>,

    /// Export the texture blend weights as a color PNG
    #[arg(long)]
    export_splat: Option<String>,

    /// Export shaded terrain with prop markers as a PNG
    #[arg(long)]
    export_props: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut params = match &args.params {
        Some(path) => match load_params(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to load parameters from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GenerationParams::default(),
    };

    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(depth) = args.depth {
        params.depth = depth;
    }
    if let Some(trees) = args.trees {
        params.trees.count = trees;
    }
    if let Some(rocks) = args.rocks {
        params.rocks.count = rocks;
    }

    let master = args.seed.unwrap_or_else(rand::random);
    let seeds = GenSeeds::from_master(master);

    println!("Generating island with seed: {}", master);
    println!("Grid size: {}x{}", params.width, params.depth);

    println!("Generating height grid...");
    println!("Classifying textures and scattering props...");
    let island = world::generate(&params, &seeds);

    island.analyze();

    if let Some(path) = &args.export_heightmap {
        if let Err(e) = export::export_heightmap(&island.heights, path) {
            eprintln!("Failed to export heightmap: {}", e);
        } else {
            println!("Heightmap exported to {}", path);
        }
    }

    if let Some(path) = &args.export_splat {
        match &island.layers {
            Some(layers) => {
                if let Err(e) = export::export_splat_map(layers, path) {
                    eprintln!("Failed to export splat map: {}", e);
                } else {
                    println!("Splat map exported to {}", path);
                }
            }
            None => eprintln!("No texture layers configured, skipping splat export"),
        }
    }

    if let Some(path) = &args.export_props {
        if let Err(e) =
            export::export_placement_map(&island.heights, &island.placements, &params, path)
        {
            eprintln!("Failed to export placement map: {}", e);
        } else {
            println!("Placement map exported to {}", path);
        }
    }
}

fn load_params(path: &str) -> Result<GenerationParams, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
