//! Island terrain generation library
//!
//! Re-exports modules for use by binaries and tools.

pub mod export;
pub mod grass;
pub mod grid;
pub mod height;
pub mod island;
pub mod noise_field;
pub mod params;
pub mod scatter;
pub mod seeds;
pub mod texture;
pub mod world;
