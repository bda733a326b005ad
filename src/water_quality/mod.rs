mod analysis;

pub use analysis::{analyze_water, estimate_minerals, MineralEstimate};
