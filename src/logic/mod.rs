//! Rally analysis logic: reconstruction, statistics, shot import.

mod analysis;
mod import;
mod rally;

pub use analysis::{analyze_rallies, analyze_shots};
pub use import::parse_shots_csv;
pub use rally::reconstruct_rallies;
