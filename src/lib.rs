pub mod aggregate;
pub mod breakdown;
pub mod brush;
pub mod chart;
pub mod cli;
pub mod error;
pub mod explorer;
pub mod export;
pub mod load;
pub mod model;
pub mod scale;
pub mod stats;
pub mod tooltip;
pub mod tui;
pub mod util;

pub use error::{LocvizError, Result};
