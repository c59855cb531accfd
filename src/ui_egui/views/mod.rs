pub mod header;
pub mod palette;
pub mod utils;
pub mod week_grid;

pub use header::{FilterSlot, HeaderView};
pub use week_grid::{GridConfig, WeekGridView};
