// Settings module
// Widget settings persisted as TOML by the settings service

use serde::{Deserialize, Serialize};

use crate::services::layout::StackingRule;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// US calendar: Sunday week start, 12-hour labels, English names.
    pub usa_calendar: bool,
    /// Show Saturday and Sunday columns.
    pub weekends: bool,
    pub header_sticky: bool,
    pub stacking: StackingRule,
    /// Hour row scrolled into view when the grid first appears.
    pub scroll_to_hour: u32,
    /// Seconds before an expanded event box collapses on its own.
    pub collapse_after_secs: u64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            usa_calendar: false,
            weekends: false,
            header_sticky: false,
            stacking: StackingRule::default(),
            scroll_to_hour: 6,
            collapse_after_secs: 3,
        }
    }
}
