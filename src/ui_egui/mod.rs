// egui presentation shell
// Widget, expansion state and the demo application hosting them

pub mod app;
pub mod expansion;
pub mod filter;
pub mod views;
pub mod widget;

pub use app::CalendarApp;
pub use expansion::{Activation, BoxKey, ExpansionState};
pub use filter::FilterSelect;
pub use widget::{CalendarResponse, CalendarState, EventClick, WeeklyCalendar};
