//! Expand-on-click state for stacked event boxes.
//!
//! At most one box is expanded at a time. The expanded state carries its own
//! collapse deadline; leaving it (outside press, timeout, week change) drops the
//! whole [`Expansion`] value. Clicking the expanded box dispatches and leaves it
//! expanded.

use std::time::Duration;

use crate::models::week::DayOfWeek;
use crate::services::layout::can_expand;

/// Identifies one drawn box: the same event can appear on several days.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoxKey {
    pub event_id: String,
    pub day: DayOfWeek,
    pub row: usize,
}

impl BoxKey {
    pub fn new(event_id: impl Into<String>, day: DayOfWeek, row: usize) -> Self {
        Self {
            event_id: event_id.into(),
            day,
            row,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub key: BoxKey,
    /// Collapse time, in seconds on the egui input clock.
    pub deadline: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExpansionState {
    #[default]
    Collapsed,
    Expanded(Expansion),
}

/// What a click on a box should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Bring the box to the front at full width.
    Expand,
    /// Hand the event to the host.
    Dispatch,
}

impl ExpansionState {
    pub fn is_expanded(&self, key: &BoxKey) -> bool {
        matches!(self, ExpansionState::Expanded(expansion) if &expansion.key == key)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ExpansionState::Expanded(_))
    }

    pub fn activate(
        &mut self,
        key: BoxKey,
        siblings: usize,
        index: usize,
        now: f64,
        collapse_after: Duration,
    ) -> Activation {
        // The expanded box keeps its original deadline.
        if self.is_expanded(&key) {
            return Activation::Dispatch;
        }

        if can_expand(siblings, index) {
            log::debug!("Expanding event box {:?}", key);
            *self = ExpansionState::Expanded(Expansion {
                key,
                deadline: now + collapse_after.as_secs_f64(),
            });
            Activation::Expand
        } else {
            self.clear();
            Activation::Dispatch
        }
    }

    /// A press landed somewhere other than the expanded box.
    pub fn pointer_pressed_outside(&mut self) {
        self.clear();
    }

    /// Collapse once the deadline has passed. Returns true when it collapsed.
    pub fn tick(&mut self, now: f64) -> bool {
        let expired =
            matches!(self, ExpansionState::Expanded(expansion) if now >= expansion.deadline);
        if expired {
            log::debug!("Event box collapsed after timeout");
            self.clear();
        }
        expired
    }

    /// Seconds until auto-collapse, used to schedule the next repaint.
    pub fn time_remaining(&self, now: f64) -> Option<f64> {
        match self {
            ExpansionState::Expanded(expansion) => Some((expansion.deadline - now).max(0.0)),
            ExpansionState::Collapsed => None,
        }
    }

    pub fn clear(&mut self) {
        *self = ExpansionState::Collapsed;
    }
}
