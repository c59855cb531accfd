//! Event box geometry.
//!
//! Percentages are relative to one hour cell: 100% height is one hour row and
//! 100% width is one day column. Boxes taller than 100% run down into the
//! following rows, which is how duration is conveyed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::event::CalendarEvent;
use crate::models::week::DayItem;

/// Smallest box height so short events stay visible and clickable.
pub const MIN_BOX_SIZE: i64 = 40;
/// Width budget shared by stacked boxes; the rest of the cell stays clickable.
pub const STACK_WIDTH: f32 = 93.0;
/// Per-sibling left step for cells holding fewer than four boxes.
pub const BOX_POSITION_OFFSET: f32 = 26.0;
pub const SIDE_BY_SIDE_WIDTH: f32 = 80.0;
const PROPORTIONAL_STACK_MIN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSize {
    pub top_percent: f32,
    pub height_percent: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStack {
    pub left_percent: f32,
    pub width_percent: f32,
    pub z_index: u8,
}

/// How sibling boxes sharing one cell are spread horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StackingRule {
    /// Overlapping cascade: each box starts further right and runs to the
    /// common right edge.
    #[default]
    Cascade,
    /// Equal-width boxes next to each other.
    SideBySide,
}

fn percent_of_hour(minutes: i64) -> i64 {
    minutes * 100 / 60
}

/// Vertical placement of a box spanning `start..end` inside the row whose
/// column hour is `row_base_hour`.
pub fn box_size(start: NaiveDateTime, end: NaiveDateTime, row_base_hour: NaiveDateTime) -> BoxSize {
    let duration = (end - start).num_minutes().max(0);
    let height = percent_of_hour(duration).max(MIN_BOX_SIZE);

    let offset_minutes = (start - row_base_hour).num_minutes();
    let top = offset_minutes as f32 * 100.0 / 60.0;
    let top = if (0.0..=100.0).contains(&top) { top } else { 0.0 };

    BoxSize {
        top_percent: top,
        height_percent: height as f32,
    }
}

pub fn size_item<E: CalendarEvent>(item: &DayItem<'_, E>, row_base_hour: NaiveDateTime) -> BoxSize {
    box_size(item.start, item.end, row_base_hour)
}

/// Whether an item gets a box at all.
///
/// The trailing fragment of an event ending exactly at midnight has no length
/// on its day and is not drawn. Zero-length events keep a minimum-size box.
pub fn is_drawable<E: CalendarEvent>(item: &DayItem<'_, E>) -> bool {
    !(item.is_fragment() && item.start == item.end)
}

/// Horizontal placement of box `index` among `siblings` boxes in one cell.
///
/// An expanded box takes the full stack width and shifts left by the width it
/// gained so it does not run past the column's right edge.
pub fn box_stack(siblings: usize, index: usize, rule: StackingRule, expanded: bool) -> BoxStack {
    let siblings = siblings.max(1);
    let (left, width) = match rule {
        StackingRule::Cascade => {
            let left = if siblings >= PROPORTIONAL_STACK_MIN {
                (STACK_WIDTH / siblings as f32) * index as f32
            } else {
                BOX_POSITION_OFFSET * index as f32
            };
            (left, STACK_WIDTH - left)
        }
        StackingRule::SideBySide => {
            let width = SIDE_BY_SIDE_WIDTH / siblings as f32;
            (width * index as f32, width)
        }
    };

    if expanded {
        BoxStack {
            left_percent: (left - (STACK_WIDTH - width)).max(0.0),
            width_percent: STACK_WIDTH,
            z_index: 2,
        }
    } else {
        BoxStack {
            left_percent: left,
            width_percent: width,
            z_index: 1,
        }
    }
}

/// Whether activating box `index` should expand it rather than dispatch a click.
///
/// Singletons have nothing to reveal and the last sibling is already drawn on top.
pub fn can_expand(siblings: usize, index: usize) -> bool {
    siblings > 1 && index + 1 < siblings
}
