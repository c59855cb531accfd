//! Painter-based hour grid with absolutely positioned event boxes.

use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime};
use egui::text::LayoutJob;
use egui::{Align2, CursorIcon, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::palette::{EventColors, GridPalette};
use super::utils::{format_event_tooltip, format_span};
use crate::models::event::CalendarEvent;
use crate::models::week::{DayItem, HourRow};
use crate::services::grid::{is_current_hour, DayColumn};
use crate::services::layout::{box_stack, is_drawable, size_item, StackingRule};
use crate::services::locale::LocaleConfig;
use crate::ui_egui::expansion::{Activation, BoxKey, ExpansionState};

pub const ROW_HEIGHT: f32 = 48.0;
pub const HOUR_COLUMN_WIDTH: f32 = 64.0;
pub const COLUMN_HEADER_HEIGHT: f32 = 36.0;
const MIN_COLUMN_WIDTH: f32 = 72.0;
const BOX_ROUNDING: f32 = 5.0;
const BOX_TEXT_PADDING: Vec2 = Vec2::new(5.0, 3.0);

pub struct GridConfig<'c> {
    pub id: egui::Id,
    pub locale: &'c LocaleConfig,
    pub stacking: StackingRule,
    pub header_sticky: bool,
    /// Scroll offset to apply this frame, in rows.
    pub scroll_to_row: Option<usize>,
    pub collapse_after: Duration,
    pub event_colors: EventColors,
    pub columns: &'c [DayColumn],
}

struct PlacedBox<'v, E> {
    item: DayItem<'v, E>,
    key: BoxKey,
    rect: Rect,
    z_index: u8,
    siblings: usize,
    index: usize,
}

pub struct WeekGridView;

impl WeekGridView {
    /// Draw the grid and return the item whose click should reach the host.
    pub fn show<'v, E: CalendarEvent>(
        ui: &mut egui::Ui,
        rows: &[HourRow<'v, E>],
        expansion: &mut ExpansionState,
        config: &GridConfig<'_>,
        palette: &GridPalette,
    ) -> Option<DayItem<'v, E>> {
        let column_count = config.columns.len().max(1) as f32;
        let column_width = ((ui.available_width()
            - HOUR_COLUMN_WIDTH
            - ui.spacing().scroll.bar_width)
            / column_count)
            .max(MIN_COLUMN_WIDTH);
        let today = Local::now().date_naive();

        if config.header_sticky {
            Self::column_header(ui, config.columns, column_width, today, palette);
        }

        let mut area = egui::ScrollArea::vertical()
            .id_source(config.id.with("scroll"))
            .auto_shrink([false, false]);
        if let Some(row) = config.scroll_to_row {
            let header = if config.header_sticky {
                0.0
            } else {
                COLUMN_HEADER_HEIGHT
            };
            area = area.vertical_scroll_offset(header + row as f32 * ROW_HEIGHT);
        }

        area.show(ui, |ui| {
            if !config.header_sticky {
                Self::column_header(ui, config.columns, column_width, today, palette);
            }
            Self::grid(ui, rows, expansion, config, palette, column_width)
        })
        .inner
    }

    fn column_header(
        ui: &mut egui::Ui,
        columns: &[DayColumn],
        column_width: f32,
        today: NaiveDate,
        palette: &GridPalette,
    ) {
        let size = Vec2::new(
            HOUR_COLUMN_WIDTH + column_width * columns.len() as f32,
            COLUMN_HEADER_HEIGHT,
        );
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, palette.header_bg);

        for (i, column) in columns.iter().enumerate() {
            let left = rect.left() + HOUR_COLUMN_WIDTH + column_width * i as f32;
            let cell = Rect::from_min_size(
                Pos2::new(left, rect.top()),
                Vec2::new(column_width, COLUMN_HEADER_HEIGHT),
            );
            let font = if column.date == today {
                FontId::proportional(14.0)
            } else {
                FontId::proportional(13.0)
            };
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                &column.title,
                font,
                palette.header_text,
            );
            painter.line_segment(
                [cell.left_top(), cell.left_bottom()],
                Stroke::new(1.0, palette.line),
            );
        }
        painter.line_segment(
            [rect.left_bottom(), rect.right_bottom()],
            Stroke::new(1.0, palette.line),
        );
    }

    fn grid<'v, E: CalendarEvent>(
        ui: &mut egui::Ui,
        rows: &[HourRow<'v, E>],
        expansion: &mut ExpansionState,
        config: &GridConfig<'_>,
        palette: &GridPalette,
        column_width: f32,
    ) -> Option<DayItem<'v, E>> {
        let size = Vec2::new(
            HOUR_COLUMN_WIDTH + column_width * config.columns.len() as f32,
            ROW_HEIGHT * rows.len() as f32,
        );
        let (grid_rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let now = Local::now().naive_local();
        let clock = ui.input(|i| i.time);

        Self::paint_rows(ui, grid_rect, rows, config, palette, column_width, now);

        expansion.tick(clock);
        let mut boxes = Self::place_boxes(grid_rect, rows, expansion, config, column_width);

        if expansion.is_active() {
            let expanded_rect = boxes
                .iter()
                .find(|placed| expansion.is_expanded(&placed.key))
                .map(|placed| placed.rect);
            let pressed_outside = ui.input(|i| {
                i.pointer.any_pressed()
                    && i
                        .pointer
                        .interact_pos()
                        .is_some_and(|pos| expanded_rect.map_or(true, |r| !r.contains(pos)))
            });
            if pressed_outside || expanded_rect.is_none() {
                expansion.pointer_pressed_outside();
                boxes = Self::place_boxes(grid_rect, rows, expansion, config, column_width);
            }
        }

        let painter = ui.painter_at(grid_rect);
        let mut clicked = None;
        for placed in &boxes {
            let event = placed.item.event;
            let colors = config
                .event_colors
                .resolve(event.background_color(), event.text_color());
            painter.rect(
                placed.rect,
                Rounding::same(BOX_ROUNDING),
                colors.fill,
                Stroke::new(1.0, colors.border),
            );

            let (start, end) = placed.item.display_span();
            let label = match event.title().filter(|t| !t.is_empty()) {
                Some(title) => format!("{}\n{}", title, format_span(start, end)),
                None => format_span(start, end),
            };
            let job = LayoutJob::simple(
                label,
                FontId::proportional(12.0),
                colors.text,
                (placed.rect.width() - 2.0 * BOX_TEXT_PADDING.x).max(0.0),
            );
            let galley = ui.fonts(|f| f.layout_job(job));
            painter
                .with_clip_rect(placed.rect.intersect(grid_rect))
                .galley(placed.rect.min + BOX_TEXT_PADDING, galley, colors.text);

            let response = ui
                .interact(placed.rect, config.id.with(&placed.key), Sense::click())
                .on_hover_cursor(CursorIcon::PointingHand)
                .on_hover_text(format_event_tooltip(&placed.item, config.locale));
            if response.clicked() {
                clicked = Some(placed);
            }
        }

        let mut dispatched = None;
        if let Some(placed) = clicked {
            let activation = expansion.activate(
                placed.key.clone(),
                placed.siblings,
                placed.index,
                clock,
                config.collapse_after,
            );
            match activation {
                Activation::Expand => ui.ctx().request_repaint(),
                Activation::Dispatch => dispatched = Some(placed.item),
            }
        }

        if let Some(remaining) = expansion.time_remaining(clock) {
            ui.ctx()
                .request_repaint_after(Duration::from_secs_f64(remaining));
        }

        dispatched
    }

    fn paint_rows<E>(
        ui: &egui::Ui,
        grid_rect: Rect,
        rows: &[HourRow<'_, E>],
        config: &GridConfig<'_>,
        palette: &GridPalette,
        column_width: f32,
        now: NaiveDateTime,
    ) {
        let painter = ui.painter_at(grid_rect);
        let line = Stroke::new(1.0, palette.line);

        for (i, row) in rows.iter().enumerate() {
            let top = grid_rect.top() + ROW_HEIGHT * i as f32;
            let hour_rect = Rect::from_min_size(
                Pos2::new(grid_rect.left(), top),
                Vec2::new(HOUR_COLUMN_WIDTH, ROW_HEIGHT),
            );
            painter.rect_filled(hour_rect, Rounding::ZERO, palette.hour_bg);
            painter.text(
                hour_rect.right_top() + Vec2::new(-6.0, 4.0),
                Align2::RIGHT_TOP,
                &row.label,
                FontId::proportional(11.0),
                palette.hour_text,
            );

            for (j, cell) in row.cells.iter().enumerate() {
                let cell_rect = Self::cell_rect(grid_rect, i, j, column_width);
                let fill = if cell.day.is_weekend() {
                    palette.weekend_bg
                } else {
                    palette.cell_bg
                };
                painter.rect_filled(cell_rect, Rounding::ZERO, fill);
                painter.line_segment([cell_rect.left_top(), cell_rect.left_bottom()], line);
            }

            if is_current_hour(row.hour, now, config.locale.week_start_day()) {
                let band = Rect::from_min_max(
                    Pos2::new(grid_rect.left(), top),
                    Pos2::new(grid_rect.right(), top + ROW_HEIGHT),
                );
                painter.rect_filled(band, Rounding::ZERO, palette.current_hour_bg);
            }

            painter.line_segment(
                [
                    Pos2::new(grid_rect.left(), top),
                    Pos2::new(grid_rect.right(), top),
                ],
                line,
            );
        }
    }

    fn cell_rect(grid_rect: Rect, row: usize, column: usize, column_width: f32) -> Rect {
        Rect::from_min_size(
            Pos2::new(
                grid_rect.left() + HOUR_COLUMN_WIDTH + column_width * column as f32,
                grid_rect.top() + ROW_HEIGHT * row as f32,
            ),
            Vec2::new(column_width, ROW_HEIGHT),
        )
    }

    /// Every drawable box, ordered bottom to top.
    fn place_boxes<'v, E: CalendarEvent>(
        grid_rect: Rect,
        rows: &[HourRow<'v, E>],
        expansion: &ExpansionState,
        config: &GridConfig<'_>,
        column_width: f32,
    ) -> Vec<PlacedBox<'v, E>> {
        let mut boxes = Vec::new();

        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.cells.iter().enumerate() {
                let cell_rect = Self::cell_rect(grid_rect, i, j, column_width);
                let items: Vec<DayItem<'v, E>> =
                    cell.items.iter().copied().filter(|item| is_drawable(item)).collect();
                let siblings = items.len();

                for (index, item) in items.into_iter().enumerate() {
                    let key = BoxKey::new(item.id(), cell.day, row.index);
                    let size = size_item(&item, cell.column_hour);
                    let stack =
                        box_stack(siblings, index, config.stacking, expansion.is_expanded(&key));

                    let rect = Rect::from_min_size(
                        Pos2::new(
                            cell_rect.left() + cell_rect.width() * stack.left_percent / 100.0,
                            cell_rect.top() + ROW_HEIGHT * size.top_percent / 100.0,
                        ),
                        Vec2::new(
                            cell_rect.width() * stack.width_percent / 100.0,
                            ROW_HEIGHT * size.height_percent / 100.0,
                        ),
                    );

                    boxes.push(PlacedBox {
                        item,
                        key,
                        rect,
                        z_index: stack.z_index,
                        siblings,
                        index,
                    });
                }
            }
        }

        boxes.sort_by_key(|placed| placed.z_index);
        boxes
    }
}
