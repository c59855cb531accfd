use egui::{Align, Layout, Margin, RichText, Rounding};
use egui_extras::DatePickerButton;

use super::palette::GridPalette;
use crate::services::locale::LocaleConfig;
use crate::services::navigation::WeekNavigator;

/// Host-supplied UI drawn at the right end of the header, typically a filter select.
pub type FilterSlot<'a> = Box<dyn FnOnce(&mut egui::Ui) + 'a>;

/// Month label, week tag, navigation buttons and the jump-to-week picker.
pub struct HeaderView;

impl HeaderView {
    pub fn show(
        ui: &mut egui::Ui,
        navigator: &mut WeekNavigator,
        locale: &LocaleConfig,
        palette: &GridPalette,
        picker_id: &str,
        filter_slot: Option<FilterSlot<'_>>,
    ) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(navigator.month_label(locale))
                    .size(16.0)
                    .strong()
                    .color(palette.header_text),
            );
            ui.add_space(6.0);

            egui::Frame::none()
                .fill(palette.week_tag_bg)
                .rounding(Rounding::same(4.0))
                .inner_margin(Margin::symmetric(6.0, 2.0))
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(format!("Week {}", navigator.week_number(locale)))
                            .size(12.0)
                            .color(palette.week_tag_text),
                    );
                });
        });

        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Today").clicked() {
                navigator.go_to_today();
            }
            ui.add_space(8.0);
            if ui.button("◀").on_hover_text("Previous week").clicked() {
                navigator.previous();
            }
            if ui.button("▶").on_hover_text("Next week").clicked() {
                navigator.next();
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if let Some(slot) = filter_slot {
                    slot(ui);
                    ui.add_space(8.0);
                }

                let mut picked = navigator.start_week();
                let response = ui.add(
                    DatePickerButton::new(&mut picked)
                        .id_source(picker_id)
                        .calendar_week(true),
                );
                if response.changed() {
                    navigator.jump_to_week(picked);
                }
            });
        });

        ui.add_space(8.0);
    }
}
