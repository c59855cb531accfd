//! Multi-select filter for the header slot.

use std::collections::HashSet;

use crate::services::feed::FilterOption;

const DEFAULT_PLACEHOLDER: &str = "Select filters...";
const DEFAULT_WIDTH: f32 = 200.0;

pub struct FilterSelect<'a> {
    id_source: &'a str,
    options: &'a [FilterOption],
    selected: &'a mut HashSet<String>,
    placeholder: &'a str,
    width: f32,
}

impl<'a> FilterSelect<'a> {
    pub fn new(
        id_source: &'a str,
        options: &'a [FilterOption],
        selected: &'a mut HashSet<String>,
    ) -> Self {
        Self {
            id_source,
            options,
            selected,
            placeholder: DEFAULT_PLACEHOLDER,
            width: DEFAULT_WIDTH,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Returns true when the selection changed.
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        let summary = selection_summary(self.options, self.selected, self.placeholder);
        let selected = self.selected;
        let mut changed = false;

        egui::ComboBox::from_id_source(self.id_source)
            .selected_text(summary)
            .width(self.width)
            .show_ui(ui, |ui| {
                for option in self.options {
                    let mut checked = selected.contains(&option.value);
                    if ui.checkbox(&mut checked, option_text(option)).changed() {
                        if checked {
                            selected.insert(option.value.clone());
                        } else {
                            selected.remove(&option.value);
                        }
                        changed = true;
                    }
                }

                if !selected.is_empty() {
                    ui.separator();
                    if ui.button("Clear").clicked() {
                        selected.clear();
                        changed = true;
                    }
                }
            });

        changed
    }
}

/// Emoji followed by the description, or the label when there is none.
fn option_text(option: &FilterOption) -> String {
    let text = option.desc.as_deref().unwrap_or(&option.label);
    match option.emoji.as_deref() {
        Some(emoji) => format!("{emoji} {text}"),
        None => text.to_string(),
    }
}

fn selection_summary(
    options: &[FilterOption],
    selected: &HashSet<String>,
    placeholder: &str,
) -> String {
    let labels: Vec<&str> = options
        .iter()
        .filter(|option| selected.contains(&option.value))
        .map(|option| option.label.as_str())
        .collect();

    if labels.is_empty() {
        placeholder.to_string()
    } else {
        labels.join(", ")
    }
}
