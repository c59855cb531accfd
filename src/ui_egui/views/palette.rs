use egui::Color32;

use super::utils::parse_color;

pub const DEFAULT_EVENT_BACKGROUND: Color32 = Color32::from_rgb(0x36, 0xCF, 0xC9);
pub const DEFAULT_EVENT_TEXT: Color32 = Color32::WHITE;
pub const EVENT_BORDER: Color32 = Color32::from_rgb(0x14, 0x14, 0x14);

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[derive(Clone, Copy)]
pub struct GridPalette {
    pub header_bg: Color32,
    pub header_text: Color32,
    pub hour_bg: Color32,
    pub hour_text: Color32,
    pub cell_bg: Color32,
    pub weekend_bg: Color32,
    pub current_hour_bg: Color32,
    pub line: Color32,
    pub week_tag_bg: Color32,
    pub week_tag_text: Color32,
}

impl GridPalette {
    pub fn from_ui(ui: &egui::Ui) -> Self {
        let visuals = ui.visuals();
        let accent = visuals.selection.bg_fill;
        Self {
            header_bg: visuals.faint_bg_color,
            header_text: visuals.strong_text_color(),
            hour_bg: visuals.extreme_bg_color,
            hour_text: visuals.weak_text_color(),
            cell_bg: visuals.panel_fill,
            weekend_bg: visuals.faint_bg_color,
            current_hour_bg: with_alpha(accent, if visuals.dark_mode { 60 } else { 40 }),
            line: visuals.widgets.noninteractive.bg_stroke.color,
            week_tag_bg: accent,
            week_tag_text: visuals.strong_text_color(),
        }
    }
}

/// Fill, text and border colours for one event box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventColors {
    pub fill: Color32,
    pub text: Color32,
    pub border: Color32,
}

impl Default for EventColors {
    fn default() -> Self {
        Self {
            fill: DEFAULT_EVENT_BACKGROUND,
            text: DEFAULT_EVENT_TEXT,
            border: EVENT_BORDER,
        }
    }
}

impl EventColors {
    /// Host-level defaults with any unset or unparsable colour left at the built-in one.
    pub fn with_defaults(background: Option<&str>, text: Option<&str>) -> Self {
        Self::default().resolve(background, text)
    }

    /// Per-event colours over these defaults.
    pub fn resolve(&self, background: Option<&str>, text: Option<&str>) -> Self {
        Self {
            fill: background.and_then(parse_color).unwrap_or(self.fill),
            text: text.and_then(parse_color).unwrap_or(self.text),
            border: self.border,
        }
    }
}
