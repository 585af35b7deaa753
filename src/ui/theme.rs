// Discount Card - ui/theme.rs
//
// Colour scheme, notice colours, and layout constants.
// No dependencies on app state or business logic.

use crate::app::state::NoticeLevel;
use egui::Color32;

/// Accent colour for a message dialog.
pub fn notice_colour(level: NoticeLevel, dark_mode: bool) -> Color32 {
    match (level, dark_mode) {
        (NoticeLevel::Info, true) => Color32::from_rgb(147, 197, 253), // Blue 300
        (NoticeLevel::Info, false) => Color32::from_rgb(29, 78, 216),  // Blue 700
        (NoticeLevel::Warning, true) => Color32::from_rgb(252, 211, 77), // Amber 300
        (NoticeLevel::Warning, false) => Color32::from_rgb(180, 83, 9), // Amber 700
        (NoticeLevel::Error, true) => Color32::from_rgb(248, 113, 113), // Red 400
        (NoticeLevel::Error, false) => Color32::from_rgb(185, 28, 28), // Red 700
    }
}

/// Base egui visuals for the chosen mode.
pub fn visuals(dark_mode: bool) -> egui::Visuals {
    if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    }
}

/// Background tint for alternating result rows.
pub fn stripe_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_premultiplied(255, 255, 255, 6)
    } else {
        Color32::from_rgba_premultiplied(0, 0, 0, 10)
    }
}

/// Layout constants.
pub const FILTER_COMBO_WIDTH: f32 = 150.0;
pub const ACTION_BUTTON_WIDTH: f32 = 100.0;
pub const DETAIL_PANE_HEIGHT: f32 = 160.0;
pub const ROW_HEIGHT: f32 = 22.0;

/// Results table column widths, in `EXPORT_HEADERS` order. The last column
/// takes whatever width remains.
pub const COLUMN_WIDTHS: [f32; 4] = [260.0, 320.0, 140.0, 110.0];
