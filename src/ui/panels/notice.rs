// Discount Card - ui/panels/notice.rs
//
// Message dialog for info, warning, and error notices.
// Rendered as a centred, non-resizable window until acknowledged.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the pending notice (if `state.notice` is set).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    let Some(notice) = state.notice.as_ref() else {
        return;
    };

    let mut open = true;
    let mut acknowledged = false;
    egui::Window::new(notice.level.title())
        .id(egui::Id::new("notice_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(&notice.message)
                    .color(theme::notice_colour(notice.level, state.dark_mode)),
            );
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });

    if !open || acknowledged {
        state.notice = None;
    }
}
