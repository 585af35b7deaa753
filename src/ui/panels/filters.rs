// Discount Card - ui/panels/filters.rs
//
// Search bar: one dropdown per dimension in cascade order, then the action
// buttons. Dropdown changes cascade immediately; the table refreshes on
// Search.

use crate::app::state::AppState;
use crate::core::model::{Choice, Dimension};
use crate::ui::theme;

/// Render the filter dropdowns and action buttons.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 10.0;

        for dimension in Dimension::ALL {
            ui.label(format!("{}:", dimension.label()));

            let current = Choice::from(state.session.selection().get(dimension));
            let mut picked: Option<Choice> = None;

            egui::ComboBox::from_id_salt(dimension.column())
                .width(theme::FILTER_COMBO_WIDTH)
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for choice in state.session.choices(dimension) {
                        if ui
                            .selectable_label(*choice == current, choice.label())
                            .clicked()
                        {
                            picked = Some(choice.clone());
                        }
                    }
                });

            // Applied after the dropdown releases its borrow of the session.
            if let Some(choice) = picked {
                state.select(dimension, choice);
            }
        }

        if ui.add(action_button("Search")).clicked() {
            state.search();
        }
        if ui
            .add(action_button("Export"))
            .on_hover_text(format!(
                "Write the {} displayed row(s) to a new {} file",
                state.rows.len(),
                state.export_format.label()
            ))
            .clicked()
        {
            state.export();
        }
        if ui.add(action_button("Clear Filters")).clicked() {
            state.clear_filters();
        }
        if ui.add(action_button("Exit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn action_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(text.to_owned()).min_size(egui::vec2(theme::ACTION_BUTTON_WIDTH, 0.0))
}
