// Discount Card - ui/panels/results.rs
//
// Virtual-scrolling results table.
//
// Uses egui's `ScrollArea::show_rows` which renders only the rows currently
// visible in the viewport, so large catalogs cost nothing extra per frame.
// Row clicks update `selected_row`, applied after the scroll area releases
// its borrow of `state.rows`.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants::EXPORT_HEADERS;

/// Render the results table (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if state.rows.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No providers to show. Adjust the filters and press Search.");
        });
        return;
    }

    let row_height = theme::ROW_HEIGHT;
    let total = state.rows.len();

    egui::ScrollArea::horizontal()
        .id_salt("results_horizontal")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header row
                ui.horizontal(|ui| {
                    for (idx, header) in EXPORT_HEADERS.iter().enumerate() {
                        let label = egui::Label::new(egui::RichText::new(*header).strong());
                        match theme::COLUMN_WIDTHS.get(idx) {
                            Some(&width) => {
                                ui.add_sized([width, row_height], label);
                            }
                            None => {
                                ui.add(label);
                            }
                        }
                    }
                });
                ui.separator();

                let mut clicked: Option<usize> = None;

                egui::ScrollArea::vertical()
                    .id_salt("results_vertical")
                    .auto_shrink([false; 2])
                    .show_rows(ui, row_height, total, |ui, row_range| {
                        for idx in row_range {
                            let Some(record) = state.rows.get(idx) else {
                                continue;
                            };
                            let is_selected = state.selected_row == Some(idx);

                            if idx % 2 == 1 {
                                let stripe = egui::Rect::from_min_size(
                                    ui.cursor().min,
                                    egui::vec2(ui.available_width(), row_height),
                                );
                                ui.painter().rect_filled(
                                    stripe,
                                    0.0,
                                    theme::stripe_colour(state.dark_mode),
                                );
                            }

                            ui.horizontal(|ui| {
                                for (col, cell) in record.display_cells().iter().enumerate() {
                                    let widget = egui::SelectableLabel::new(is_selected, *cell);
                                    let response = match theme::COLUMN_WIDTHS.get(col) {
                                        Some(&width) => ui.add_sized([width, row_height], widget),
                                        None => ui.add(widget),
                                    };
                                    let response = if cell.is_empty() {
                                        response
                                    } else {
                                        response.on_hover_text(*cell)
                                    };
                                    if response.clicked() {
                                        clicked = Some(idx);
                                    }
                                }
                            });
                        }
                    });

                if let Some(idx) = clicked {
                    state.selected_row = Some(idx);
                }
            });
        });
}
