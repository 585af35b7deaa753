// Discount Card - ui/panels/detail.rs
//
// Provider detail pane: every attribute of the highlighted row, including
// the five filter attributes the table does not show.

use crate::app::state::AppState;
use crate::core::model::Dimension;

/// Render the detail pane (bottom panel).
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let Some(record) = state.selected_record() else {
        ui.centered_and_justified(|ui| {
            ui.label("Select a provider to view details.");
        });
        return;
    };

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("detail_grid")
            .num_columns(4)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                let fields = [
                    ("Provider Name:", record.provider_name.as_deref()),
                    ("Address:", record.address.as_deref()),
                    ("Phone:", record.phone.as_deref()),
                    ("Hotline:", record.hotline.as_deref()),
                    ("Agreed Prices:", record.agreed_prices.as_deref()),
                ];

                // Display attributes on the left, filter attributes on the right.
                for (row, (label, value)) in fields.iter().enumerate() {
                    ui.strong(*label);
                    ui.label(value.unwrap_or("-"));

                    let dimension = Dimension::ALL[row];
                    ui.strong(format!("{}:", dimension.label()));
                    ui.label(record.attribute(dimension).unwrap_or("-"));
                    ui.end_row();
                }
            });
    });
}
