// Discount Card - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the UI panels and handles requests that need the platform
// layer (opening another database).

use crate::app::state::AppState;
use crate::platform::sqlite::SqliteStore;
use crate::ui;
use std::path::PathBuf;

/// The Discount Card search application.
pub struct DiscountCardApp {
    pub state: AppState,
}

impl DiscountCardApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Open `path` as the new provider store. The current session stays in
    /// place if the file cannot be opened or queried.
    fn open_database(&mut self, path: PathBuf) {
        match SqliteStore::open(&path) {
            Ok(store) => {
                self.state.switch_store(Box::new(store));
            }
            Err(e) => {
                let description = path.display().to_string();
                self.state.report_store_failure(&description, &e);
            }
        }
    }
}

impl eframe::App for DiscountCardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(ui::theme::visuals(self.state.dark_mode));

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Database\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("SQLite database", &["db", "sqlite", "sqlite3"])
                            .pick_file()
                        {
                            self.open_database(path);
                        }
                        ui.close_menu();
                    }
                    let has_rows = !self.state.rows.is_empty();
                    ui.add_enabled_ui(has_rows, |ui| {
                        let label = format!("Export ({})", self.state.export_format.label());
                        if ui.button(label).clicked() {
                            self.state.export();
                            ui.close_menu();
                        }
                    });
                    if ui.button("Export Folder\u{2026}").clicked() {
                        if let Some(dir) = rfd::FileDialog::new()
                            .set_directory(&self.state.export_dir)
                            .pick_folder()
                        {
                            tracing::info!(dir = %dir.display(), "Export folder changed");
                            self.state.status_message =
                                format!("Exports will be written to {}.", dir.display());
                            self.state.export_dir = dir;
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let label = if self.state.dark_mode {
                        "Light Mode"
                    } else {
                        "Dark Mode"
                    };
                    if ui.button(label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Search bar
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::filters::render(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{} rows", self.state.rows.len()));
                    if self.state.debug_mode {
                        ui.separator();
                        ui.label(
                            egui::RichText::new(self.state.session.store_description())
                                .monospace()
                                .weak(),
                        );
                    }
                });
            });
        });

        // Detail pane (bottom)
        egui::TopBottomPanel::bottom("detail_pane")
            .resizable(true)
            .default_height(ui::theme::DETAIL_PANE_HEIGHT)
            .show(ctx, |ui| {
                ui::panels::detail::render(ui, &self.state);
            });

        // Central panel (results table)
        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::results::render(ui, &mut self.state);
        });

        // Dialogs
        ui::panels::about::render(ctx, &mut self.state);
        ui::panels::notice::render(ctx, &mut self.state);
    }
}
