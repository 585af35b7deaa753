// Discount Card - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. config.toml loading and logging initialisation
// 3. Opening the provider database (fatal on failure)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::platform::...` etc.
pub use discount_card::app;
pub use discount_card::core;
pub use discount_card::platform;
pub use discount_card::ui;
pub use discount_card::util;

use clap::Parser;
use std::path::PathBuf;

/// Discount Card Search - find healthcare providers on the discount card.
///
/// Filter the provider catalog by governorate, area, provider type and
/// specialty, then export the matching rows to a spreadsheet file.
#[derive(Parser, Debug)]
#[command(name = "discount-card", version, about)]
struct Cli {
    /// Providers database (overrides [database] path in config.toml).
    database: Option<PathBuf>,

    /// Directory exported files are written to.
    #[arg(short = 'e', long = "export-dir")]
    export_dir: Option<PathBuf>,

    /// Export format: xlsx (default), csv or json.
    #[arg(short = 'f', long = "format")]
    format: Option<core::export::ExportFormat>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

/// Configure body/button/monospace text size for the egui context.
fn configure_fonts(ctx: &egui::Context, font_size: f32) {
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            if matches!(
                text_style,
                egui::TextStyle::Body | egui::TextStyle::Button | egui::TextStyle::Monospace
            ) {
                font_id.size = font_size;
            }
        }
    });
}

/// Report a startup failure the application cannot recover from and exit.
///
/// The message goes to the log, to stderr, and to a native message box since
/// release builds on Windows have no console.
fn fatal(message: &str) -> ! {
    tracing::error!("{}", message);
    eprintln!("Error: {message}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so [logging] can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_file());

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "Discount Card starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    // CLI override > config.toml > built-in default
    let database_path = cli.database.unwrap_or(config.database_path);
    let export_dir = cli.export_dir.unwrap_or(config.export_dir);
    let export_format = cli.format.unwrap_or(config.export_format);

    // Without its lookup table the application cannot do anything useful.
    let store = match platform::sqlite::SqliteStore::open(&database_path) {
        Ok(s) => s,
        Err(e) => fatal(&format!("Failed to load data: {e}")),
    };
    let session = match app::session::FilterSession::new(Box::new(store)) {
        Ok(s) => s,
        Err(e) => fatal(&format!("Failed to load data: {e}")),
    };

    let mut state = app::state::AppState::new(session, export_dir, export_format, cli.debug);
    state.dark_mode = config.dark_mode;

    tracing::info!(
        database = %database_path.display(),
        providers = state.rows.len(),
        "Ready to launch GUI"
    );

    let font_size = config.font_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size(util::constants::WINDOW_INNER_SIZE)
            .with_min_inner_size(util::constants::WINDOW_MIN_SIZE)
            .with_maximize_button(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx, font_size);
            Ok(Box::new(gui::DiscountCardApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch {} GUI: {e}", util::constants::APP_NAME);
        std::process::exit(1);
    }
}
