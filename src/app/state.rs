// Discount Card - app/state.rs
//
// Application state management. Owns the filter session, the rows currently
// shown in the results table, and the message/status text the UI renders.
// Owned by the eframe::App implementation.
//
// Every user action is handled here to completion. Failures are logged and
// turned into a `Notice`; they never tear down the session.

use crate::app::session::FilterSession;
use crate::core::export::ExportFormat;
use crate::core::model::{Choice, Dimension, ProviderRecord};
use crate::core::store::ProviderStore;
use crate::util::error::ExportError;
use std::path::PathBuf;

/// Severity of a message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn title(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A message waiting to be acknowledged by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// The filter-and-search session over the loaded provider store.
    pub session: FilterSession,

    /// Rows currently shown in the results table, in store order.
    pub rows: Vec<ProviderRecord>,

    /// Index of the highlighted row in `rows`.
    pub selected_row: Option<usize>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Pending message dialog, if any.
    pub notice: Option<Notice>,

    /// Directory exports are written to.
    pub export_dir: PathBuf,

    /// Format used by the Export action.
    pub export_format: ExportFormat,

    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state around a started session and run the initial
    /// unfiltered search so every provider is listed.
    pub fn new(
        session: FilterSession,
        export_dir: PathBuf,
        export_format: ExportFormat,
        debug_mode: bool,
    ) -> Self {
        let mut state = Self {
            session,
            rows: Vec::new(),
            selected_row: None,
            status_message: "Ready.".to_string(),
            notice: None,
            export_dir,
            export_format,
            dark_mode: true,
            show_about: false,
            debug_mode,
        };
        state.search();
        state
    }

    /// Apply a dropdown change: pin or clear `dimension` and cascade.
    ///
    /// The table is not refreshed until the next search.
    pub fn select(&mut self, dimension: Dimension, choice: Choice) {
        if self.session.selection().get(dimension) == choice.as_value() {
            return;
        }
        if let Err(e) = self.session.set_selection(dimension, choice) {
            tracing::error!(dimension = dimension.label(), error = %e, "Failed to update filters");
            self.notice = Some(Notice::new(
                NoticeLevel::Error,
                format!("Failed to update {}: {e}", dimension.label()),
            ));
        }
    }

    /// Reset every filter to "All".
    pub fn clear_filters(&mut self) {
        match self.session.reset() {
            Ok(()) => self.status_message = "Filters cleared.".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to clear filters");
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Failed to clear filters: {e}"),
                ));
            }
        }
    }

    /// Run the search for the current selection and replace the table rows.
    ///
    /// On failure the previous rows stay on screen.
    pub fn search(&mut self) {
        match self.session.search_current() {
            Ok(rows) => {
                self.status_message = format!("{} provider(s) found.", rows.len());
                if rows.is_empty() {
                    self.notice = Some(Notice::new(
                        NoticeLevel::Info,
                        "No results found for the selected criteria.",
                    ));
                }
                self.rows = rows;
                self.selected_row = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Search failed");
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Failed to search data: {e}"),
                ));
            }
        }
    }

    /// Export the rows currently on screen.
    pub fn export(&mut self) {
        match self
            .session
            .export(&self.rows, &self.export_dir, self.export_format)
        {
            Ok(outcome) => {
                let name = outcome
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| outcome.path.display().to_string());
                self.status_message = format!(
                    "Exported {} row(s) to {}.",
                    outcome.rows,
                    outcome.path.display()
                );
                self.notice = Some(Notice::new(
                    NoticeLevel::Info,
                    format!("Data exported to {name}"),
                ));
            }
            Err(ExportError::NothingToExport) => {
                self.notice = Some(Notice::new(NoticeLevel::Warning, "No data to export!"));
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.notice = Some(Notice::new(
                    NoticeLevel::Error,
                    format!("Failed to export: {e}"),
                ));
            }
        }
    }

    /// Start a new session over `store`, replacing the current one only if
    /// the new store answers. The new catalog is searched immediately.
    pub fn switch_store(&mut self, store: Box<dyn ProviderStore>) {
        let description = store.describe();
        match FilterSession::new(store) {
            Ok(session) => {
                tracing::info!(store = %description, "Switched provider store");
                self.session = session;
                self.search();
            }
            Err(e) => self.report_store_failure(&description, &e),
        }
    }

    /// Show a store failure that happened before a session could be built.
    pub fn report_store_failure(&mut self, description: &str, error: &dyn std::error::Error) {
        tracing::error!(store = %description, error = %error, "Failed to load data");
        self.notice = Some(Notice::new(
            NoticeLevel::Error,
            format!("Failed to load data: {error}"),
        ));
    }

    /// Get the currently highlighted row, if any.
    pub fn selected_record(&self) -> Option<&ProviderRecord> {
        self.selected_row.and_then(|idx| self.rows.get(idx))
    }
}
