//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod chart;
pub mod export;
pub mod filter_args;
pub mod list;
pub mod report;
pub mod session;

pub use chart::{handle_chart_command, ChartCommands};
pub use export::{handle_export_command, ExportCommands};
pub use filter_args::FilterArgs;
pub use list::handle_list_command;
pub use report::{handle_report_command, ReportCommands};
pub use session::{handle_login, handle_logout, handle_whoami};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use crate::config::{GastosPaths, Settings};
use crate::display::format::NumberLocale;
use crate::error::{GastosError, GastosResult};
use crate::services::ReportService;
use crate::session::SessionStore;
use crate::storage::{JsonDirSource, RecordStore};

/// Paths and settings every data command needs
pub struct CliContext {
    pub paths: GastosPaths,
    pub settings: Settings,
}

impl CliContext {
    pub fn new(paths: GastosPaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    pub fn locale(&self) -> NumberLocale {
        self.settings.number_locale()
    }

    /// Load the logged-in user's snapshot and wrap it in a report service
    pub fn load_reports(&self) -> GastosResult<ReportService> {
        let session = SessionStore::new(self.paths.session_file()).require()?;
        let source = JsonDirSource::new(self.settings.source_dir(&self.paths));
        debug!(dir = %source.dir().display(), "reading data source");

        let mut store = RecordStore::new();
        let snapshot = store.load(&source, &session)?;
        Ok(ReportService::new(snapshot))
    }
}

/// Create an output file for an export or report
pub(crate) fn create_output(path: &Path) -> GastosResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        GastosError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
