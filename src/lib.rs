//! Pink Morsel Sales Dashboards
//!
//! Loads the processed sales CSV once, then serves an interactive chart window whose
//! region selector filters the data and redraws the chart. The price increase on
//! 2021-01-15 is marked on every chart.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod stats;

use anyhow::{anyhow, Context};
use config::DashboardConfig;
use data::{LoaderError, SalesLoader};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

/// Load the data, then run the dashboard window until it is closed.
pub fn launch(config: DashboardConfig) -> anyhow::Result<()> {
    let table = SalesLoader::load_csv(&config.csv_path)
        .with_context(|| format!("loading {}", config.csv_path.display()))?;

    gui::run(config, Arc::new(table)).map_err(|e| anyhow!("dashboard window failed: {e}"))
}

/// Process entry shared by both binaries. Startup failures are reported to the
/// operator and turn into a non-zero exit status; no window is opened.
pub fn main_with(config: DashboardConfig) -> ExitCode {
    logging::init();

    match launch(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Dashboard startup failed");
            for line in operator_lines(&err) {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}

const MISSING_FILE_HINT: &str = "Please ensure you have completed the data processing step and \
                                 the file is in the correct directory.";

/// What the operator sees on stderr: the error, plus a hint when the CSV is missing.
fn operator_lines(err: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![format!("Error: {}", operator_message(err))];
    if let Some(LoaderError::FileNotFound(_)) = err.downcast_ref::<LoaderError>() {
        lines.push(MISSING_FILE_HINT.to_string());
    }
    lines
}

/// Innermost cause, which is the message an operator can act on.
fn operator_message(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}
