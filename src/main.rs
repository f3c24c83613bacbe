//! Pink Morsel Sales - flat time-series dashboard.

use sales_dashboard::config::DashboardConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    sales_dashboard::main_with(DashboardConfig::flat())
}
