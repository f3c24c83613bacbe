//! Pink Morsel Sales - regional 3D dashboard.

use sales_dashboard::config::DashboardConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    sales_dashboard::main_with(DashboardConfig::regional_3d())
}
