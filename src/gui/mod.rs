//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod state;

pub use app::{run, DashboardApp};
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use state::DashboardState;
