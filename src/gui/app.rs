//! Dashboard Application
//! Main window: header and region selector on top, chart below.

use crate::config::DashboardConfig;
use crate::data::SalesTable;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, DashboardState};
use eframe::egui;
use std::sync::Arc;
use tracing::info;

/// Main application window.
pub struct DashboardApp {
    state: DashboardState,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &DashboardConfig,
        table: Arc<SalesTable>,
    ) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let state = DashboardState::new(table, config.mode, config.event_date);
        let mut control_panel = ControlPanel::new(config, state.selector().as_str());
        control_panel.set_status(&Self::status_text(&state));

        Self {
            state,
            control_panel,
            chart_viewer: ChartViewer::new(),
        }
    }

    fn status_text(state: &DashboardState) -> String {
        let shown = format!(
            "Showing {} of {} rows",
            state.visible_rows(),
            state.total_rows()
        );
        match state.date_range() {
            Some((first, last)) => format!(
                "{} ({} to {})",
                shown,
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            ),
            None => shown,
        }
    }

    /// One interaction: filter, rebuild, and refresh the status line.
    fn handle_region_changed(&mut self, value: &str) {
        self.state.select_region(value);
        self.control_panel.set_status(&Self::status_text(&self.state));
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::RegionChanged(value) => {
                            self.handle_region_changed(&value)
                        }
                        ControlPanelAction::None => {}
                    }

                    ui.add_space(10.0);
                    self.chart_viewer.show(ui, &self.state);
                });
        });
    }
}

/// Open the dashboard window and block until it is closed.
pub fn run(config: DashboardConfig, table: Arc<SalesTable>) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(&config.window_title),
        ..Default::default()
    };

    info!(title = %config.window_title, mode = ?config.mode, "Opening dashboard window");

    let app_name = config.window_title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &config, table)))),
    )
}
