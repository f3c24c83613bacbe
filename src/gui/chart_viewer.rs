//! Chart Viewer Widget
//! Shows the current chart and the before/after impact table.
//! The 3D chart is rendered to a texture and re-rendered only when the
//! selection, the camera or the available size changes.

use crate::charts::{ChartPlotter, ChartRenderer, Projection};
use crate::config::ChartMode;
use crate::gui::DashboardState;
use crate::stats::{ImpactReport, SIGNIFICANCE_THRESHOLD};
use egui::{Color32, ColorImage, RichText, Sense, TextureHandle, TextureOptions};
use tracing::warn;

const MIN_RENDER_WIDTH: f32 = 480.0;
const MAX_RENDER_WIDTH: f32 = 1600.0;
const RENDER_ASPECT: f32 = 0.6;
/// Radians of rotation per dragged point
const DRAG_SENSITIVITY: f64 = 0.01;

const SIGNIFICANT_COLOR: Color32 = Color32::from_rgb(220, 53, 69);
const RISE_COLOR: Color32 = Color32::from_rgb(40, 167, 69);

#[derive(Debug, Clone, Copy, PartialEq)]
struct RenderKey {
    revision: u64,
    projection: Projection,
    width: u32,
    height: u32,
}

pub struct ChartViewer {
    projection: Projection,
    texture: Option<TextureHandle>,
    rendered: Option<RenderKey>,
    render_error: Option<String>,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            projection: Projection::default(),
            texture: None,
            rendered: None,
            render_error: None,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &DashboardState) {
        match state.mode() {
            ChartMode::Flat => ChartPlotter::draw_flat_chart(ui, state.chart()),
            ChartMode::Regional3d => self.show_regional(ui, state),
        }

        ui.add_space(14.0);
        Self::draw_impact_table(ui, state.impact());
    }

    fn show_regional(&mut self, ui: &mut egui::Ui, state: &DashboardState) {
        let width = ui.available_width().clamp(MIN_RENDER_WIDTH, MAX_RENDER_WIDTH);
        // Snap to 10px so resizing doesn't re-render on every pixel.
        let width = ((width / 10.0).floor() * 10.0) as u32;
        let height = (width as f32 * RENDER_ASPECT) as u32;

        let key = RenderKey {
            revision: state.revision(),
            projection: self.projection,
            width,
            height,
        };

        if self.rendered != Some(key) {
            match ChartRenderer::render_regional_3d(state.chart(), width, height, self.projection)
            {
                Ok(frame) => {
                    let image = ColorImage::from_rgb(
                        [frame.width as usize, frame.height as usize],
                        &frame.pixels,
                    );
                    self.texture = Some(ui.ctx().load_texture(
                        "regional_3d_chart",
                        image,
                        TextureOptions::LINEAR,
                    ));
                    self.render_error = None;
                }
                Err(e) => {
                    warn!(error = %e, "3D chart render failed");
                    self.texture = None;
                    self.render_error = Some(e.to_string());
                }
            }
            self.rendered = Some(key);
        }

        if let Some(error) = &self.render_error {
            ui.label(RichText::new(format!("Error: {}", error)).color(SIGNIFICANT_COLOR));
        }

        if let Some(texture) = &self.texture {
            let response = ui.add(
                egui::Image::new(texture)
                    .fit_to_exact_size(egui::vec2(width as f32, height as f32))
                    .sense(Sense::drag()),
            );
            if response.dragged() {
                let delta = response.drag_delta();
                self.projection = self.projection.rotated(
                    delta.x as f64 * DRAG_SENSITIVITY,
                    delta.y as f64 * DRAG_SENSITIVITY,
                );
            }
        }
    }

    /// Before/after table, one row per visible region.
    fn draw_impact_table(ui: &mut egui::Ui, report: &ImpactReport) {
        ui.label(
            RichText::new(format!(
                "Sales before and after {}",
                report.event_date.format("%Y-%m-%d")
            ))
            .size(15.0)
            .strong(),
        );
        ui.add_space(4.0);

        if report.is_empty() {
            ui.label(RichText::new("No data for the selected region").color(Color32::GRAY));
            return;
        }

        let fmt_mean = |m: Option<f64>| m.map(|v| format!("{:.2}", v)).unwrap_or("-".into());

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("impact_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Region",
                            "Rows before",
                            "Mean before",
                            "Rows after",
                            "Mean after",
                            "Change",
                            "P-value",
                        ] {
                            ui.label(RichText::new(header).strong().size(12.0));
                        }
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();

                        for row in &report.regions {
                            ui.label(RichText::new(&row.region).size(12.0));
                            ui.label(RichText::new(row.before.count.to_string()).size(12.0));
                            ui.label(RichText::new(fmt_mean(row.before.mean)).size(12.0));
                            ui.label(RichText::new(row.after.count.to_string()).size(12.0));
                            ui.label(RichText::new(fmt_mean(row.after.mean)).size(12.0));

                            match row.change_pct {
                                Some(pct) => {
                                    let color = if pct > 0.0 {
                                        RISE_COLOR
                                    } else {
                                        default_text_color
                                    };
                                    ui.label(
                                        RichText::new(format!("{:+.1}%", pct))
                                            .size(12.0)
                                            .color(color),
                                    );
                                }
                                None => {
                                    ui.label(RichText::new("-").size(12.0));
                                }
                            }

                            match row.p_value {
                                Some(p) => {
                                    let color = if row.is_significant {
                                        SIGNIFICANT_COLOR
                                    } else {
                                        default_text_color
                                    };
                                    ui.label(
                                        RichText::new(format!("{:.4}", p)).size(12.0).color(color),
                                    );
                                }
                                None => {
                                    ui.label(RichText::new("-").size(12.0));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });

        if report.has_significant_results() {
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "Red p-values mark a significant change (p <= {})",
                    SIGNIFICANCE_THRESHOLD
                ))
                    .size(11.0)
                    .color(SIGNIFICANT_COLOR),
            );
        }
    }
}
