//! Chart Plotter Module
//! Draws flat chart descriptions interactively using egui_plot.

use crate::charts::builder::{date_to_x, x_to_date, ChartSpec, MarkerStyle};
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints, VLine};

const PLOT_HEIGHT: f32 = 460.0;
const LINE_WIDTH: f32 = 1.5;

pub fn color32(rgb: [u8; 3]) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2])
}

/// Axis tick / hover text for a date coordinate.
pub fn format_date_tick(x: f64) -> String {
    x_to_date(x)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Draws a [`ChartSpec`] with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    fn marker_line_style(style: &MarkerStyle) -> LineStyle {
        if style.dashed {
            LineStyle::dashed_loose()
        } else {
            LineStyle::Solid
        }
    }

    /// Time series plot: one line per region plus the dashed event line.
    pub fn draw_flat_chart(ui: &mut egui::Ui, spec: &ChartSpec) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&spec.title).size(22.0).strong());
        });
        ui.add_space(6.0);

        let (date_lo, date_hi) = spec.date_span();
        let y_label = spec.axes.y.clone();

        Plot::new("sales_line_chart")
            .height(PLOT_HEIGHT)
            .legend(Legend::default())
            .x_axis_label(spec.axes.x.clone())
            .y_axis_label(spec.axes.y.clone())
            .include_x(date_to_x(date_lo))
            .include_x(date_to_x(date_hi))
            .include_y(0.0)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| format_date_tick(mark.value))
            .label_formatter(move |name, value| {
                let date = format_date_tick(value.x);
                if name.is_empty() {
                    format!("{}\n{}: {:.2}", date, y_label, value.y)
                } else {
                    format!("{}\n{}\n{}: {:.2}", name, date, y_label, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for series in &spec.series {
                    let points: PlotPoints = series
                        .points
                        .iter()
                        .map(|p| [date_to_x(p.date), p.sales])
                        .collect();

                    plot_ui.line(
                        Line::new(points)
                            .color(color32(series.color))
                            .width(LINE_WIDTH)
                            .name(&series.region),
                    );
                }

                let marker = &spec.event;
                plot_ui.vline(
                    VLine::new(date_to_x(marker.date))
                        .color(color32(marker.style.color))
                        .width(marker.style.width)
                        .style(Self::marker_line_style(&marker.style))
                        .name(format!("Price change {}", marker.date.format("%Y-%m-%d"))),
                );
            });

        if spec.series.is_empty() {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("No sales rows match the selected region")
                        .size(13.0)
                        .color(Color32::GRAY),
                );
            });
        }
    }
}
