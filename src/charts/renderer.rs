//! Static Chart Renderer
//! Renders the regional 3D chart into an RGB bitmap with plotters.
//!
//! Axes:
//! - x: date
//! - y: sales (vertical)
//! - z: region lane, labelled with the region name
//!
//! The event date is drawn once per visible lane as a dashed red segment between
//! that region's lowest and highest sales. A segment with no span (an empty view,
//! or a region with one value) is stretched over the whole sales axis.

use crate::charts::builder::{date_to_x, ChartSpec};
use crate::charts::plotter::format_date_tick;
use plotters::prelude::*;
use std::ops::Range;
use thiserror::Error;

const BACKGROUND: RGBColor = RGBColor(249, 249, 249);
const AXIS_TEXT: RGBColor = RGBColor(51, 51, 51);

/// Dash and gap length, as fractions of the segment's axis span.
const DASH_FRACTION: f64 = 0.06;
const GAP_FRACTION: f64 = 0.04;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

/// Camera angles for the 3D projection, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub yaw: f64,
    pub pitch: f64,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.25,
        }
    }
}

impl Projection {
    const PITCH_LIMIT: f64 = 1.4;

    /// Rotate by a drag delta, keeping pitch away from the poles.
    pub fn rotated(self, d_yaw: f64, d_pitch: f64) -> Self {
        Self {
            yaw: self.yaw + d_yaw,
            pitch: (self.pitch + d_pitch).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT),
        }
    }
}

/// Packed RGB pixels, row-major.
#[derive(Debug, Clone)]
pub struct RgbFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the regional chart. An empty chart still renders axes and title.
    pub fn render_regional_3d(
        spec: &ChartSpec,
        width: u32,
        height: u32,
        projection: Projection,
    ) -> Result<RgbFrame, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidSize(width, height));
        }

        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        Self::draw_regional_3d(spec, &mut pixels, (width, height), projection)
            .map_err(|e| RenderError::Drawing(e.to_string()))?;

        Ok(RgbFrame {
            width,
            height,
            pixels,
        })
    }

    fn draw_regional_3d(
        spec: &ChartSpec,
        pixels: &mut [u8],
        size: (u32, u32),
        projection: Projection,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::with_buffer(pixels, size).into_drawing_area();
        root.fill(&BACKGROUND)?;

        let (date_lo, date_hi) = spec.date_span();
        let x_range = padded_range(date_to_x(date_lo), date_to_x(date_hi), 1.0);
        let (value_lo, value_hi) = spec.value_span();
        let y_range = padded_range(value_lo.min(0.0), value_hi, 1.0);
        let y_bounds = (y_range.start, y_range.end);
        let regions = lane_regions(spec);
        let lanes = regions.len().max(1) as f64;
        let z_range = -0.5..lanes - 0.5;

        let x_desc = spec.axes.x.clone();
        let y_desc = spec.axes.y.clone();
        let z_desc = spec.axes.z.clone().unwrap_or_default();

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, ("sans-serif", 26).into_font().color(&AXIS_TEXT))
            .margin(20)
            .build_cartesian_3d(x_range, y_range, z_range)?;

        chart.with_projection(|mut pb| {
            pb.yaw = projection.yaw;
            pb.pitch = projection.pitch;
            pb.scale = 0.85;
            pb.into_matrix()
        });

        chart
            .configure_axes()
            .label_style(("sans-serif", 13).into_font().color(&AXIS_TEXT))
            .light_grid_style(BLACK.mix(0.12))
            .x_labels(6)
            .z_labels(regions.len().max(1))
            .x_formatter(&|x| format_date_tick(*x))
            .y_formatter(&|y| format!("{:.0}", y))
            .z_formatter(&|z| lane_label(&regions, *z))
            .draw()?;

        for (lane, series) in spec.series.iter().enumerate() {
            let color = RGBColor(series.color[0], series.color[1], series.color[2]);
            let z = lane as f64;
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().map(|p| (date_to_x(p.date), p.sales, z)),
                    color.stroke_width(2),
                ))?
                .label(series.region.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });
        }

        let marker = &spec.event;
        let [r, g, b] = marker.style.color;
        let marker_width = marker.style.width.round().max(1.0) as u32;
        let marker_style = RGBColor(r, g, b).stroke_width(marker_width);
        let event_x = date_to_x(marker.date);
        for segment in &spec.event_segments {
            let (low, high) = marker_span(segment.low, segment.high, y_bounds);
            let pieces = if marker.style.dashed {
                dash_segments(low, high, DASH_FRACTION, GAP_FRACTION)
            } else {
                vec![(low, high)]
            };
            let z = segment.lane as f64;
            chart.draw_series(pieces.into_iter().map(|(from, to)| {
                PathElement::new(vec![(event_x, from, z), (event_x, to, z)], marker_style)
            }))?;
        }

        chart
            .configure_series_labels()
            .label_font(("sans-serif", 14).into_font().color(&AXIS_TEXT))
            .border_style(BLACK.mix(0.3))
            .background_style(WHITE.mix(0.85))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;

        // Description of axes, drawn flat so it stays readable at any rotation.
        let footer = format!("x: {}   y: {}   z: {}", x_desc, y_desc, z_desc);
        root.draw(&Text::new(
            footer,
            (20, size.1 as i32 - 24),
            ("sans-serif", 13).into_font().color(&AXIS_TEXT),
        ))?;

        root.present()?;
        Ok(())
    }
}

/// Region name per z lane. Series own the lanes; with no series the event
/// segments still name theirs.
fn lane_regions(spec: &ChartSpec) -> Vec<String> {
    if spec.series.is_empty() {
        let mut regions = Vec::new();
        for segment in &spec.event_segments {
            if regions.len() <= segment.lane {
                regions.resize(segment.lane + 1, String::new());
            }
            regions[segment.lane] = segment.region.clone();
        }
        regions
    } else {
        spec.series.iter().map(|s| s.region.clone()).collect()
    }
}

/// Vertical extent of a marker segment; zero-span segments take the full axis.
fn marker_span(low: f64, high: f64, axis: (f64, f64)) -> (f64, f64) {
    if high > low {
        (low, high)
    } else {
        axis
    }
}

/// Lane label for a z tick; ticks between lanes stay blank.
fn lane_label(regions: &[String], z: f64) -> String {
    let nearest = z.round();
    if (z - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    regions.get(nearest as usize).cloned().unwrap_or_default()
}

/// Axis range that is never empty: equal bounds are widened by `pad` on each side.
pub fn padded_range(lo: f64, hi: f64, pad: f64) -> Range<f64> {
    if hi > lo {
        let margin = (hi - lo) * 0.05;
        (lo - margin)..(hi + margin)
    } else {
        (lo - pad)..(lo + pad)
    }
}

/// Split `low..high` into dash pieces. A zero-length span stays a single piece.
pub fn dash_segments(low: f64, high: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let span = high - low;
    if span <= 0.0 || dash <= 0.0 {
        return vec![(low, high)];
    }

    let dash_len = span * dash;
    let step = dash_len + span * gap.max(0.0);
    let mut pieces = Vec::new();
    let mut start = low;
    while start < high {
        pieces.push((start, (start + dash_len).min(high)));
        start += step;
    }
    pieces
}
