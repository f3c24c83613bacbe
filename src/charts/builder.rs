//! Chart Builder Module
//! Turns a (possibly filtered) sales table into a declarative chart description.
//!
//! The description is drawing-library agnostic: the flat view feeds it to egui_plot,
//! the 3D view to plotters.

use crate::config::ChartMode;
use crate::data::{RegionSelector, SalesTable};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const FLAT_TITLE: &str = "Pink Morsel Sales Over Time";
pub const REGIONAL_TITLE: &str = "Pink Morsel Sales by Region";

pub const DATE_LABEL: &str = "Date";
pub const SALES_LABEL: &str = "Total Sales ($)";
pub const REGION_LABEL: &str = "Region";

/// Series colours, assigned by series index.
pub const PALETTE: [[u8; 3]; 10] = [
    [52, 152, 219],  // Blue
    [46, 204, 113],  // Green
    [155, 89, 182],  // Purple
    [243, 156, 18],  // Orange
    [26, 188, 156],  // Teal
    [233, 30, 99],   // Pink
    [0, 188, 212],   // Cyan
    [255, 87, 34],   // Deep Orange
    [121, 85, 72],   // Brown
    [96, 125, 139],  // Blue Grey
];

/// Reference line colour; kept out of the palette so it never matches a series.
pub const MARKER_COLOR: [u8; 3] = [220, 20, 20];
pub const MARKER_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub z: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub sales: f64,
}

/// One plotted line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub region: String,
    pub color: [u8; 3],
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: [u8; 3],
    pub width: f32,
    pub dashed: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: MARKER_COLOR,
            width: MARKER_WIDTH,
            dashed: true,
        }
    }
}

/// Vertical reference at the price-change date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EventMarker {
    pub date: NaiveDate,
    pub style: MarkerStyle,
}

/// 3D reference segment for one region lane, spanning that region's sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSegment {
    pub region: String,
    pub lane: usize,
    pub low: f64,
    pub high: f64,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub mode: ChartMode,
    pub title: String,
    pub axes: AxisLabels,
    pub series: Vec<Series>,
    pub event: EventMarker,
    pub event_segments: Vec<EventSegment>,
}

impl ChartSpec {
    /// Region labels in lane order.
    pub fn regions(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.region.as_str()).collect()
    }

    /// Min/max sales across all series; `(0.0, 0.0)` when nothing is plotted.
    pub fn value_span(&self) -> (f64, f64) {
        value_span(self.series.iter().flat_map(|s| s.points.iter().map(|p| p.sales)))
    }

    /// First and last plotted date, widened to include the event marker.
    pub fn date_span(&self) -> (NaiveDate, NaiveDate) {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.date))
            .fold((self.event.date, self.event.date), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Builds chart descriptions.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Describe `table` in the given mode. Never fails; an empty table gives a
    /// chart with no series that still carries the event marker.
    pub fn build(table: &SalesTable, mode: ChartMode, event_date: NaiveDate) -> ChartSpec {
        Self::build_for(table, &RegionSelector::All, mode, event_date)
    }

    /// Like [`ChartBuilder::build`], for a view already filtered by `selector`.
    /// In 3D mode an empty view keeps one zero-span segment on the selected lane.
    pub fn build_for(
        table: &SalesTable,
        selector: &RegionSelector,
        mode: ChartMode,
        event_date: NaiveDate,
    ) -> ChartSpec {
        let series: Vec<Series> = table
            .regions()
            .into_iter()
            .enumerate()
            .map(|(idx, region)| {
                let points = table
                    .region_records(&region)
                    .map(|r| SeriesPoint {
                        date: r.date,
                        sales: r.sales,
                    })
                    .collect();
                Series {
                    color: Self::series_color(idx),
                    region,
                    points,
                }
            })
            .collect();

        let (title, axes, event_segments) = match mode {
            ChartMode::Flat => (
                FLAT_TITLE,
                AxisLabels {
                    x: DATE_LABEL.to_string(),
                    y: SALES_LABEL.to_string(),
                    z: None,
                },
                Vec::new(),
            ),
            ChartMode::Regional3d => (
                REGIONAL_TITLE,
                AxisLabels {
                    x: DATE_LABEL.to_string(),
                    y: SALES_LABEL.to_string(),
                    z: Some(REGION_LABEL.to_string()),
                },
                Self::event_segments(&series, selector),
            ),
        };

        ChartSpec {
            mode,
            title: title.to_string(),
            axes,
            series,
            event: EventMarker {
                date: event_date,
                style: MarkerStyle::default(),
            },
            event_segments,
        }
    }

    pub fn series_color(idx: usize) -> [u8; 3] {
        PALETTE[idx % PALETTE.len()]
    }

    /// One reference segment per visible region lane, or a single `(0, 0)`
    /// segment labelled with the selection when nothing is visible.
    fn event_segments(series: &[Series], selector: &RegionSelector) -> Vec<EventSegment> {
        if series.is_empty() {
            let (low, high) = value_span(std::iter::empty());
            return vec![EventSegment {
                region: selector.as_str().to_string(),
                lane: 0,
                low,
                high,
            }];
        }

        series
            .iter()
            .enumerate()
            .map(|(lane, s)| {
                let (low, high) = value_span(s.points.iter().map(|p| p.sales));
                EventSegment {
                    region: s.region.clone(),
                    lane,
                    low,
                    high,
                }
            })
            .collect()
    }
}

/// Observed min/max of `values`, defaulting to zero for an empty input.
pub fn value_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .unwrap_or((0.0, 0.0))
}

/// Date as a plot coordinate (days since the common era).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

/// Inverse of [`date_to_x`], rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > i32::MAX as f64 {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EVENT_DATE;
    use crate::data::{RegionFilter, SalesRecord};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    fn scenario_table() -> SalesTable {
        SalesTable::from_records(vec![
            SalesRecord::new(day(10), "north", 100.0),
            SalesRecord::new(day(20), "south", 200.0),
        ])
    }

    #[test]
    fn one_series_per_region_with_shared_marker() {
        let spec = ChartBuilder::build(&scenario_table(), ChartMode::Flat, EVENT_DATE);

        assert_eq!(spec.regions(), vec!["north", "south"]);
        assert_eq!(spec.series[0].points.len(), 1);
        assert_eq!(spec.series[1].points[0].sales, 200.0);
        assert_ne!(spec.series[0].color, spec.series[1].color);
        assert_eq!(spec.event.date, day(15));
        assert!(spec.event.style.dashed);
        assert!(spec.event_segments.is_empty());
        assert_eq!(spec.title, FLAT_TITLE);
        assert_eq!(spec.axes.z, None);
    }

    #[test]
    fn empty_table_still_carries_marker() {
        for mode in [ChartMode::Flat, ChartMode::Regional3d] {
            let spec = ChartBuilder::build(&SalesTable::default(), mode, EVENT_DATE);
            assert!(spec.series.is_empty());
            let expected_segments = match mode {
                ChartMode::Flat => 0,
                ChartMode::Regional3d => 1,
            };
            assert_eq!(spec.event_segments.len(), expected_segments);
            assert_eq!(spec.event.date, EVENT_DATE);
            assert_eq!(spec.value_span(), (0.0, 0.0));
            assert_eq!(spec.date_span(), (EVENT_DATE, EVENT_DATE));
        }
    }

    #[test]
    fn marker_survives_every_filter() {
        let table = scenario_table();
        for selector in ["all", "north", "south", "west"] {
            let filtered = RegionFilter::apply_str(&table, selector);
            let spec = ChartBuilder::build(&filtered, ChartMode::Regional3d, EVENT_DATE);
            assert_eq!(spec.event.date, EVENT_DATE, "selector {selector}");
        }
    }

    #[test]
    fn empty_regional_view_keeps_zero_segment_on_selected_lane() {
        let selector = RegionSelector::parse("west");
        let view = RegionFilter::apply(&scenario_table(), &selector);
        let spec = ChartBuilder::build_for(&view, &selector, ChartMode::Regional3d, EVENT_DATE);

        assert!(spec.series.is_empty());
        assert_eq!(
            spec.event_segments,
            vec![EventSegment {
                region: "west".to_string(),
                lane: 0,
                low: 0.0,
                high: 0.0,
            }]
        );
    }

    #[test]
    fn regional_segments_span_each_region() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new(day(3), "east", 40.0),
            SalesRecord::new(day(4), "west", 5.0),
            SalesRecord::new(day(18), "east", 90.0),
            SalesRecord::new(day(19), "east", 10.0),
        ]);

        let spec = ChartBuilder::build(&table, ChartMode::Regional3d, EVENT_DATE);
        assert_eq!(spec.axes.z.as_deref(), Some(REGION_LABEL));
        assert_eq!(
            spec.event_segments,
            vec![
                EventSegment {
                    region: "east".to_string(),
                    lane: 0,
                    low: 10.0,
                    high: 90.0,
                },
                EventSegment {
                    region: "west".to_string(),
                    lane: 1,
                    low: 5.0,
                    high: 5.0,
                },
            ]
        );
    }

    #[test]
    fn date_span_includes_event() {
        let table = SalesTable::from_records(vec![SalesRecord::new(day(20), "north", 1.0)]);
        let spec = ChartBuilder::build(&table, ChartMode::Flat, EVENT_DATE);
        assert_eq!(spec.date_span(), (EVENT_DATE, day(20)));
    }

    #[test]
    fn json_form_names_event_date() {
        let spec = ChartBuilder::build(&scenario_table(), ChartMode::Flat, EVENT_DATE);
        let json = spec.to_json().unwrap();
        assert!(json.contains("\"2021-01-15\""));
        assert!(json.contains("\"Flat\""));
    }

    #[test]
    fn date_coordinates_round_trip() {
        assert_eq!(x_to_date(date_to_x(EVENT_DATE)), Some(EVENT_DATE));
        assert_eq!(x_to_date(date_to_x(EVENT_DATE) + 0.4), Some(EVENT_DATE));
        assert_eq!(x_to_date(f64::NAN), None);
    }

    #[test]
    fn palette_wraps() {
        assert_eq!(ChartBuilder::series_color(0), ChartBuilder::series_color(PALETTE.len()));
    }
}
