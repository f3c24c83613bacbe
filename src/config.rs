//! Dashboard Configuration
//! Compiled-in settings for the two dashboard variants.

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// Price increase date marked on every chart.
pub const EVENT_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2021, 1, 15) {
    Some(date) => date,
    None => panic!("invalid event date"),
};

/// Input file, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "processed_data.csv";

/// Sentinel selector value meaning "no region filter".
pub const ALL_REGIONS: &str = "all";

/// Values offered by the region selector.
pub const REGION_OPTIONS: [&str; 5] = [ALL_REGIONS, "north", "south", "east", "west"];

pub const PAGE_TITLE: &str = "Soul Foods - Pink Morsel Sales Performance";

/// How the chart is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartMode {
    /// Date on x, sales on y, one line per region
    Flat,
    /// Date, sales and region on three axes
    Regional3d,
}

impl Default for ChartMode {
    fn default() -> Self {
        ChartMode::Flat
    }
}

/// Region selector widget flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorStyle {
    Radio,
    Dropdown,
}

/// Everything a dashboard process needs before it opens its window.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub csv_path: PathBuf,
    pub event_date: NaiveDate,
    pub mode: ChartMode,
    pub selector_style: SelectorStyle,
    pub page_title: String,
    pub description: String,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl DashboardConfig {
    /// 2D line chart dashboard.
    pub fn flat() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            event_date: EVENT_DATE,
            mode: ChartMode::Flat,
            selector_style: SelectorStyle::Radio,
            page_title: PAGE_TITLE.to_string(),
            description: "This dashboard visualizes the daily sales of Pink Morsels. \
                The red dashed line indicates the date of the price increase on January 15th, 2021."
                .to_string(),
            window_title: "Pink Morsel Sales".to_string(),
            window_size: [1400.0, 800.0],
            min_window_size: [900.0, 600.0],
        }
    }

    /// 3D dashboard with one depth lane per region.
    pub fn regional_3d() -> Self {
        Self {
            mode: ChartMode::Regional3d,
            selector_style: SelectorStyle::Dropdown,
            description: "Daily Pink Morsel sales by region. \
                The red dashed lines mark the price increase on January 15th, 2021. \
                Drag the chart to rotate it."
                .to_string(),
            window_title: "Pink Morsel Sales 3D".to_string(),
            ..Self::flat()
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::flat()
    }
}
