//! Dashboard State
//! Binds the region selector to the filter and chart builder.

use crate::charts::{ChartBuilder, ChartSpec};
use crate::config::ChartMode;
use crate::data::{RegionFilter, RegionSelector, SalesTable};
use crate::stats::{ImpactCalculator, ImpactReport};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::debug;

/// Current selection and the chart derived from it.
///
/// The loaded table is shared read-only; every selection derives a fresh filtered
/// view, chart and impact report, replacing the previous ones.
pub struct DashboardState {
    table: Arc<SalesTable>,
    mode: ChartMode,
    event_date: NaiveDate,
    selector: RegionSelector,
    visible_rows: usize,
    chart: ChartSpec,
    impact: ImpactReport,
    revision: u64,
}

impl DashboardState {
    /// Start with every region shown.
    pub fn new(table: Arc<SalesTable>, mode: ChartMode, event_date: NaiveDate) -> Self {
        let selector = RegionSelector::All;
        let view = RegionFilter::apply(&table, &selector);
        let chart = ChartBuilder::build_for(&view, &selector, mode, event_date);
        let impact = ImpactCalculator::compute(&view, event_date);

        Self {
            visible_rows: view.len(),
            table,
            mode,
            event_date,
            selector,
            chart,
            impact,
            revision: 0,
        }
    }

    /// Handle one selector change: filter, then rebuild the chart.
    pub fn select_region(&mut self, value: &str) {
        let selector = RegionSelector::parse(value);
        let view = RegionFilter::apply(&self.table, &selector);

        self.chart = ChartBuilder::build_for(&view, &selector, self.mode, self.event_date);
        self.impact = ImpactCalculator::compute(&view, self.event_date);
        self.visible_rows = view.len();
        self.selector = selector;
        self.revision += 1;

        let chart_json = self
            .chart
            .to_json()
            .unwrap_or_else(|e| format!("<unserializable: {e}>"));
        debug!(
            selector = %self.selector,
            rows = self.visible_rows,
            series = self.chart.series.len(),
            revision = self.revision,
            chart = %chart_json,
            "Chart rebuilt"
        );
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn chart(&self) -> &ChartSpec {
        &self.chart
    }

    pub fn impact(&self) -> &ImpactReport {
        &self.impact
    }

    pub fn mode(&self) -> ChartMode {
        self.mode
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn total_rows(&self) -> usize {
        self.table.len()
    }

    /// First and last date of the loaded data, whatever the selection.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.table.date_range()
    }

    /// Bumped on every selection, so views can tell when to redraw cached output.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EVENT_DATE;
    use crate::data::SalesRecord;

    fn state(mode: ChartMode) -> DashboardState {
        let day = |d| NaiveDate::from_ymd_opt(2021, 1, d).unwrap();
        let table = SalesTable::from_records(vec![
            SalesRecord::new(day(10), "north", 100.0),
            SalesRecord::new(day(20), "south", 200.0),
        ]);
        DashboardState::new(Arc::new(table), mode, EVENT_DATE)
    }

    #[test]
    fn starts_unfiltered() {
        let state = state(ChartMode::Flat);
        assert_eq!(state.selector(), &RegionSelector::All);
        assert_eq!(state.visible_rows(), 2);
        assert_eq!(state.chart().series.len(), 2);
        assert_eq!(state.impact().regions.len(), 2);
        assert_eq!(state.revision(), 0);
        assert_eq!(
            state.date_range(),
            NaiveDate::from_ymd_opt(2021, 1, 10).zip(NaiveDate::from_ymd_opt(2021, 1, 20))
        );
    }

    #[test]
    fn selecting_region_replaces_chart() {
        let mut state = state(ChartMode::Regional3d);
        state.select_region("north");

        assert_eq!(state.visible_rows(), 1);
        assert_eq!(state.chart().regions(), vec!["north"]);
        assert_eq!(state.chart().event_segments.len(), 1);
        assert_eq!(state.chart().event.date, EVENT_DATE);
        assert_eq!(state.revision(), 1);
        assert_eq!(state.total_rows(), 2);
    }

    #[test]
    fn unknown_region_gives_empty_chart() {
        let mut state = state(ChartMode::Regional3d);
        state.select_region("atlantis");

        assert_eq!(state.visible_rows(), 0);
        assert!(state.chart().series.is_empty());
        assert_eq!(state.chart().event_segments.len(), 1);
        assert_eq!(state.chart().event_segments[0].region, "atlantis");
        assert_eq!(state.chart().event_segments[0].low, 0.0);
        assert_eq!(state.chart().event_segments[0].high, 0.0);
        assert_eq!(state.chart().event.date, EVENT_DATE);
        assert!(state.impact().is_empty());
    }

    #[test]
    fn rebuilt_chart_serializes_with_selection() {
        let mut state = state(ChartMode::Regional3d);
        state.select_region("south");

        let json = state.chart().to_json().unwrap();
        assert!(json.contains("\"south\""));
        assert!(!json.contains("\"north\""));
        assert!(json.contains("\"2021-01-15\""));
    }

    #[test]
    fn returning_to_all_restores_every_series() {
        let mut state = state(ChartMode::Flat);
        state.select_region("west");
        state.select_region("all");

        assert_eq!(state.visible_rows(), 2);
        assert_eq!(state.chart().regions(), vec!["north", "south"]);
        assert_eq!(state.revision(), 2);
    }
}
