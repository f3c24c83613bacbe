//! End-to-end: CSV on disk -> table -> filter -> chart description.

use chrono::NaiveDate;
use sales_dashboard::charts::ChartBuilder;
use sales_dashboard::config::{ChartMode, DashboardConfig, EVENT_DATE};
use sales_dashboard::data::{
    LoaderError, RegionFilter, RegionSelector, SalesLoader, SalesRecord,
};
use std::fs;
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
}

fn write_scenario(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("processed_data.csv");
    fs::write(
        &path,
        "Sales,date,region\n200,2021-01-20,south\n100,2021-01-10,north\n",
    )
    .unwrap();
    path
}

#[test]
fn two_region_scenario() {
    let dir = TempDir::new().unwrap();
    let table = SalesLoader::load_csv(write_scenario(&dir)).unwrap();

    assert_eq!(
        table.records(),
        &[
            SalesRecord::new(day(10), "north", 100.0),
            SalesRecord::new(day(20), "south", 200.0),
        ]
    );

    let north = RegionFilter::apply_str(&table, "north");
    assert_eq!(north.records(), &table.records()[..1]);

    let west = RegionFilter::apply_str(&table, "west");
    assert!(west.is_empty());

    let all = RegionFilter::apply_str(&table, "all");
    assert_eq!(all, table);

    let flat = ChartBuilder::build(&table, ChartMode::Flat, EVENT_DATE);
    assert_eq!(flat.regions(), vec!["north", "south"]);
    assert_eq!(flat.event.date, day(15));

    let deep = ChartBuilder::build(&table, ChartMode::Regional3d, EVENT_DATE);
    assert_eq!(deep.series.len(), 2);
    assert_eq!(deep.event_segments.len(), 2);
    assert_eq!(deep.event_segments[0].low, 100.0);
    assert_eq!(deep.event_segments[1].high, 200.0);

    let selector = RegionSelector::parse("west");
    let empty = ChartBuilder::build_for(&west, &selector, ChartMode::Regional3d, EVENT_DATE);
    assert!(empty.series.is_empty());
    assert_eq!(empty.event.date, day(15));
    assert_eq!(empty.event_segments.len(), 1);
    assert_eq!(empty.event_segments[0].region, "west");
    assert_eq!(
        (empty.event_segments[0].low, empty.event_segments[0].high),
        (0.0, 0.0)
    );
}

#[test]
fn reload_yields_identical_table() {
    let dir = TempDir::new().unwrap();
    let path = write_scenario(&dir);
    assert_eq!(
        SalesLoader::load_csv(&path).unwrap(),
        SalesLoader::load_csv(&path).unwrap()
    );
}

#[test]
fn launch_aborts_when_csv_is_missing() {
    let dir = TempDir::new().unwrap();
    let config = DashboardConfig {
        csv_path: dir.path().join("processed_data.csv"),
        ..DashboardConfig::flat()
    };

    let err = sales_dashboard::launch(config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LoaderError>(),
        Some(LoaderError::FileNotFound(_))
    ));
    assert!(err.root_cause().to_string().contains("processed_data.csv"));
}
