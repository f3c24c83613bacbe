//! Region Filter Module
//! Narrows a sales table to the region picked in the selector.

use crate::config::ALL_REGIONS;
use crate::data::SalesTable;
use std::fmt;

/// Parsed region selector value.
///
/// Any string other than `"all"` is taken as a region label without checking it
/// against the known regions; an unknown label simply matches no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelector {
    All,
    Region(String),
}

impl RegionSelector {
    pub fn parse(value: &str) -> Self {
        if value == ALL_REGIONS {
            RegionSelector::All
        } else {
            RegionSelector::Region(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RegionSelector::All => ALL_REGIONS,
            RegionSelector::Region(region) => region,
        }
    }

    pub fn matches(&self, region: &str) -> bool {
        match self {
            RegionSelector::All => true,
            RegionSelector::Region(wanted) => wanted == region,
        }
    }
}

impl Default for RegionSelector {
    fn default() -> Self {
        RegionSelector::All
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies a region selector to a loaded table.
pub struct RegionFilter;

impl RegionFilter {
    /// Rows whose region equals the selector, or a full copy for `All`.
    /// An empty result is a normal outcome.
    pub fn apply(table: &SalesTable, selector: &RegionSelector) -> SalesTable {
        match selector {
            RegionSelector::All => table.clone(),
            RegionSelector::Region(_) => {
                table.retain_copy(|record| selector.matches(&record.region))
            }
        }
    }

    /// Convenience wrapper taking the raw selector string.
    pub fn apply_str(table: &SalesTable, value: &str) -> SalesTable {
        Self::apply(table, &RegionSelector::parse(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SalesRecord;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn sample_table() -> SalesTable {
        let day = |d| NaiveDate::from_ymd_opt(2021, 1, d).unwrap();
        SalesTable::from_records(vec![
            SalesRecord::new(day(10), "north", 100.0),
            SalesRecord::new(day(12), "south", 80.0),
            SalesRecord::new(day(20), "north", 120.0),
            SalesRecord::new(day(21), "south", 200.0),
        ])
    }

    #[test]
    fn parse_recognises_sentinel() {
        assert_eq!(RegionSelector::parse("all"), RegionSelector::All);
        assert_eq!(
            RegionSelector::parse("north"),
            RegionSelector::Region("north".to_string())
        );
        assert_eq!(RegionSelector::parse("north").to_string(), "north");
    }

    #[test]
    fn all_returns_whole_table_in_order() {
        let table = sample_table();
        assert_eq!(RegionFilter::apply_str(&table, "all"), table);
    }

    #[test]
    fn region_keeps_only_matching_rows() {
        let table = sample_table();
        let north = RegionFilter::apply_str(&table, "north");
        assert_eq!(north.len(), 2);
        assert!(north.records().iter().all(|r| r.region == "north"));
        assert_eq!(north.records()[0].sales, 100.0);
        assert_eq!(north.records()[1].sales, 120.0);
    }

    #[test]
    fn unknown_region_yields_empty_table() {
        let table = sample_table();
        assert!(RegionFilter::apply_str(&table, "west").is_empty());
        assert!(RegionFilter::apply_str(&table, "North").is_empty());
        assert!(RegionFilter::apply_str(&SalesTable::default(), "north").is_empty());
    }

    fn arb_table() -> impl Strategy<Value = SalesTable> {
        let region = prop::sample::select(vec!["north", "south", "east", "west"]);
        prop::collection::vec((0i64..400, region, 0.0f64..10_000.0), 0..60).prop_map(|rows| {
            let base = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
            SalesTable::from_records(
                rows.into_iter()
                    .map(|(offset, region, sales)| {
                        SalesRecord::new(base + chrono::Duration::days(offset), region, sales)
                    })
                    .collect(),
            )
        })
    }

    proptest! {
        #[test]
        fn filtered_rows_are_a_matching_subsequence(
            table in arb_table(),
            selector in prop::sample::select(vec!["all", "north", "south", "east", "west", "nowhere"]),
        ) {
            let filtered = RegionFilter::apply_str(&table, selector);
            if selector == "all" {
                prop_assert_eq!(&filtered, &table);
            } else {
                prop_assert!(filtered.records().iter().all(|r| r.region == selector));
                let expected: Vec<&SalesRecord> = table.region_records(selector).collect();
                let actual: Vec<&SalesRecord> = filtered.records().iter().collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
