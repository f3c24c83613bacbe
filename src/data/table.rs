//! Sales Table Module
//! In-memory sales rows, ordered by date.

use chrono::NaiveDate;
use serde::Serialize;

/// One row of the processed sales file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub region: String,
    pub sales: f64,
}

impl SalesRecord {
    pub fn new(date: NaiveDate, region: impl Into<String>, sales: f64) -> Self {
        Self {
            date,
            region: region.into(),
            sales,
        }
    }
}

/// Date-ordered sales rows. Never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
}

impl SalesTable {
    /// Build a table, sorting rows by date. Rows sharing a date keep their input order.
    pub fn from_records(mut records: Vec<SalesRecord>) -> Self {
        records.sort_by_key(|record| record.date);
        Self { records }
    }

    /// Wrap rows that are already in date order (filtered views).
    fn from_sorted(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct regions in order of first appearance.
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = Vec::new();
        for record in &self.records {
            if !regions.iter().any(|r| r == &record.region) {
                regions.push(record.region.clone());
            }
        }
        regions
    }

    /// Rows of one region, in table order.
    pub fn region_records<'a>(
        &'a self,
        region: &'a str,
    ) -> impl Iterator<Item = &'a SalesRecord> + 'a {
        self.records.iter().filter(move |record| record.region == region)
    }

    /// Copy of the rows matching `predicate`, order preserved.
    pub(crate) fn retain_copy(&self, predicate: impl Fn(&SalesRecord) -> bool) -> Self {
        Self::from_sorted(
            self.records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
        )
    }

    /// First and last date, if any rows exist.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.date;
        let last = self.records.last()?.date;
        Some((first, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, d).unwrap()
    }

    #[test]
    fn from_records_sorts_by_date_and_keeps_ties_stable() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new(day(20), "south", 200.0),
            SalesRecord::new(day(10), "north", 100.0),
            SalesRecord::new(day(10), "east", 50.0),
        ]);

        let regions: Vec<&str> = table.records().iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["north", "east", "south"]);
        assert_eq!(table.date_range(), Some((day(10), day(20))));
    }

    #[test]
    fn regions_follow_first_appearance() {
        let table = SalesTable::from_records(vec![
            SalesRecord::new(day(1), "west", 1.0),
            SalesRecord::new(day(2), "north", 1.0),
            SalesRecord::new(day(3), "west", 1.0),
        ]);
        assert_eq!(table.regions(), vec!["west".to_string(), "north".to_string()]);
        assert_eq!(table.region_records("west").count(), 2);
    }

    #[test]
    fn empty_table_has_no_range() {
        let table = SalesTable::default();
        assert!(table.is_empty());
        assert!(table.regions().is_empty());
        assert_eq!(table.date_range(), None);
    }
}
