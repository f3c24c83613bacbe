//! Statistics Calculator Module
//! Before/after comparison of sales around the price-change date.

use crate::data::SalesTable;
use chrono::NaiveDate;
use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Significance threshold for t-test
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Sales summary for one side of the event date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeriodStats {
    pub count: usize,
    pub total: f64,
    pub mean: Option<f64>,
}

/// Impact of the price change on one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionImpact {
    pub region: String,
    /// Rows strictly before the event date
    pub before: PeriodStats,
    /// Rows on or after the event date
    pub after: PeriodStats,
    /// Relative change of the mean, in percent
    pub change_pct: Option<f64>,
    /// Two-sided Welch t-test, after vs before
    pub p_value: Option<f64>,
    pub is_significant: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactReport {
    pub event_date: NaiveDate,
    pub regions: Vec<RegionImpact>,
}

impl ImpactReport {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn has_significant_results(&self) -> bool {
        self.regions.iter().any(|r| r.is_significant)
    }
}

/// Computes price-change impact per region.
pub struct ImpactCalculator;

impl ImpactCalculator {
    pub fn period_stats(values: &[f64]) -> PeriodStats {
        let total: f64 = values.iter().sum();
        PeriodStats {
            count: values.len(),
            total,
            mean: (!values.is_empty()).then(|| total / values.len() as f64),
        }
    }

    /// Relative change from `before` to `after`, in percent.
    pub fn change_pct(before: &PeriodStats, after: &PeriodStats) -> Option<f64> {
        match (before.mean, after.mean) {
            (Some(b), Some(a)) if b != 0.0 => Some((a - b) / b * 100.0),
            _ => None,
        }
    }

    /// Welch's t-test (independent samples, unequal variance). Two-tailed p-value.
    pub fn welch_ttest(sample: &[f64], baseline: &[f64]) -> Option<f64> {
        let n1 = sample.len() as f64;
        let n2 = baseline.len() as f64;

        if n1 < 2.0 || n2 < 2.0 {
            return None;
        }

        let mean1 = sample.iter().sum::<f64>() / n1;
        let mean2 = baseline.iter().sum::<f64>() / n2;

        let var1 = sample.iter().map(|x| (x - mean1).powi(2)).sum::<f64>() / (n1 - 1.0);
        let var2 = baseline.iter().map(|x| (x - mean2).powi(2)).sum::<f64>() / (n2 - 1.0);

        let se = (var1 / n1 + var2 / n2).sqrt();
        if se == 0.0 {
            return Some(if mean1 == mean2 { 1.0 } else { 0.0 });
        }

        let t = (mean1 - mean2) / se;

        // Welch-Satterthwaite degrees of freedom
        let df_num = (var1 / n1 + var2 / n2).powi(2);
        let df_denom = (var1 / n1).powi(2) / (n1 - 1.0) + (var2 / n2).powi(2) / (n2 - 1.0);
        let df = df_num / df_denom;

        StudentsT::new(0.0, 1.0, df)
            .ok()
            .map(|dist| 2.0 * (1.0 - dist.cdf(t.abs())))
    }

    /// Impact of one region's sales split at `event_date`.
    pub fn region_impact(
        table: &SalesTable,
        region: &str,
        event_date: NaiveDate,
    ) -> RegionImpact {
        let (before, after): (Vec<_>, Vec<_>) = table
            .region_records(region)
            .partition(|record| record.date < event_date);
        let before: Vec<f64> = before.into_iter().map(|r| r.sales).collect();
        let after: Vec<f64> = after.into_iter().map(|r| r.sales).collect();

        let before_stats = Self::period_stats(&before);
        let after_stats = Self::period_stats(&after);
        let p_value = Self::welch_ttest(&after, &before);

        RegionImpact {
            region: region.to_string(),
            change_pct: Self::change_pct(&before_stats, &after_stats),
            before: before_stats,
            after: after_stats,
            is_significant: p_value.is_some_and(|p| p <= SIGNIFICANCE_THRESHOLD),
            p_value,
        }
    }

    /// Compute every visible region in parallel; output follows the table's region order.
    pub fn compute(table: &SalesTable, event_date: NaiveDate) -> ImpactReport {
        let regions = table
            .regions()
            .par_iter()
            .map(|region| Self::region_impact(table, region, event_date))
            .collect();

        ImpactReport {
            event_date,
            regions,
        }
    }
}
