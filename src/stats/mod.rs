//! Stats module - price-change impact summary

mod calculator;

pub use calculator::{
    ImpactCalculator, ImpactReport, PeriodStats, RegionImpact, SIGNIFICANCE_THRESHOLD,
};
