//! Chart-ready data derived from summaries and occurrences.
//!
//! Only target values live here; animating toward them is up to the renderer.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::format::short_month_name;
use super::models::duty::DutyType;
use super::models::occurrence::DutyOccurrence;
use super::models::summary::{CategorySummaries, MonthlySummary};

pub const PERCENT_MIN: f64 = 0.0;
pub const PERCENT_MAX: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeValue {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        PERCENT_MIN
    } else {
        value.clamp(PERCENT_MIN, PERCENT_MAX)
    }
}

/// Completed vs pending counts of one summary
pub fn to_chart_points(summary: &MonthlySummary) -> Vec<ChartPoint> {
    vec![
        ChartPoint::new("Completed", f64::from(summary.total_completed)),
        ChartPoint::new("Pending", f64::from(summary.pending())),
    ]
}

/// Completion percentage of each category, clamped to `[0, 100]`
pub fn category_chart_points(summaries: &CategorySummaries) -> Vec<ChartPoint> {
    vec![
        ChartPoint::new("Personal", clamp_percent(summaries.personal.completion_rate * 100.0)),
        ChartPoint::new("Company", clamp_percent(summaries.company.completion_rate * 100.0)),
    ]
}

pub fn to_gauge_value(summary: &MonthlySummary) -> GaugeValue {
    GaugeValue {
        value: clamp_percent(summary.completion_rate * 100.0),
        min: PERCENT_MIN,
        max: PERCENT_MAX,
    }
}

/// One bar of a per-duty history chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyChartPoint {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub value: f64,
}

/// Group a duty's occurrences by month, oldest month first.
///
/// Actionable duties chart how many times they were done; payable duties
/// chart how much was paid.
pub fn monthly_chart_data(duty_type: DutyType, occurrences: &[DutyOccurrence]) -> Vec<MonthlyChartPoint> {
    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();

    for occurrence in occurrences {
        let key = (occurrence.completed_at.year(), occurrence.completed_at.month());
        let increment = match duty_type {
            DutyType::Actionable => 1.0,
            DutyType::Payable => occurrence.amount_paid.unwrap_or(0.0),
        };
        *by_month.entry(key).or_insert(0.0) += increment;
    }

    by_month
        .into_iter()
        .map(|((year, month), value)| MonthlyChartPoint {
            year,
            month,
            label: format!("{} {}", short_month_name(month), year),
            value,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChartData {
    pub points: Vec<ChartPoint>,
    /// Fixed scale; the data maximum is used when unset
    pub configured_max: Option<f64>,
}

impl BarChartData {
    pub fn from_monthly(points: &[MonthlyChartPoint]) -> Self {
        Self {
            points: points
                .iter()
                .map(|p| ChartPoint::new(p.label.clone(), p.value))
                .collect(),
            configured_max: None,
        }
    }

    pub fn max_value(&self) -> f64 {
        if let Some(max) = self.configured_max {
            return max;
        }
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    pub fn is_valid(&self) -> bool {
        !self.points.is_empty() && self.points.iter().all(|p| p.value >= 0.0)
    }
}
