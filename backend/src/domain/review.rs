//! Duty review: a month-by-month history of every occurrence.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::format::month_name;
use super::models::category::{CategoryNames, DutyCategory};
use super::models::duty::{Duty, DutyType};
use super::models::occurrence::DutyOccurrence;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyReviewItem {
    pub occurrence_id: String,
    pub duty_id: String,
    pub duty_title: String,
    pub category_name: String,
    pub duty_type: DutyType,
    pub amount_paid: Option<f64>,
    pub completed_at: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDutyReview {
    pub year: i32,
    pub month: u32,
    pub label: String,
    /// Newest first
    pub items: Vec<DutyReviewItem>,
    pub total_amount: f64,
    pub total_completed: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DutyReview {
    /// Newest month first
    pub months: Vec<MonthlyDutyReview>,
    pub total_amount: f64,
    pub total_completed: usize,
}

impl DutyReview {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Build the review over `duties`, optionally restricted to one category.
///
/// Occurrences whose duty is not in `duties` (or is filtered out) are dropped.
pub fn build_review(
    duties: &[Duty],
    occurrences: &[DutyOccurrence],
    filter: Option<DutyCategory>,
    categories: &CategoryNames,
) -> DutyReview {
    let by_id: HashMap<&str, &Duty> = duties
        .iter()
        .filter(|d| filter.map_or(true, |c| categories.matches(c, d)))
        .map(|d| (d.id.as_str(), d))
        .collect();

    let mut by_month: BTreeMap<(i32, u32), Vec<DutyReviewItem>> = BTreeMap::new();
    for occurrence in occurrences {
        let Some(duty) = by_id.get(occurrence.duty_id.as_str()) else {
            continue;
        };
        by_month
            .entry((occurrence.completed_at.year(), occurrence.completed_at.month()))
            .or_default()
            .push(DutyReviewItem {
                occurrence_id: occurrence.id.clone(),
                duty_id: duty.id.clone(),
                duty_title: duty.title.clone(),
                category_name: duty.category_name.clone(),
                duty_type: duty.duty_type,
                amount_paid: occurrence.amount_paid,
                completed_at: occurrence.completed_at,
                notes: occurrence.notes.clone(),
            });
    }

    let months: Vec<MonthlyDutyReview> = by_month
        .into_iter()
        .rev()
        .map(|((year, month), mut items)| {
            items.sort_by(|a, b| {
                b.completed_at
                    .cmp(&a.completed_at)
                    .then_with(|| a.duty_title.cmp(&b.duty_title))
            });
            MonthlyDutyReview {
                year,
                month,
                label: format!("{} {}", month_name(month), year),
                total_amount: items.iter().filter_map(|i| i.amount_paid).sum(),
                total_completed: items.len(),
                items,
            }
        })
        .collect();

    DutyReview {
        total_amount: months.iter().map(|m| m.total_amount).sum(),
        total_completed: months.iter().map(|m| m.total_completed).sum(),
        months,
    }
}
