//! Dashboard assembly.
//!
//! Everything on the dashboard is recomputed from a fresh snapshot of duties
//! and occurrences; nothing here is updated incrementally.

use chrono::{Datelike, NaiveDate};

use super::listing::{filter_by_category, join_with_occurrences, sort_for_listing, upcoming};
use super::models::category::{CategoryNames, DutyCategory};
use super::models::duty::Duty;
use super::models::occurrence::{DutyOccurrence, DutyWithLastOccurrence};
use super::models::summary::{CategoryComparison, CategorySummaries};
use super::summary::{compare_with_previous_month, summarize_by_category};

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub upcoming_duties: Vec<DutyWithLastOccurrence>,
    pub personal_duties: Vec<DutyWithLastOccurrence>,
    pub company_duties: Vec<DutyWithLastOccurrence>,
    pub summaries: CategorySummaries,
    /// Absent when the source does not provide a comparison
    pub comparison: Option<CategoryComparison>,
}

/// Build the dashboard for the month containing `today`.
///
/// Each duty list is cut to `preview_limit` entries; summaries always cover
/// every duty.
pub fn build_dashboard(
    duties: &[Duty],
    occurrences: &[DutyOccurrence],
    categories: &CategoryNames,
    today: NaiveDate,
    preview_limit: usize,
) -> DashboardData {
    let joined = join_with_occurrences(duties, occurrences, today);

    let preview = |category: DutyCategory| {
        let mut list = filter_by_category(joined.clone(), category, categories);
        sort_for_listing(&mut list);
        list.truncate(preview_limit);
        list
    };

    let mut upcoming_duties = upcoming(&joined);
    upcoming_duties.truncate(preview_limit);

    DashboardData {
        upcoming_duties,
        personal_duties: preview(DutyCategory::Personal),
        company_duties: preview(DutyCategory::Company),
        summaries: summarize_by_category(duties, occurrences, categories, today.month(), today.year()),
        comparison: Some(compare_with_previous_month(
            duties,
            occurrences,
            categories,
            today.month(),
            today.year(),
        )),
    }
}
