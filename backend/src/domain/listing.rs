//! Duty list derivations: joins, category filters and orderings.

use chrono::NaiveDate;

use super::models::category::{CategoryNames, DutyCategory};
use super::models::duty::{Duty, DutyStatus};
use super::models::occurrence::{DutyOccurrence, DutyWithLastOccurrence};

/// Join every duty with its occurrences as of `today`
pub fn join_with_occurrences(
    duties: &[Duty],
    occurrences: &[DutyOccurrence],
    today: NaiveDate,
) -> Vec<DutyWithLastOccurrence> {
    duties
        .iter()
        .map(|duty| DutyWithLastOccurrence::build(duty, occurrences, today))
        .collect()
}

pub fn filter_by_category(
    duties: Vec<DutyWithLastOccurrence>,
    category: DutyCategory,
    categories: &CategoryNames,
) -> Vec<DutyWithLastOccurrence> {
    duties
        .into_iter()
        .filter(|d| categories.matches(category, &d.duty))
        .collect()
}

/// Listing order: duties already done this month first, then by title
pub fn sort_for_listing(duties: &mut [DutyWithLastOccurrence]) {
    duties.sort_by(|a, b| {
        b.has_current_month_occurrence
            .cmp(&a.has_current_month_occurrence)
            .then_with(|| a.duty.title.to_lowercase().cmp(&b.duty.title.to_lowercase()))
    });
}

/// Pending and overdue duties, earliest due date first, undated last
pub fn upcoming(duties: &[DutyWithLastOccurrence]) -> Vec<DutyWithLastOccurrence> {
    let mut open: Vec<DutyWithLastOccurrence> = duties
        .iter()
        .filter(|d| matches!(d.status(), DutyStatus::Pending | DutyStatus::Overdue))
        .cloned()
        .collect();

    open.sort_by(|a, b| match (a.duty.due_date, b.duty.due_date) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.duty.title.cmp(&b.duty.title)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.duty.title.cmp(&b.duty.title),
    });
    open
}
