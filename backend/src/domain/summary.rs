//! Monthly summary aggregation.
//!
//! Folds duties and their occurrences into per-category monthly statistics.
//! Every duty passed in is "in scope" for its month: `total_tasks` counts all
//! of them, not only the ones due that month. All functions here are pure and
//! leave their inputs untouched.

use std::collections::{BTreeSet, HashSet};

use super::models::category::{CategoryNames, DutyCategory};
use super::models::duty::Duty;
use super::models::occurrence::{DutyOccurrence, DutyWithLastOccurrence};
use super::models::summary::{
    completion_rate, CategoryComparison, CategorySummaries, MonthlySummary, SummaryComparison,
};

/// The month before `(month, year)`
pub fn previous_month(month: u32, year: i32) -> (u32, i32) {
    if month <= 1 {
        (12, year - 1)
    } else {
        (month - 1, year)
    }
}

fn fold<'a>(
    duty_ids: &HashSet<&str>,
    total_tasks: usize,
    occurrences: impl IntoIterator<Item = &'a DutyOccurrence>,
    month: u32,
    year: i32,
) -> MonthlySummary {
    let mut total_amount_paid = 0.0;
    let mut completed: BTreeSet<&str> = BTreeSet::new();

    for occurrence in occurrences {
        if !occurrence.falls_in(month, year) || !duty_ids.contains(occurrence.duty_id.as_str()) {
            continue;
        }
        total_amount_paid += occurrence.amount_paid.unwrap_or(0.0);
        completed.insert(occurrence.duty_id.as_str());
    }

    let total_tasks = u32::try_from(total_tasks).unwrap_or(u32::MAX);
    let total_completed = u32::try_from(completed.len()).unwrap_or(u32::MAX);

    MonthlySummary {
        total_amount_paid,
        total_completed,
        total_tasks,
        current_month: month,
        year,
        completion_rate: completion_rate(total_completed, total_tasks),
    }
}

/// Summarize `duties` for `(month, year)` from a full occurrence list.
///
/// Occurrences of duties outside `duties` are ignored.
pub fn summarize(duties: &[Duty], occurrences: &[DutyOccurrence], month: u32, year: i32) -> MonthlySummary {
    let duty_ids: HashSet<&str> = duties.iter().map(|d| d.id.as_str()).collect();
    fold(&duty_ids, duties.len(), occurrences, month, year)
}

/// Summarize joined duties for `(month, year)` using each duty's last occurrence.
///
/// Only the latest occurrence of each duty is seen: a duty paid twice in the
/// month contributes one amount, and a month before a duty's latest
/// occurrence reads as not completed. Use [`summarize`] over the full
/// occurrence list for exact monthly totals.
pub fn aggregate(duties: &[DutyWithLastOccurrence], month: u32, year: i32) -> MonthlySummary {
    let duty_ids: HashSet<&str> = duties.iter().map(|d| d.duty.id.as_str()).collect();
    let occurrences = duties.iter().filter_map(|d| d.last_occurrence.as_ref());
    fold(&duty_ids, duties.len(), occurrences, month, year)
}

/// Personal, company and overall summaries for one month
pub fn summarize_by_category(
    duties: &[Duty],
    occurrences: &[DutyOccurrence],
    categories: &CategoryNames,
    month: u32,
    year: i32,
) -> CategorySummaries {
    let in_category = |category: DutyCategory| -> Vec<Duty> {
        duties
            .iter()
            .filter(|d| categories.matches(category, d))
            .cloned()
            .collect()
    };

    CategorySummaries {
        personal: summarize(&in_category(DutyCategory::Personal), occurrences, month, year),
        company: summarize(&in_category(DutyCategory::Company), occurrences, month, year),
        overall: summarize(duties, occurrences, month, year),
    }
}

/// Compare `(month, year)` against the month before it
pub fn compare_with_previous_month(
    duties: &[Duty],
    occurrences: &[DutyOccurrence],
    categories: &CategoryNames,
    month: u32,
    year: i32,
) -> CategoryComparison {
    let current = summarize_by_category(duties, occurrences, categories, month, year);
    let (prev_month, prev_year) = previous_month(month, year);
    let previous = summarize_by_category(duties, occurrences, categories, prev_month, prev_year);

    CategoryComparison {
        personal: SummaryComparison::between(&current.personal, &previous.personal),
        company: SummaryComparison::between(&current.company, &previous.company),
        overall: SummaryComparison::between(&current.overall, &previous.overall),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::duty::{DutyStatus, DutyType, ReminderSettings};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn duty(id: &str, title: &str, category: &str) -> Duty {
        Duty {
            id: id.to_string(),
            title: title.to_string(),
            duty_type: DutyType::Payable,
            category_name: category.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            start_date: None,
            due_date: Some(date(2024, 10, 1)),
            status: DutyStatus::Pending,
            frequency: None,
            estimated_amount: None,
            reminders: ReminderSettings::default(),
        }
    }

    fn occurrence(duty_id: &str, amount: Option<f64>, completed_at: NaiveDate) -> DutyOccurrence {
        DutyOccurrence {
            id: format!("occ-{}-{}", duty_id, completed_at),
            duty_id: duty_id.to_string(),
            amount_paid: amount,
            completed_at,
            notes: None,
        }
    }

    #[test]
    fn test_empty_scope_has_zero_rate() {
        let summary = summarize(&[], &[], 10, 2024);
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.total_completed, 0);
        assert_eq!(summary.completion_rate, 0.0);

        let summary = aggregate(&[], 10, 2024);
        assert_eq!(summary.completion_rate, 0.0);
    }

    #[test]
    fn test_rent_scenario_without_occurrence() {
        let duties = vec![duty("d1", "Rent", "Personal")];
        let summary = summarize(&duties, &[], 10, 2024);

        assert_eq!(summary.total_completed, 0);
        assert_eq!(summary.total_tasks, 1);
        assert_eq!(summary.completion_rate, 0.0);
        assert_eq!(summary.total_amount_paid, 0.0);
    }

    #[test]
    fn test_rent_scenario_with_occurrence() {
        let duties = vec![duty("d1", "Rent", "Personal")];
        let occurrences = vec![occurrence("d1", Some(1200.0), date(2024, 10, 5))];

        let summary = summarize(&duties, &occurrences, 10, 2024);

        assert_eq!(summary.total_completed, 1);
        assert_eq!(summary.total_amount_paid, 1200.0);
        assert_eq!(summary.completion_rate, 1.0);
        assert_eq!(summary.current_month, 10);
        assert_eq!(summary.year, 2024);
    }

    #[test]
    fn test_counts_distinct_duties_and_sums_all_amounts() {
        let duties = vec![duty("d1", "Rent", "Personal"), duty("d2", "Power", "Personal")];
        let occurrences = vec![
            occurrence("d1", Some(600.0), date(2024, 10, 1)),
            occurrence("d1", Some(600.0), date(2024, 10, 20)),
            occurrence("d2", None, date(2024, 9, 30)),
            occurrence("other", Some(999.0), date(2024, 10, 3)),
        ];

        let summary = summarize(&duties, &occurrences, 10, 2024);

        assert_eq!(summary.total_completed, 1);
        assert_eq!(summary.total_tasks, 2);
        assert_eq!(summary.total_amount_paid, 1200.0);
        assert_eq!(summary.completion_rate, 0.5);
    }

    #[test]
    fn test_aggregate_is_idempotent_and_pure() {
        let today = date(2024, 10, 15);
        let occurrences = vec![occurrence("d1", Some(80.0), date(2024, 10, 2))];
        let duties = vec![
            DutyWithLastOccurrence::build(&duty("d1", "Internet", "Personal"), &occurrences, today),
            DutyWithLastOccurrence::build(&duty("d2", "Gym", "Personal"), &occurrences, today),
        ];
        let snapshot = duties.clone();

        let first = aggregate(&duties, 10, 2024);
        let second = aggregate(&duties, 10, 2024);

        assert_eq!(first, second);
        assert_eq!(duties, snapshot);
        assert_eq!(first.total_completed, 1);
        assert_eq!(first.total_amount_paid, 80.0);
        assert_eq!(first.completion_rate, 0.5);
    }

    #[test]
    fn test_aggregate_sees_only_last_occurrence() {
        let today = date(2024, 10, 25);
        let duties = vec![duty("d1", "Rent", "Personal")];
        let occurrences = vec![
            occurrence("d1", Some(600.0), date(2024, 9, 10)),
            occurrence("d1", Some(600.0), date(2024, 10, 1)),
            occurrence("d1", Some(600.0), date(2024, 10, 20)),
        ];
        let joined = vec![DutyWithLastOccurrence::build(&duties[0], &occurrences, today)];

        assert_eq!(aggregate(&joined, 10, 2024).total_amount_paid, 600.0);
        assert_eq!(summarize(&duties, &occurrences, 10, 2024).total_amount_paid, 1200.0);

        assert_eq!(aggregate(&joined, 9, 2024).total_completed, 0);
        assert_eq!(summarize(&duties, &occurrences, 9, 2024).total_completed, 1);
    }

    #[test]
    fn test_summarize_by_category() {
        let duties = vec![
            duty("p1", "Rent", "Personal"),
            duty("p2", "Gym", "personal"),
            duty("c1", "Taxes", "Company"),
            duty("x1", "Misc", "Other"),
        ];
        let occurrences = vec![
            occurrence("p1", Some(1000.0), date(2024, 10, 5)),
            occurrence("c1", Some(300.0), date(2024, 10, 7)),
        ];

        let summaries = summarize_by_category(&duties, &occurrences, &CategoryNames::default(), 10, 2024);

        assert_eq!(summaries.personal.total_tasks, 2);
        assert_eq!(summaries.personal.completion_rate, 0.5);
        assert_eq!(summaries.company.total_tasks, 1);
        assert_eq!(summaries.company.completion_rate, 1.0);
        assert_eq!(summaries.overall.total_tasks, 4);
        assert_eq!(summaries.overall.total_amount_paid, 1300.0);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(previous_month(1, 2024), (12, 2023));
        assert_eq!(previous_month(10, 2024), (9, 2024));
    }

    #[test]
    fn test_compare_with_previous_month() {
        let duties = vec![duty("p1", "Rent", "Personal")];
        let occurrences = vec![
            occurrence("p1", Some(900.0), date(2023, 12, 5)),
            occurrence("p1", Some(1000.0), date(2024, 1, 5)),
        ];

        let comparison =
            compare_with_previous_month(&duties, &occurrences, &CategoryNames::default(), 1, 2024);

        assert_eq!(comparison.personal.amount_delta, 100.0);
        assert_eq!(comparison.personal.completed_delta, 0);
        assert_eq!(comparison.personal.completion_rate_delta, 0.0);
        assert_eq!(comparison.company.amount_delta, 0.0);
    }
}
