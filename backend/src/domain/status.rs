//! Duty status derivation.
//!
//! A duty is PAID when one of its occurrences falls inside the current tracking
//! period, OVERDUE when its due date has passed without such an occurrence, and
//! PENDING otherwise. A duty without a due date is never overdue.

use chrono::{Datelike, NaiveDate};

use super::models::duty::{Duty, DutyStatus, Frequency};
use super::models::occurrence::DutyOccurrence;

/// Whether `completed_at` lies in the same tracking period as `today`.
///
/// One-off duties (and duties without a frequency) have a single period
/// spanning their whole life, so any occurrence counts.
pub fn in_tracking_period(frequency: Option<Frequency>, completed_at: NaiveDate, today: NaiveDate) -> bool {
    match frequency {
        None | Some(Frequency::Once) => true,
        Some(Frequency::Weekly) => completed_at.iso_week() == today.iso_week(),
        Some(Frequency::Monthly) => {
            completed_at.year() == today.year() && completed_at.month() == today.month()
        }
        Some(Frequency::Yearly) => completed_at.year() == today.year(),
    }
}

/// Resolve the status of `duty` as of `today`.
///
/// `occurrences` may contain occurrences of other duties; they are ignored.
pub fn resolve_status(duty: &Duty, occurrences: &[DutyOccurrence], today: NaiveDate) -> DutyStatus {
    let paid = occurrences
        .iter()
        .filter(|o| o.duty_id == duty.id)
        .any(|o| in_tracking_period(duty.frequency, o.completed_at, today));

    if paid {
        return DutyStatus::Paid;
    }

    match duty.due_date {
        Some(due_date) if today > due_date => DutyStatus::Overdue,
        _ => DutyStatus::Pending,
    }
}
