//! Reminder scheduling rule.
//!
//! Turns a duty's reminder settings into concrete fire instants. Delivering
//! the notification is left to the platform.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::models::duty::{Duty, Reminder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderAnchor {
    StartDate,
    DueDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledReminder {
    pub duty_id: String,
    pub title: String,
    pub anchor: ReminderAnchor,
    pub fire_at: NaiveDateTime,
}

fn fire_at(anchor_date: chrono::NaiveDate, reminder: &Reminder) -> NaiveDateTime {
    (anchor_date - Duration::days(i64::from(reminder.days_before))).and_time(reminder.time)
}

/// Every enabled reminder of `duty` whose anchor date is set
pub fn schedule(duty: &Duty) -> Vec<ScheduledReminder> {
    let candidates = [
        (ReminderAnchor::StartDate, duty.start_date, duty.reminders.start_date),
        (ReminderAnchor::DueDate, duty.due_date, duty.reminders.due_date),
    ];

    candidates
        .into_iter()
        .filter_map(|(anchor, date, reminder)| {
            let (date, reminder) = (date?, reminder?);
            Some(ScheduledReminder {
                duty_id: duty.id.clone(),
                title: duty.title.clone(),
                anchor,
                fire_at: fire_at(date, &reminder),
            })
        })
        .collect()
}

/// Reminders across `duties` that have not fired yet as of `now`, soonest first
pub fn upcoming_reminders(duties: &[Duty], now: NaiveDateTime) -> Vec<ScheduledReminder> {
    let mut reminders: Vec<ScheduledReminder> = duties
        .iter()
        .flat_map(schedule)
        .filter(|r| r.fire_at >= now)
        .collect();
    reminders.sort_by(|a, b| a.fire_at.cmp(&b.fire_at).then_with(|| a.duty_id.cmp(&b.duty_id)));
    reminders
}
