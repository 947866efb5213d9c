use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::duty::{Duty, DutyStatus};
use crate::domain::status::resolve_status;

/// One completion (or payment) event of a duty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyOccurrence {
    pub id: String,
    pub duty_id: String,
    /// Only set for payable duties
    pub amount_paid: Option<f64>,
    pub completed_at: NaiveDate,
    pub notes: Option<String>,
}

impl DutyOccurrence {
    pub fn generate_id() -> String {
        format!("occurrence::{}", uuid::Uuid::new_v4())
    }

    pub fn falls_in(&self, month: u32, year: i32) -> bool {
        self.completed_at.month() == month && self.completed_at.year() == year
    }
}

/// Read-only join of a duty with its most recent occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct DutyWithLastOccurrence {
    pub duty: Duty,
    pub last_occurrence: Option<DutyOccurrence>,
    pub has_current_month_occurrence: bool,
}

impl DutyWithLastOccurrence {
    /// Join a duty with its occurrences as of `today`.
    ///
    /// Occurrences belonging to other duties are ignored. The returned duty
    /// carries a freshly resolved status.
    pub fn build(duty: &Duty, occurrences: &[DutyOccurrence], today: NaiveDate) -> Self {
        let own: Vec<&DutyOccurrence> = occurrences
            .iter()
            .filter(|o| o.duty_id == duty.id)
            .collect();

        let last_occurrence = own
            .iter()
            .max_by_key(|o| o.completed_at)
            .map(|o| (*o).clone());

        let has_current_month_occurrence = own
            .iter()
            .any(|o| o.falls_in(today.month(), today.year()));

        let mut duty = duty.clone();
        duty.status = resolve_status(&duty, occurrences, today);

        Self {
            duty,
            last_occurrence,
            has_current_month_occurrence,
        }
    }

    pub fn status(&self) -> DutyStatus {
        self.duty.status
    }
}
