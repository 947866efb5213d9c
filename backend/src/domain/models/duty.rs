use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of obligation a duty represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyType {
    /// Something that gets paid (a bill); occurrences carry an amount
    Payable,
    /// Something that gets done; occurrences are counted
    Actionable,
}

impl DutyType {
    /// Parse the wire representation. Unknown values fall back to `Actionable`.
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "PAYABLE" => DutyType::Payable,
            _ => DutyType::Actionable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DutyType::Payable => "PAYABLE",
            DutyType::Actionable => "ACTIONABLE",
        }
    }
}

impl fmt::Display for DutyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived state of a duty for the current tracking period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyStatus {
    Pending,
    Paid,
    Overdue,
}

impl fmt::Display for DutyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DutyStatus::Pending => write!(f, "PENDING"),
            DutyStatus::Paid => write!(f, "PAID"),
            DutyStatus::Overdue => write!(f, "OVERDUE"),
        }
    }
}

/// How often a duty repeats. Determines the tracking period used for status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Once,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Lenient parse; unknown or blank values yield `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ONCE" | "ONE_OFF" | "ONE-OFF" => Some(Frequency::Once),
            "WEEKLY" => Some(Frequency::Weekly),
            "MONTHLY" => Some(Frequency::Monthly),
            "YEARLY" | "ANNUAL" | "ANNUALLY" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Once => "ONCE",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Yearly => "YEARLY",
        }
    }
}

/// A reminder offset relative to one of the duty's dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub days_before: u32,
    pub time: NaiveTime,
}

/// Reminder configuration attached to a duty.
///
/// This is data only; scheduling the actual notification belongs to the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub start_date: Option<Reminder>,
    pub due_date: Option<Reminder>,
}

/// A trackable obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Duty {
    pub id: String,
    pub title: String,
    pub duty_type: DutyType,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    /// Stored status; recomputed on read by the status resolver
    pub status: DutyStatus,
    pub frequency: Option<Frequency>,
    pub estimated_amount: Option<f64>,
    #[serde(default)]
    pub reminders: ReminderSettings,
}

impl Duty {
    /// `duty::<millis>-<random>`; the suffix keeps ids created in the same millisecond apart
    pub fn generate_id(now_millis: i64) -> String {
        format!("duty::{}-{}", now_millis, uuid::Uuid::new_v4().simple())
    }

    pub fn is_recurring(&self) -> bool {
        matches!(
            self.frequency,
            Some(Frequency::Weekly) | Some(Frequency::Monthly) | Some(Frequency::Yearly)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_type_fallback() {
        assert_eq!(DutyType::from_str_or_default("PAYABLE"), DutyType::Payable);
        assert_eq!(DutyType::from_str_or_default("payable"), DutyType::Payable);
        assert_eq!(DutyType::from_str_or_default("ACTIONABLE"), DutyType::Actionable);
        assert_eq!(DutyType::from_str_or_default("UNKNOWN"), DutyType::Actionable);
        assert_eq!(DutyType::from_str_or_default(""), DutyType::Actionable);
    }

    #[test]
    fn test_frequency_parse() {
        assert_eq!(Frequency::parse("monthly"), Some(Frequency::Monthly));
        assert_eq!(Frequency::parse(" WEEKLY "), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("annual"), Some(Frequency::Yearly));
        assert_eq!(Frequency::parse("fortnightly"), None);
        assert_eq!(Frequency::parse(""), None);
    }

    #[test]
    fn test_generate_id() {
        let id = Duty::generate_id(1_700_000_000_000);
        assert!(id.starts_with("duty::1700000000000-"));
        assert_ne!(id, Duty::generate_id(1_700_000_000_000));
    }
}
