//! Draft entities for the duty and occurrence edit sessions.
//!
//! Drafts hold raw user input. They become a [`Duty`] or [`DutyOccurrence`]
//! only after the validators in [`crate::domain::validation`] accept them.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use super::duty::{Duty, DutyStatus, DutyType, Frequency, Reminder, ReminderSettings};
use super::occurrence::DutyOccurrence;
use crate::domain::format::{format_time, parse_date, parse_decimal, parse_time};

pub const DEFAULT_REMINDER_DAYS: i64 = 3;
pub const DEFAULT_REMINDER_TIME: &str = "09:00";

/// Fields of [`DutyForm`] that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DutyFormField {
    Title,
    StartDate,
    DueDate,
    Category,
    StartDateReminderDays,
    DueDateReminderDays,
}

/// Field-level validation failures of a duty draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Start date is required")]
    EmptyStartDate,
    #[error("Due date is required")]
    EmptyDueDate,
    #[error("Category is required")]
    EmptyCategory,
    #[error("Reminder days are out of range")]
    InvalidReminderDays,
}

/// A validated draft that still cannot be turned into a duty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DutyConversionError {
    #[error("Invalid start date: {0}")]
    InvalidStartDate(String),
    #[error("Invalid due date: {0}")]
    InvalidDueDate(String),
    #[error("Invalid reminder time: {0}")]
    InvalidReminderTime(String),
    #[error("Invalid reminder days: {0}")]
    InvalidReminderDays(i64),
    #[error("Invalid estimated amount: {0}")]
    InvalidEstimatedAmount(String),
}

/// One typed update per editable field of [`DutyForm`]
#[derive(Debug, Clone, PartialEq)]
pub enum FormFieldUpdate {
    Title(String),
    DutyType(DutyType),
    StartDate(String),
    DueDate(String),
    Category(String),
    Frequency(String),
    EstimatedAmount(String),
    StartReminderEnabled(bool),
    StartReminderDays(i64),
    StartReminderTime(String),
    DueReminderEnabled(bool),
    DueReminderDays(i64),
    DueReminderTime(String),
}

impl FormFieldUpdate {
    /// The validated field this update touches, if any
    pub fn field(&self) -> Option<DutyFormField> {
        match self {
            FormFieldUpdate::Title(_) => Some(DutyFormField::Title),
            FormFieldUpdate::StartDate(_) => Some(DutyFormField::StartDate),
            FormFieldUpdate::DueDate(_) => Some(DutyFormField::DueDate),
            FormFieldUpdate::Category(_) => Some(DutyFormField::Category),
            FormFieldUpdate::StartReminderEnabled(_) | FormFieldUpdate::StartReminderDays(_) => {
                Some(DutyFormField::StartDateReminderDays)
            }
            FormFieldUpdate::DueReminderEnabled(_) | FormFieldUpdate::DueReminderDays(_) => {
                Some(DutyFormField::DueDateReminderDays)
            }
            FormFieldUpdate::DutyType(_)
            | FormFieldUpdate::Frequency(_)
            | FormFieldUpdate::EstimatedAmount(_)
            | FormFieldUpdate::StartReminderTime(_)
            | FormFieldUpdate::DueReminderTime(_) => None,
        }
    }
}

/// Reminder toggle plus its raw offset and time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub enabled: bool,
    pub days_before: i64,
    pub time: String,
}

impl Default for ReminderDraft {
    fn default() -> Self {
        Self {
            enabled: false,
            days_before: DEFAULT_REMINDER_DAYS,
            time: DEFAULT_REMINDER_TIME.to_string(),
        }
    }
}

impl ReminderDraft {
    fn from_reminder(reminder: Option<Reminder>) -> Self {
        match reminder {
            Some(r) => Self {
                enabled: true,
                days_before: i64::from(r.days_before),
                time: format_time(r.time),
            },
            None => Self::default(),
        }
    }

    fn to_reminder(&self) -> Result<Option<Reminder>, DutyConversionError> {
        if !self.enabled {
            return Ok(None);
        }
        let days_before = u32::try_from(self.days_before)
            .map_err(|_| DutyConversionError::InvalidReminderDays(self.days_before))?;
        let time = parse_time(&self.time)
            .ok_or_else(|| DutyConversionError::InvalidReminderTime(self.time.clone()))?;
        Ok(Some(Reminder { days_before, time }))
    }
}

/// Mutable draft of a duty during one create/edit session
#[derive(Debug, Clone, PartialEq)]
pub struct DutyForm {
    /// Set when editing an existing duty
    pub id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub title: String,
    pub duty_type: DutyType,
    pub start_date: String,
    pub due_date: String,
    pub category_name: String,
    pub frequency: String,
    pub estimated_amount: String,
    pub start_reminder: ReminderDraft,
    pub due_reminder: ReminderDraft,
}

impl Default for DutyForm {
    fn default() -> Self {
        Self {
            id: None,
            created_at: None,
            title: String::new(),
            duty_type: DutyType::Payable,
            start_date: String::new(),
            due_date: String::new(),
            category_name: String::new(),
            frequency: String::new(),
            estimated_amount: String::new(),
            start_reminder: ReminderDraft::default(),
            due_reminder: ReminderDraft::default(),
        }
    }
}

fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn optional_date(raw: &str, err: fn(String) -> DutyConversionError) -> Result<Option<NaiveDate>, DutyConversionError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(raw).map(Some).ok_or_else(|| err(raw.to_string()))
}

impl DutyForm {
    /// Blank draft pre-filled with a category
    pub fn for_category(category_name: &str) -> Self {
        Self {
            category_name: category_name.to_string(),
            ..Self::default()
        }
    }

    /// Draft for editing an existing duty
    pub fn from_duty(duty: &Duty) -> Self {
        Self {
            id: Some(duty.id.clone()),
            created_at: Some(duty.created_at),
            title: duty.title.clone(),
            duty_type: duty.duty_type,
            start_date: duty.start_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            due_date: duty.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
            category_name: duty.category_name.clone(),
            frequency: duty.frequency.map(|f| f.as_str().to_string()).unwrap_or_default(),
            estimated_amount: duty.estimated_amount.map(|a| format!("{:.2}", a)).unwrap_or_default(),
            start_reminder: ReminderDraft::from_reminder(duty.reminders.start_date),
            due_reminder: ReminderDraft::from_reminder(duty.reminders.due_date),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn apply(&mut self, update: FormFieldUpdate) {
        match update {
            FormFieldUpdate::Title(value) => self.title = capitalize_first(&value),
            FormFieldUpdate::DutyType(value) => self.duty_type = value,
            FormFieldUpdate::StartDate(value) => self.start_date = value,
            FormFieldUpdate::DueDate(value) => self.due_date = value,
            FormFieldUpdate::Category(value) => self.category_name = value,
            FormFieldUpdate::Frequency(value) => self.frequency = value,
            FormFieldUpdate::EstimatedAmount(value) => self.estimated_amount = value,
            FormFieldUpdate::StartReminderEnabled(value) => self.start_reminder.enabled = value,
            FormFieldUpdate::StartReminderDays(value) => self.start_reminder.days_before = value,
            FormFieldUpdate::StartReminderTime(value) => self.start_reminder.time = value,
            FormFieldUpdate::DueReminderEnabled(value) => self.due_reminder.enabled = value,
            FormFieldUpdate::DueReminderDays(value) => self.due_reminder.days_before = value,
            FormFieldUpdate::DueReminderTime(value) => self.due_reminder.time = value,
        }
    }

    /// Build the duty this draft describes.
    ///
    /// Blank dates become `None`; the validator is responsible for rejecting
    /// blank required fields before this is called.
    pub fn to_duty(&self, now: DateTime<Utc>) -> Result<Duty, DutyConversionError> {
        let start_date = optional_date(&self.start_date, DutyConversionError::InvalidStartDate)?;
        let due_date = optional_date(&self.due_date, DutyConversionError::InvalidDueDate)?;

        let estimated_amount = if self.estimated_amount.trim().is_empty() {
            None
        } else {
            Some(
                parse_decimal(&self.estimated_amount)
                    .ok_or_else(|| DutyConversionError::InvalidEstimatedAmount(self.estimated_amount.clone()))?,
            )
        };

        let reminders = ReminderSettings {
            start_date: self.start_reminder.to_reminder()?,
            due_date: self.due_reminder.to_reminder()?,
        };

        Ok(Duty {
            id: self
                .id
                .clone()
                .unwrap_or_else(|| Duty::generate_id(now.timestamp_millis())),
            title: self.title.trim().to_string(),
            duty_type: self.duty_type,
            category_name: self.category_name.trim().to_string(),
            created_at: self.created_at.unwrap_or(now),
            updated_at: now,
            start_date,
            due_date,
            status: DutyStatus::Pending,
            frequency: Frequency::parse(&self.frequency),
            estimated_amount,
            reminders,
        })
    }
}

/// Fields of [`DutyOccurrenceForm`] that can carry a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DutyOccurrenceFormField {
    PaidAmount,
    CompletedDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OccurrenceValidationError {
    #[error("Enter a valid amount greater than zero")]
    InvalidAmount,
    #[error("Completion date cannot be in the future")]
    InvalidDate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OccurrenceFieldUpdate {
    PaidAmount(String),
    CompletedDate(NaiveDate),
    Notes(String),
}

impl OccurrenceFieldUpdate {
    pub fn field(&self) -> Option<DutyOccurrenceFormField> {
        match self {
            OccurrenceFieldUpdate::PaidAmount(_) => Some(DutyOccurrenceFormField::PaidAmount),
            OccurrenceFieldUpdate::CompletedDate(_) => Some(DutyOccurrenceFormField::CompletedDate),
            OccurrenceFieldUpdate::Notes(_) => None,
        }
    }
}

/// Mutable draft of a new occurrence
#[derive(Debug, Clone, PartialEq)]
pub struct DutyOccurrenceForm {
    pub duty_id: String,
    pub duty_type: DutyType,
    pub paid_amount: String,
    pub completed_date: NaiveDate,
    pub notes: String,
}

impl DutyOccurrenceForm {
    pub fn new(duty_id: &str, duty_type: DutyType, today: NaiveDate) -> Self {
        Self {
            duty_id: duty_id.to_string(),
            duty_type,
            paid_amount: String::new(),
            completed_date: today,
            notes: String::new(),
        }
    }

    pub fn apply(&mut self, update: OccurrenceFieldUpdate) {
        match update {
            OccurrenceFieldUpdate::PaidAmount(value) => self.paid_amount = value,
            OccurrenceFieldUpdate::CompletedDate(value) => self.completed_date = value,
            OccurrenceFieldUpdate::Notes(value) => self.notes = value,
        }
    }

    /// Amount to store; only payable duties with a positive amount keep one
    pub fn amount(&self) -> Option<f64> {
        match self.duty_type {
            DutyType::Payable => parse_decimal(&self.paid_amount).filter(|a| *a > 0.0),
            DutyType::Actionable => None,
        }
    }

    pub fn to_occurrence(&self) -> DutyOccurrence {
        let notes = self.notes.trim();
        DutyOccurrence {
            id: DutyOccurrence::generate_id(),
            duty_id: self.duty_id.clone(),
            amount_paid: self.amount(),
            completed_at: self.completed_date,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}
