//! Form validation for duty and occurrence drafts.
//!
//! Validation failures are data: each validator returns a map from field to
//! error tag, empty when the draft is acceptable. Every rule is checked; none
//! short-circuits another.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::format::parse_decimal;
use super::models::duty::DutyType;
use super::models::form::{
    DutyForm, DutyFormField, DutyOccurrenceForm, DutyOccurrenceFormField, OccurrenceValidationError,
    ReminderDraft, ValidationError,
};

/// Inclusive range accepted for a reminder's "days before"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderDayBounds {
    pub min: u32,
    pub max: u32,
}

impl Default for ReminderDayBounds {
    fn default() -> Self {
        Self { min: 0, max: 365 }
    }
}

impl ReminderDayBounds {
    pub fn contains(&self, days: i64) -> bool {
        days >= i64::from(self.min) && days <= i64::from(self.max)
    }
}

pub type DutyFormErrors = BTreeMap<DutyFormField, ValidationError>;
pub type OccurrenceFormErrors = BTreeMap<DutyOccurrenceFormField, OccurrenceValidationError>;

#[derive(Debug, Clone, Copy, Default)]
pub struct DutyValidator {
    bounds: ReminderDayBounds,
}

impl DutyValidator {
    pub fn new(bounds: ReminderDayBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> ReminderDayBounds {
        self.bounds
    }

    pub fn validate(&self, form: &DutyForm) -> DutyFormErrors {
        let mut errors = BTreeMap::new();

        if form.title.trim().is_empty() {
            errors.insert(DutyFormField::Title, ValidationError::EmptyTitle);
        }
        if form.start_date.trim().is_empty() {
            errors.insert(DutyFormField::StartDate, ValidationError::EmptyStartDate);
        }
        if form.due_date.trim().is_empty() {
            errors.insert(DutyFormField::DueDate, ValidationError::EmptyDueDate);
        }
        if form.category_name.trim().is_empty() {
            errors.insert(DutyFormField::Category, ValidationError::EmptyCategory);
        }
        if !self.reminder_in_range(&form.start_reminder) {
            errors.insert(DutyFormField::StartDateReminderDays, ValidationError::InvalidReminderDays);
        }
        if !self.reminder_in_range(&form.due_reminder) {
            errors.insert(DutyFormField::DueDateReminderDays, ValidationError::InvalidReminderDays);
        }

        errors
    }

    fn reminder_in_range(&self, reminder: &ReminderDraft) -> bool {
        !reminder.enabled || self.bounds.contains(reminder.days_before)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DutyOccurrenceValidator;

impl DutyOccurrenceValidator {
    /// Validate an occurrence draft as of `today`.
    ///
    /// A blank amount is accepted; only an entered amount that is not a
    /// positive number is rejected.
    pub fn validate(&self, form: &DutyOccurrenceForm, today: NaiveDate) -> OccurrenceFormErrors {
        let mut errors = BTreeMap::new();

        if form.duty_type == DutyType::Payable && !form.paid_amount.trim().is_empty() {
            let valid = parse_decimal(&form.paid_amount).map_or(false, |amount| amount > 0.0);
            if !valid {
                errors.insert(DutyOccurrenceFormField::PaidAmount, OccurrenceValidationError::InvalidAmount);
            }
        }
        if form.completed_date > today {
            errors.insert(DutyOccurrenceFormField::CompletedDate, OccurrenceValidationError::InvalidDate);
        }

        errors
    }
}

/// Message shown next to a duty form field
pub fn field_error_message(error: &ValidationError, bounds: &ReminderDayBounds) -> String {
    match error {
        ValidationError::InvalidReminderDays => {
            format!("Reminder days must be between {} and {}", bounds.min, bounds.max)
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> DutyForm {
        DutyForm {
            title: "Rent".to_string(),
            start_date: "2024-01-01".to_string(),
            due_date: "2024-01-05".to_string(),
            category_name: "Personal".to_string(),
            ..DutyForm::default()
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(DutyValidator::default().validate(&valid_form()).is_empty());
    }

    #[test]
    fn test_empty_title_only() {
        let form = DutyForm {
            title: String::new(),
            ..valid_form()
        };

        let errors = DutyValidator::default().validate(&form);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(&DutyFormField::Title), Some(&ValidationError::EmptyTitle));
    }

    #[test]
    fn test_all_required_fields_checked() {
        let form = DutyForm {
            title: "   ".to_string(),
            ..DutyForm::default()
        };

        let errors = DutyValidator::default().validate(&form);

        assert_eq!(errors.get(&DutyFormField::Title), Some(&ValidationError::EmptyTitle));
        assert_eq!(errors.get(&DutyFormField::StartDate), Some(&ValidationError::EmptyStartDate));
        assert_eq!(errors.get(&DutyFormField::DueDate), Some(&ValidationError::EmptyDueDate));
        assert_eq!(errors.get(&DutyFormField::Category), Some(&ValidationError::EmptyCategory));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_reminder_days_bounds() {
        let validator = DutyValidator::default();

        let mut form = valid_form();
        form.start_reminder.enabled = true;
        form.start_reminder.days_before = 0;
        form.due_reminder.enabled = true;
        form.due_reminder.days_before = 365;
        assert!(validator.validate(&form).is_empty());

        form.start_reminder.days_before = -1;
        form.due_reminder.days_before = 366;
        let errors = validator.validate(&form);
        assert_eq!(
            errors.get(&DutyFormField::StartDateReminderDays),
            Some(&ValidationError::InvalidReminderDays)
        );
        assert_eq!(
            errors.get(&DutyFormField::DueDateReminderDays),
            Some(&ValidationError::InvalidReminderDays)
        );
    }

    #[test]
    fn test_disabled_reminder_is_not_checked() {
        let mut form = valid_form();
        form.due_reminder.days_before = 9999;
        assert!(DutyValidator::default().validate(&form).is_empty());
    }

    #[test]
    fn test_configured_bounds() {
        let validator = DutyValidator::new(ReminderDayBounds { min: 1, max: 30 });
        let mut form = valid_form();
        form.due_reminder.enabled = true;
        form.due_reminder.days_before = 31;

        assert_eq!(validator.validate(&form).len(), 1);
        assert_eq!(
            field_error_message(&ValidationError::InvalidReminderDays, &ReminderDayBounds { min: 1, max: 30 }),
            "Reminder days must be between 1 and 30"
        );
        assert_eq!(
            field_error_message(&ValidationError::EmptyTitle, &ReminderDayBounds::default()),
            "Title is required"
        );
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_occurrence_amount_rules() {
        let today = date(2024, 10, 15);
        let validator = DutyOccurrenceValidator;
        let mut form = DutyOccurrenceForm::new("duty::1", DutyType::Payable, today);

        assert!(validator.validate(&form, today).is_empty());

        for bad in ["0", "-5", "abc", "0,00"] {
            form.paid_amount = bad.to_string();
            assert_eq!(
                validator.validate(&form, today).get(&DutyOccurrenceFormField::PaidAmount),
                Some(&OccurrenceValidationError::InvalidAmount),
                "amount {:?}",
                bad
            );
        }

        form.paid_amount = "12,50".to_string();
        assert!(validator.validate(&form, today).is_empty());
    }

    #[test]
    fn test_actionable_amount_ignored() {
        let today = date(2024, 10, 15);
        let mut form = DutyOccurrenceForm::new("duty::1", DutyType::Actionable, today);
        form.paid_amount = "abc".to_string();
        assert!(DutyOccurrenceValidator.validate(&form, today).is_empty());
    }

    #[test]
    fn test_future_completion_date() {
        let today = date(2024, 10, 15);
        let mut form = DutyOccurrenceForm::new("duty::1", DutyType::Actionable, today);
        form.completed_date = date(2024, 10, 16);

        let errors = DutyOccurrenceValidator.validate(&form, today);

        assert_eq!(
            errors.get(&DutyOccurrenceFormField::CompletedDate),
            Some(&OccurrenceValidationError::InvalidDate)
        );
    }
}
