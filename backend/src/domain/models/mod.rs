pub mod category;
pub mod duty;
pub mod form;
pub mod occurrence;
pub mod summary;

pub use category::{CategoryNames, DutyCategory};
pub use duty::{Duty, DutyStatus, DutyType, Frequency, Reminder, ReminderSettings};
pub use form::{
    DutyConversionError, DutyForm, DutyFormField, DutyOccurrenceForm, DutyOccurrenceFormField,
    FormFieldUpdate, OccurrenceFieldUpdate, OccurrenceValidationError, ValidationError,
};
pub use occurrence::{DutyOccurrence, DutyWithLastOccurrence};
pub use summary::{CategoryComparison, CategorySummaries, MonthlySummary, SummaryComparison};
