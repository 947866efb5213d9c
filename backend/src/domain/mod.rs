//! # Domain Module
//!
//! Contains the business logic of the duty tracker.
//!
//! Every computation in here is synchronous and pure: status derivation,
//! monthly aggregation, form validation, reminder scheduling and chart data
//! are recomputed from immutable snapshots and never perform I/O. The
//! services at the bottom of the list are the only async entry points; they
//! load snapshots through the storage traits and hand them to the pure code.
//!
//! ## Module Organization
//!
//! - **models**: Duty, occurrence, summary and form entities
//! - **status**: PENDING / PAID / OVERDUE resolution
//! - **summary**: Monthly per-category aggregation and month-over-month comparison
//! - **validation**: Duty and occurrence form validators
//! - **reminder**: Reminder fire-time computation
//! - **chart**: Chart points, gauges and per-duty monthly bars
//! - **listing**: Joins, category filters and list orderings
//! - **dashboard**: Dashboard assembly from a snapshot
//! - **review**: Month-by-month occurrence history
//! - **format**: Currency, decimal, date and month-name helpers
//! - **duty_service** / **dashboard_service**: Use-case layer over storage
//!
//! ## Business Rules
//!
//! - A duty without a due date is never overdue
//! - Completion rates are 0 when there are no tasks
//! - Validation failures are returned as data, never as errors
//! - Deleting a duty deletes its occurrences

pub mod chart;
pub mod dashboard;
pub mod dashboard_service;
pub mod duty_service;
pub mod format;
pub mod listing;
pub mod models;
pub mod reminder;
pub mod review;
pub mod status;
pub mod summary;
pub mod validation;

pub use dashboard::DashboardData;
pub use dashboard_service::{DashboardRemoteSource, DashboardService, JsonFileRemoteSource};
pub use duty_service::{DutyService, SaveDutyOutcome, SaveOccurrenceOutcome};
pub use status::resolve_status;
pub use summary::{aggregate, summarize};
pub use validation::{DutyOccurrenceValidator, DutyValidator, ReminderDayBounds};
