//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work against any
//! persistence backend.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{Duty, DutyOccurrence};

/// Interface for duty persistence
#[async_trait]
pub trait DutyStorage: Send + Sync {
    /// Insert a duty, or replace the stored duty with the same id
    async fn store_duty(&self, duty: &Duty) -> Result<()>;

    async fn get_duty(&self, duty_id: &str) -> Result<Option<Duty>>;

    /// All duties, ordered by id
    async fn list_duties(&self) -> Result<Vec<Duty>>;

    /// Delete a duty
    /// Returns true if the duty was found and deleted, false otherwise
    async fn delete_duty(&self, duty_id: &str) -> Result<bool>;
}

/// Interface for occurrence persistence
///
/// Occurrences are owned by their duty: storing one for an unknown duty is an error.
#[async_trait]
pub trait OccurrenceStorage: Send + Sync {
    async fn store_occurrence(&self, occurrence: &DutyOccurrence) -> Result<()>;

    async fn list_occurrences(&self) -> Result<Vec<DutyOccurrence>>;

    /// Occurrences of one duty, most recent first
    async fn list_occurrences_for_duty(&self, duty_id: &str) -> Result<Vec<DutyOccurrence>>;

    /// Returns true if the occurrence was found and deleted
    async fn delete_occurrence(&self, occurrence_id: &str) -> Result<bool>;

    /// Returns the number of occurrences deleted
    async fn delete_occurrences_for_duty(&self, duty_id: &str) -> Result<u32>;
}
