//! In-memory storage backend.
//!
//! Holds duties and occurrences behind a single tokio `RwLock`. Deleting a
//! duty also deletes its occurrences.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use thiserror::Error;
use tokio::sync::RwLock;

use super::traits::{DutyStorage, OccurrenceStorage};
use crate::domain::models::{Duty, DutyOccurrence};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Duty not found: {0}")]
    DutyNotFound(String),
    #[error("Occurrence not found: {0}")]
    OccurrenceNotFound(String),
    #[error("Invalid id: {0:?}")]
    InvalidId(String),
}

#[derive(Debug, Default)]
struct Tables {
    duties: BTreeMap<String, Duty>,
    occurrences: BTreeMap<String, DutyOccurrence>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<RwLock<Tables>>,
}

fn check_id(id: &str) -> Result<(), StorageError> {
    if id.trim().is_empty() {
        Err(StorageError::InvalidId(id.to_string()))
    } else {
        Ok(())
    }
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with `duties` and `occurrences`
    pub async fn with_data(duties: Vec<Duty>, occurrences: Vec<DutyOccurrence>) -> Result<Self> {
        let storage = Self::new();
        for duty in &duties {
            storage.store_duty(duty).await?;
        }
        for occurrence in &occurrences {
            storage.store_occurrence(occurrence).await?;
        }
        Ok(storage)
    }
}

#[async_trait]
impl DutyStorage for InMemoryStorage {
    async fn store_duty(&self, duty: &Duty) -> Result<()> {
        check_id(&duty.id)?;
        let mut tables = self.tables.write().await;
        tables.duties.insert(duty.id.clone(), duty.clone());
        debug!("Stored duty {}", duty.id);
        Ok(())
    }

    async fn get_duty(&self, duty_id: &str) -> Result<Option<Duty>> {
        let tables = self.tables.read().await;
        Ok(tables.duties.get(duty_id).cloned())
    }

    async fn list_duties(&self) -> Result<Vec<Duty>> {
        let tables = self.tables.read().await;
        Ok(tables.duties.values().cloned().collect())
    }

    async fn delete_duty(&self, duty_id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.duties.remove(duty_id).is_none() {
            return Ok(false);
        }
        let before = tables.occurrences.len();
        tables.occurrences.retain(|_, o| o.duty_id != duty_id);
        debug!(
            "Deleted duty {} and {} occurrence(s)",
            duty_id,
            before - tables.occurrences.len()
        );
        Ok(true)
    }
}

#[async_trait]
impl OccurrenceStorage for InMemoryStorage {
    async fn store_occurrence(&self, occurrence: &DutyOccurrence) -> Result<()> {
        check_id(&occurrence.id)?;
        let mut tables = self.tables.write().await;
        if !tables.duties.contains_key(&occurrence.duty_id) {
            return Err(StorageError::DutyNotFound(occurrence.duty_id.clone()).into());
        }
        tables.occurrences.insert(occurrence.id.clone(), occurrence.clone());
        debug!("Stored occurrence {} for duty {}", occurrence.id, occurrence.duty_id);
        Ok(())
    }

    async fn list_occurrences(&self) -> Result<Vec<DutyOccurrence>> {
        let tables = self.tables.read().await;
        Ok(tables.occurrences.values().cloned().collect())
    }

    async fn list_occurrences_for_duty(&self, duty_id: &str) -> Result<Vec<DutyOccurrence>> {
        let tables = self.tables.read().await;
        let mut occurrences: Vec<DutyOccurrence> = tables
            .occurrences
            .values()
            .filter(|o| o.duty_id == duty_id)
            .cloned()
            .collect();
        occurrences.sort_by(|a, b| b.completed_at.cmp(&a.completed_at).then_with(|| a.id.cmp(&b.id)));
        Ok(occurrences)
    }

    async fn delete_occurrence(&self, occurrence_id: &str) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.occurrences.remove(occurrence_id).is_some())
    }

    async fn delete_occurrences_for_duty(&self, duty_id: &str) -> Result<u32> {
        let mut tables = self.tables.write().await;
        let before = tables.occurrences.len();
        tables.occurrences.retain(|_, o| o.duty_id != duty_id);
        Ok(u32::try_from(before - tables.occurrences.len()).unwrap_or(u32::MAX))
    }
}
