//! Shared fixtures for ViewModel tests.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use backend::domain::models::{Duty, DutyOccurrence, DutyStatus, DutyType, ReminderSettings};
use backend::{initialize_backend_with_storage, AppConfig, Backend, DutyStorage, InMemoryStorage, OccurrenceStorage};
use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::watch;

/// Storage whose every call fails, for error paths
#[derive(Debug, Clone, Default)]
pub struct FailingStorage;

#[async_trait]
impl DutyStorage for FailingStorage {
    async fn store_duty(&self, _duty: &Duty) -> Result<()> {
        Err(anyhow!("storage unavailable"))
    }
    async fn get_duty(&self, _duty_id: &str) -> Result<Option<Duty>> {
        Err(anyhow!("storage unavailable"))
    }
    async fn list_duties(&self) -> Result<Vec<Duty>> {
        Err(anyhow!("storage unavailable"))
    }
    async fn delete_duty(&self, _duty_id: &str) -> Result<bool> {
        Err(anyhow!("storage unavailable"))
    }
}

#[async_trait]
impl OccurrenceStorage for FailingStorage {
    async fn store_occurrence(&self, _occurrence: &DutyOccurrence) -> Result<()> {
        Err(anyhow!("storage unavailable"))
    }
    async fn list_occurrences(&self) -> Result<Vec<DutyOccurrence>> {
        Err(anyhow!("storage unavailable"))
    }
    async fn list_occurrences_for_duty(&self, _duty_id: &str) -> Result<Vec<DutyOccurrence>> {
        Err(anyhow!("storage unavailable"))
    }
    async fn delete_occurrence(&self, _occurrence_id: &str) -> Result<bool> {
        Err(anyhow!("storage unavailable"))
    }
    async fn delete_occurrences_for_duty(&self, _duty_id: &str) -> Result<u32> {
        Err(anyhow!("storage unavailable"))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn duty(id: &str, title: &str, category: &str, duty_type: DutyType, due: Option<NaiveDate>) -> Duty {
    Duty {
        id: id.to_string(),
        title: title.to_string(),
        duty_type,
        category_name: category.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        start_date: None,
        due_date: due,
        status: DutyStatus::Pending,
        frequency: None,
        estimated_amount: None,
        reminders: ReminderSettings::default(),
    }
}

pub fn occurrence(id: &str, duty_id: &str, amount: Option<f64>, completed_at: NaiveDate) -> DutyOccurrence {
    DutyOccurrence {
        id: id.to_string(),
        duty_id: duty_id.to_string(),
        amount_paid: amount,
        completed_at,
        notes: None,
    }
}

pub async fn seeded_backend(duties: Vec<Duty>, occurrences: Vec<DutyOccurrence>) -> (Backend, InMemoryStorage) {
    let storage = InMemoryStorage::with_data(duties, occurrences).await.unwrap();
    let backend = initialize_backend_with_storage(AppConfig::default(), storage.clone()).unwrap();
    (backend, storage)
}

pub fn failing_backend() -> Backend {
    initialize_backend_with_storage(AppConfig::default(), FailingStorage).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wait until the observed state satisfies `predicate`
pub async fn wait_for<T>(receiver: &mut watch::Receiver<T>, predicate: impl FnMut(&T) -> bool) {
    receiver.wait_for(predicate).await.unwrap();
}
