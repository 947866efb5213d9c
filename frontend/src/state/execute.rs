//! One place where use-case failures become user-facing messages.

use std::future::Future;

use backend::domain::models::DutyConversionError;
use backend::StorageError;
use log::error;

/// User-facing text for a failed use case
pub fn user_message(err: &anyhow::Error) -> String {
    if let Some(storage) = err.downcast_ref::<StorageError>() {
        return match storage {
            StorageError::DutyNotFound(_) => "This duty no longer exists".to_string(),
            StorageError::OccurrenceNotFound(_) => "This record no longer exists".to_string(),
            StorageError::InvalidId(_) => "Something went wrong with this item".to_string(),
        };
    }
    if let Some(conversion) = err.downcast_ref::<DutyConversionError>() {
        return conversion.to_string();
    }
    err.to_string()
}

/// Await a use case, logging and translating any failure into a message
pub async fn execute_use_case<T, F>(operation: &str, use_case: F) -> Result<T, String>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match use_case.await {
        Ok(value) => Ok(value),
        Err(err) => {
            error!("{} failed: {:#}", operation, err);
            Err(user_message(&err))
        }
    }
}
