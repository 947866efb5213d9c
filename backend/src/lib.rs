//! # Backend Crate
//!
//! Contains all non-UI logic for the duty tracker.
//!
//! This crate brings together:
//! - **Domain**: Duty and occurrence entities, pure derivations and use-case services
//! - **Storage**: Persistence traits and the in-memory backend
//! - **IO**: Mapping of the remote dashboard payload into domain entities
//!
//! ## Architecture
//!
//! ```text
//! UI state containers (frontend crate)
//!     ↓
//! Services (DutyService, DashboardService)
//!     ↓
//! Pure domain computations          IO (remote mapper)
//!     ↓
//! Storage traits
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use log::info;

pub use config::{AppConfig, ConfigError, StorageMode};
pub use domain::{DashboardRemoteSource, DashboardService, DutyService, JsonFileRemoteSource};
pub use storage::{DutyStorage, InMemoryStorage, OccurrenceStorage, StorageError};

use domain::validation::DutyValidator;

/// Services wired together for one application instance
#[derive(Clone)]
pub struct Backend {
    pub config: AppConfig,
    pub duty_service: DutyService,
    pub dashboard_service: DashboardService,
}

/// Initialize the backend over the given storage
pub fn initialize_backend_with_storage<S>(config: AppConfig, storage: S) -> Result<Backend>
where
    S: DutyStorage + OccurrenceStorage + Clone + 'static,
{
    info!("Setting up domain model ({:?} mode)", config.storage_mode);
    let categories = config.category_names();

    let duty_service = DutyService::new(
        Arc::new(storage.clone()),
        Arc::new(storage.clone()),
        DutyValidator::new(config.reminder_days),
        categories.clone(),
    );

    let remote: Option<Arc<dyn DashboardRemoteSource>> = match (&config.storage_mode, &config.remote_fixture) {
        (StorageMode::Remote, Some(path)) => {
            info!("Using remote dashboard fixture {:?}", path);
            Some(Arc::new(JsonFileRemoteSource::new(path.clone())))
        }
        (StorageMode::Remote, None) => {
            anyhow::bail!("Remote storage mode requires `remote_fixture` to be set");
        }
        (StorageMode::Local, _) => None,
    };

    let dashboard_service = DashboardService::new(
        config.storage_mode,
        Arc::new(storage.clone()),
        Arc::new(storage),
        remote,
        categories,
        config.dashboard_preview_limit,
    );

    info!("Backend ready");
    Ok(Backend {
        config,
        duty_service,
        dashboard_service,
    })
}

/// Initialize the backend with in-memory storage
pub fn initialize_backend(config: AppConfig) -> Result<Backend> {
    initialize_backend_with_storage(config, InMemoryStorage::new())
}
