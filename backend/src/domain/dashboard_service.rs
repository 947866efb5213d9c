//! Dashboard service: assembles the dashboard from local storage or from the
//! remote dashboard payload, depending on the configured storage mode.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use shared::DashboardRemoteResponse;

use crate::config::StorageMode;
use crate::domain::dashboard::{build_dashboard, DashboardData};
use crate::domain::models::{CategoryNames, CategoryComparison, CategorySummaries};
use crate::domain::summary::{compare_with_previous_month, summarize_by_category};
use crate::io::DashboardRemoteMapper;
use crate::storage::{DutyStorage, OccurrenceStorage};

/// Source of the remote dashboard payload
#[async_trait]
pub trait DashboardRemoteSource: Send + Sync {
    async fn fetch_dashboard(&self) -> Result<DashboardRemoteResponse>;
}

/// Reads the remote dashboard payload from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileRemoteSource {
    path: PathBuf,
}

impl JsonFileRemoteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DashboardRemoteSource for JsonFileRemoteSource {
    async fn fetch_dashboard(&self) -> Result<DashboardRemoteResponse> {
        debug!("Reading remote dashboard from {:?}", self.path);
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read dashboard fixture {:?}", self.path))?;
        let response = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dashboard fixture {:?}", self.path))?;
        Ok(response)
    }
}

#[derive(Clone)]
pub struct DashboardService {
    mode: StorageMode,
    duties: Arc<dyn DutyStorage>,
    occurrences: Arc<dyn OccurrenceStorage>,
    remote: Option<Arc<dyn DashboardRemoteSource>>,
    categories: CategoryNames,
    preview_limit: usize,
}

impl DashboardService {
    pub fn new(
        mode: StorageMode,
        duties: Arc<dyn DutyStorage>,
        occurrences: Arc<dyn OccurrenceStorage>,
        remote: Option<Arc<dyn DashboardRemoteSource>>,
        categories: CategoryNames,
        preview_limit: usize,
    ) -> Self {
        Self {
            mode,
            duties,
            occurrences,
            remote,
            categories,
            preview_limit,
        }
    }

    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    /// Dashboard for the month containing `today`
    pub async fn get_dashboard(&self, today: NaiveDate) -> Result<DashboardData> {
        info!("Loading dashboard for {} ({:?} mode)", today, self.mode);
        match self.mode {
            StorageMode::Local => {
                let duties = self.duties.list_duties().await?;
                let occurrences = self.occurrences.list_occurrences().await?;
                debug!("Dashboard snapshot: {} duties, {} occurrences", duties.len(), occurrences.len());
                Ok(build_dashboard(
                    &duties,
                    &occurrences,
                    &self.categories,
                    today,
                    self.preview_limit,
                ))
            }
            StorageMode::Remote => {
                let remote = self
                    .remote
                    .as_ref()
                    .ok_or_else(|| anyhow!("Remote storage mode configured without a remote source"))?;
                let response = remote.fetch_dashboard().await?;
                Ok(DashboardRemoteMapper::to_domain(&response, Utc::now()))
            }
        }
    }

    /// Personal, company and overall summaries for any month, from local storage
    pub async fn monthly_summaries(&self, month: u32, year: i32) -> Result<CategorySummaries> {
        let duties = self.duties.list_duties().await?;
        let occurrences = self.occurrences.list_occurrences().await?;
        Ok(summarize_by_category(&duties, &occurrences, &self.categories, month, year))
    }

    pub async fn compare_with_previous_month(&self, month: u32, year: i32) -> Result<CategoryComparison> {
        let duties = self.duties.list_duties().await?;
        let occurrences = self.occurrences.list_occurrences().await?;
        Ok(compare_with_previous_month(&duties, &occurrences, &self.categories, month, year))
    }
}
