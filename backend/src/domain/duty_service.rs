//! Duty service domain logic for the duty tracker.
//!
//! This module is the use-case layer for duties and their occurrences. It
//! validates drafts, persists them through the storage traits and serves the
//! derived views (listings, charts, review, reminders) from fresh snapshots.
//!
//! ## Key Responsibilities
//!
//! - **Duty CRUD**: Saving (create or replace), loading, listing and deleting duties
//! - **Occurrence Records**: Recording and deleting completion events
//! - **Derived Views**: Joined listings, per-duty charts, the review and reminders
//!
//! ## Business Rules
//!
//! - Drafts are validated before anything is persisted; failures come back as data
//! - Deleting a duty deletes its occurrences
//! - Statuses are resolved on every read, never trusted from storage

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use log::{info, warn};

use crate::domain::chart::{monthly_chart_data, MonthlyChartPoint};
use crate::domain::listing::{filter_by_category, join_with_occurrences, sort_for_listing};
use crate::domain::models::{
    CategoryNames, Duty, DutyCategory, DutyForm, DutyOccurrence, DutyOccurrenceForm, DutyWithLastOccurrence,
};
use crate::domain::reminder::{upcoming_reminders, ScheduledReminder};
use crate::domain::review::{build_review, DutyReview};
use crate::domain::status::resolve_status;
use crate::domain::validation::{DutyFormErrors, DutyOccurrenceValidator, DutyValidator, OccurrenceFormErrors};
use crate::storage::{DutyStorage, OccurrenceStorage, StorageError};

/// Result of a duty save: either the stored duty or the field errors that blocked it
#[derive(Debug, Clone, PartialEq)]
pub enum SaveDutyOutcome {
    Saved(Duty),
    Invalid(DutyFormErrors),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOccurrenceOutcome {
    Saved(DutyOccurrence),
    Invalid(OccurrenceFormErrors),
}

/// Service for managing duties and their occurrences
#[derive(Clone)]
pub struct DutyService {
    duties: Arc<dyn DutyStorage>,
    occurrences: Arc<dyn OccurrenceStorage>,
    validator: DutyValidator,
    categories: CategoryNames,
}

impl DutyService {
    pub fn new(
        duties: Arc<dyn DutyStorage>,
        occurrences: Arc<dyn OccurrenceStorage>,
        validator: DutyValidator,
        categories: CategoryNames,
    ) -> Self {
        Self {
            duties,
            occurrences,
            validator,
            categories,
        }
    }

    pub fn categories(&self) -> &CategoryNames {
        &self.categories
    }

    pub fn validator(&self) -> &DutyValidator {
        &self.validator
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Validate and store a duty draft (create or replace)
    pub async fn save_duty(&self, form: &DutyForm) -> Result<SaveDutyOutcome> {
        self.save_duty_at(form, Utc::now()).await
    }

    /// Same as [`DutyService::save_duty`] with an explicit clock
    pub async fn save_duty_at(&self, form: &DutyForm, now: DateTime<Utc>) -> Result<SaveDutyOutcome> {
        info!("Saving duty {:?} (editing: {})", form.title, form.is_editing());

        let errors = self.validator.validate(form);
        if !errors.is_empty() {
            warn!("Duty form rejected with {} error(s)", errors.len());
            return Ok(SaveDutyOutcome::Invalid(errors));
        }

        let duty = form.to_duty(now)?;
        self.duties.store_duty(&duty).await?;
        info!("Saved duty {}", duty.id);
        Ok(SaveDutyOutcome::Saved(duty))
    }

    /// Load one duty with its status resolved as of today
    pub async fn get_duty_by_id(&self, duty_id: &str) -> Result<Option<Duty>> {
        info!("Getting duty {}", duty_id);
        let Some(mut duty) = self.duties.get_duty(duty_id).await? else {
            return Ok(None);
        };
        let occurrences = self.occurrences.list_occurrences_for_duty(duty_id).await?;
        duty.status = resolve_status(&duty, &occurrences, Self::today());
        Ok(Some(duty))
    }

    pub async fn list_duties(&self) -> Result<Vec<Duty>> {
        self.duties.list_duties().await
    }

    /// Delete a duty together with its occurrences
    /// Returns false if the duty did not exist
    pub async fn delete_duty(&self, duty_id: &str) -> Result<bool> {
        info!("Deleting duty {}", duty_id);
        let removed = self.occurrences.delete_occurrences_for_duty(duty_id).await?;
        let deleted = self.duties.delete_duty(duty_id).await?;
        if deleted {
            info!("Deleted duty {} and {} occurrence(s)", duty_id, removed);
        } else {
            warn!("Duty {} not found for deletion", duty_id);
        }
        Ok(deleted)
    }

    /// Validate and store an occurrence draft
    pub async fn save_duty_occurrence(&self, form: &DutyOccurrenceForm) -> Result<SaveOccurrenceOutcome> {
        self.save_duty_occurrence_on(form, Self::today()).await
    }

    pub async fn save_duty_occurrence_on(
        &self,
        form: &DutyOccurrenceForm,
        today: NaiveDate,
    ) -> Result<SaveOccurrenceOutcome> {
        info!("Saving occurrence for duty {}", form.duty_id);

        if self.duties.get_duty(&form.duty_id).await?.is_none() {
            return Err(StorageError::DutyNotFound(form.duty_id.clone()).into());
        }

        let errors = DutyOccurrenceValidator.validate(form, today);
        if !errors.is_empty() {
            warn!("Occurrence form rejected with {} error(s)", errors.len());
            return Ok(SaveOccurrenceOutcome::Invalid(errors));
        }

        let occurrence = form.to_occurrence();
        self.occurrences.store_occurrence(&occurrence).await?;
        info!("Saved occurrence {} for duty {}", occurrence.id, occurrence.duty_id);
        Ok(SaveOccurrenceOutcome::Saved(occurrence))
    }

    /// Occurrences of one duty, most recent first
    pub async fn get_records_by_duty_id(&self, duty_id: &str) -> Result<Vec<DutyOccurrence>> {
        self.occurrences.list_occurrences_for_duty(duty_id).await
    }

    pub async fn delete_record(&self, occurrence_id: &str) -> Result<()> {
        info!("Deleting occurrence {}", occurrence_id);
        if !self.occurrences.delete_occurrence(occurrence_id).await? {
            warn!("Occurrence {} not found for deletion", occurrence_id);
            return Err(StorageError::OccurrenceNotFound(occurrence_id.to_string()).into());
        }
        Ok(())
    }

    /// Joined duty listing, optionally for one category, in listing order
    pub async fn duties_with_last_occurrence(
        &self,
        category: Option<DutyCategory>,
        today: NaiveDate,
    ) -> Result<Vec<DutyWithLastOccurrence>> {
        let duties = self.duties.list_duties().await?;
        let occurrences = self.occurrences.list_occurrences().await?;

        let joined = join_with_occurrences(&duties, &occurrences, today);
        let mut listing = match category {
            Some(category) => filter_by_category(joined, category, &self.categories),
            None => joined,
        };
        sort_for_listing(&mut listing);
        Ok(listing)
    }

    /// Per-month history chart for one duty
    pub async fn monthly_chart_data(&self, duty_id: &str) -> Result<Vec<MonthlyChartPoint>> {
        let duty = self
            .duties
            .get_duty(duty_id)
            .await?
            .ok_or_else(|| StorageError::DutyNotFound(duty_id.to_string()))?;
        let occurrences = self.occurrences.list_occurrences_for_duty(duty_id).await?;
        Ok(monthly_chart_data(duty.duty_type, &occurrences))
    }

    pub async fn review(&self, category: Option<DutyCategory>) -> Result<DutyReview> {
        info!("Building duty review (category: {:?})", category);
        let duties = self.duties.list_duties().await?;
        let occurrences = self.occurrences.list_occurrences().await?;
        Ok(build_review(&duties, &occurrences, category, &self.categories))
    }

    /// Reminders that have not fired yet as of `now`
    pub async fn upcoming_reminders(&self, now: NaiveDateTime) -> Result<Vec<ScheduledReminder>> {
        let duties = self.duties.list_duties().await?;
        Ok(upcoming_reminders(&duties, now))
    }
}
