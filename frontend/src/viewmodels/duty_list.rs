//! # Duty List ViewModel
//!
//! Lists the duties of one category with their last occurrence. Deleting a
//! duty goes through a confirmation step and, once confirmed, runs detached
//! so leaving the screen does not lose the delete.

use backend::domain::models::{DutyCategory, DutyWithLastOccurrence};
use backend::DutyService;
use chrono::NaiveDate;
use log::info;
use tokio::task::JoinHandle;

use crate::navigation::{Navigator, Route};
use crate::state::{execute_use_case, spawn_detached, StateStore, TaskScope};

#[derive(Debug, Clone, PartialEq)]
pub enum DutyListIntent {
    Load,
    Retry,
    DismissError,
    OpenDuty(String),
    AddDuty,
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DutyListUiState {
    pub category: DutyCategory,
    pub duties: Vec<DutyWithLastOccurrence>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// Duty waiting for delete confirmation
    pub pending_delete: Option<String>,
}

impl DutyListUiState {
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.duties.is_empty()
    }
}

pub struct DutyListViewModel {
    service: DutyService,
    state: StateStore<DutyListUiState>,
    navigator: Navigator,
    today: NaiveDate,
    tasks: TaskScope,
}

impl DutyListViewModel {
    pub fn new(service: DutyService, navigator: Navigator, category: DutyCategory, today: NaiveDate) -> Self {
        Self {
            service,
            state: StateStore::new(DutyListUiState {
                category,
                duties: Vec::new(),
                is_loading: false,
                error_message: None,
                pending_delete: None,
            }),
            navigator,
            today,
            tasks: TaskScope::new(),
        }
    }

    pub fn state(&self) -> &StateStore<DutyListUiState> {
        &self.state
    }

    /// Handle an intent; a confirmed delete returns its task
    pub fn on_intent(&self, intent: DutyListIntent) -> Option<JoinHandle<()>> {
        match intent {
            DutyListIntent::Load | DutyListIntent::Retry => {
                let service = self.service.clone();
                let state = self.state.clone();
                let today = self.today;
                self.tasks.spawn(async move { load_duties(service, state, today).await });
            }
            DutyListIntent::DismissError => self.state.update(|s| s.error_message = None),
            DutyListIntent::OpenDuty(duty_id) => self.navigator.to(Route::DutyDetails { duty_id }),
            DutyListIntent::AddDuty => {
                let category = self.state.with(|s| s.category);
                self.navigator.to(Route::CreateDuty { category });
            }
            DutyListIntent::RequestDelete(duty_id) => self.state.update(|s| s.pending_delete = Some(duty_id)),
            DutyListIntent::CancelDelete => self.state.update(|s| s.pending_delete = None),
            DutyListIntent::ConfirmDelete => return self.confirm_delete(),
        }
        None
    }

    fn confirm_delete(&self) -> Option<JoinHandle<()>> {
        let mut target = None;
        self.state.update_if(|s| {
            target = s.pending_delete.take();
            target.is_some()
        });
        let duty_id = target?;

        info!("Deleting duty {} from list", duty_id);
        let service = self.service.clone();
        let state = self.state.clone();
        let today = self.today;
        Some(spawn_detached(async move {
            let deleted = execute_use_case("Delete duty", service.delete_duty(&duty_id)).await;
            match deleted {
                Ok(_) => load_duties(service, state, today).await,
                Err(message) => state.update(|s| s.error_message = Some(message)),
            }
        }))
    }

    pub async fn refresh(&self) {
        load_duties(self.service.clone(), self.state.clone(), self.today).await;
    }

    pub fn clear(&self) {
        self.tasks.cancel_all();
    }
}

async fn load_duties(service: DutyService, state: StateStore<DutyListUiState>, today: NaiveDate) {
    let category = state.with(|s| s.category);
    state.update(|s| {
        s.is_loading = true;
        s.error_message = None;
    });

    let result = execute_use_case(
        "Load duties",
        service.duties_with_last_occurrence(Some(category), today),
    )
    .await;

    state.update(|s| {
        s.is_loading = false;
        match result {
            Ok(duties) => s.duties = duties,
            Err(message) => s.error_message = Some(message),
        }
    });
}
