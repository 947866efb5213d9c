//! Recording a completion (payment or action) for one duty.

use backend::domain::duty_service::SaveOccurrenceOutcome;
use backend::domain::models::{DutyOccurrenceForm, DutyOccurrenceFormField, DutyType, OccurrenceFieldUpdate};
use backend::domain::validation::{DutyOccurrenceValidator, OccurrenceFormErrors};
use backend::DutyService;
use chrono::NaiveDate;
use log::{info, warn};
use tokio::task::JoinHandle;

use super::FormPhase;
use crate::navigation::Navigator;
use crate::state::{execute_use_case, spawn_detached, StateStore, TaskScope};

#[derive(Debug, Clone, PartialEq)]
pub enum OccurrenceIntent {
    Update(OccurrenceFieldUpdate),
    Save,
    ClearError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccurrenceUiState {
    pub duty_title: String,
    pub form: DutyOccurrenceForm,
    pub errors: OccurrenceFormErrors,
    pub phase: FormPhase,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl OccurrenceUiState {
    /// The amount field only exists for payable duties
    pub fn shows_amount(&self) -> bool {
        self.form.duty_type == DutyType::Payable
    }

    pub fn field_error(&self, field: DutyOccurrenceFormField) -> Option<String> {
        self.errors.get(&field).map(|e| e.to_string())
    }

    fn can_save(&self) -> bool {
        !self.is_loading && matches!(self.phase, FormPhase::Editing | FormPhase::Failed)
    }
}

pub struct AddDutyOccurrenceViewModel {
    service: DutyService,
    state: StateStore<OccurrenceUiState>,
    navigator: Navigator,
    today: NaiveDate,
    tasks: TaskScope,
}

impl AddDutyOccurrenceViewModel {
    pub fn new(service: DutyService, navigator: Navigator, duty_id: &str, today: NaiveDate) -> Self {
        let vm = Self {
            service,
            state: StateStore::new(OccurrenceUiState {
                duty_title: String::new(),
                form: DutyOccurrenceForm::new(duty_id, DutyType::Payable, today),
                errors: OccurrenceFormErrors::new(),
                phase: FormPhase::Editing,
                is_loading: true,
                error_message: None,
            }),
            navigator,
            today,
            tasks: TaskScope::new(),
        };
        vm.load(duty_id.to_string());
        vm
    }

    pub fn state(&self) -> &StateStore<OccurrenceUiState> {
        &self.state
    }

    pub fn on_intent(&self, intent: OccurrenceIntent) -> Option<JoinHandle<()>> {
        match intent {
            OccurrenceIntent::Update(update) => {
                self.state.update_if(|s| {
                    if s.phase == FormPhase::Saving {
                        return false;
                    }
                    if let Some(field) = update.field() {
                        s.errors.remove(&field);
                    }
                    s.form.apply(update);
                    if s.phase == FormPhase::Failed {
                        s.phase = FormPhase::Editing;
                    }
                    true
                });
                None
            }
            OccurrenceIntent::Save => self.save(),
            OccurrenceIntent::ClearError => {
                self.state.update(|s| s.error_message = None);
                None
            }
        }
    }

    fn load(&self, duty_id: String) {
        let service = self.service.clone();
        let state = self.state.clone();
        self.tasks.spawn(async move {
            let result = execute_use_case("Load duty", service.get_duty_by_id(&duty_id)).await;
            state.update(|s| {
                s.is_loading = false;
                match result {
                    Ok(Some(duty)) => {
                        s.duty_title = duty.title;
                        s.form.duty_type = duty.duty_type;
                    }
                    Ok(None) => s.error_message = Some("This duty no longer exists".to_string()),
                    Err(message) => s.error_message = Some(message),
                }
            });
        });
    }

    fn save(&self) -> Option<JoinHandle<()>> {
        let form = self.state.with(|s| s.form.clone());
        let errors = DutyOccurrenceValidator.validate(&form, self.today);

        let mut started = false;
        self.state.update_if(|s| {
            if !s.can_save() {
                return false;
            }
            if !errors.is_empty() {
                s.errors = errors.clone();
                return true;
            }
            s.errors.clear();
            s.error_message = None;
            s.phase = FormPhase::Saving;
            started = true;
            true
        });
        if !started {
            if !errors.is_empty() {
                warn!("Occurrence form has {} validation error(s)", errors.len());
            }
            return None;
        }

        info!("Recording occurrence for duty {}", form.duty_id);
        let service = self.service.clone();
        let state = self.state.clone();
        let navigator = self.navigator.clone();
        let today = self.today;
        Some(spawn_detached(async move {
            let result = execute_use_case("Save occurrence", service.save_duty_occurrence_on(&form, today)).await;
            let saved = matches!(result, Ok(SaveOccurrenceOutcome::Saved(_)));
            state.update(|s| match result {
                Ok(SaveOccurrenceOutcome::Saved(_)) => s.phase = FormPhase::Saved,
                Ok(SaveOccurrenceOutcome::Invalid(errors)) => {
                    s.phase = FormPhase::Editing;
                    s.errors = errors;
                }
                Err(message) => {
                    s.phase = FormPhase::Failed;
                    s.error_message = Some(message);
                }
            });
            if saved {
                navigator.back();
            }
        }))
    }

    pub fn clear(&self) {
        self.tasks.cancel_all();
    }
}
