//! # Duty Form ViewModel
//!
//! Drives one create/edit session of a duty.
//!
//! ## Form phases
//!
//! `Editing → Saving → Saved`, or `Saving → Failed` when persistence fails.
//! A failed form stays editable and can be saved again. Only one save may be
//! in flight per form; a second save request while saving is ignored.
//!
//! Saves run detached from the ViewModel: dropping or clearing the
//! ViewModel cancels a pending load but never a pending save.

use backend::domain::duty_service::SaveDutyOutcome;
use backend::domain::models::{DutyCategory, DutyForm, DutyFormField, FormFieldUpdate, ValidationError};
use backend::domain::validation::{field_error_message, DutyFormErrors};
use backend::DutyService;
use log::{info, warn};
use tokio::task::JoinHandle;

use crate::navigation::Navigator;
use crate::state::{execute_use_case, spawn_detached, StateStore, TaskScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Saving,
    Saved,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DutyFormIntent {
    Update(FormFieldUpdate),
    Save,
    ClearError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DutyFormUiState {
    pub form: DutyForm,
    pub errors: DutyFormErrors,
    pub phase: FormPhase,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl DutyFormUiState {
    pub fn field_error(&self, field: DutyFormField) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn can_save(&self) -> bool {
        !self.is_loading && self.phase != FormPhase::Saving && self.phase != FormPhase::Saved
    }
}

pub struct DutyFormViewModel {
    service: DutyService,
    state: StateStore<DutyFormUiState>,
    navigator: Navigator,
    tasks: TaskScope,
}

impl DutyFormViewModel {
    fn with_form(service: DutyService, navigator: Navigator, form: DutyForm, is_loading: bool) -> Self {
        Self {
            service,
            state: StateStore::new(DutyFormUiState {
                form,
                errors: DutyFormErrors::new(),
                phase: FormPhase::Editing,
                is_loading,
                error_message: None,
            }),
            navigator,
            tasks: TaskScope::new(),
        }
    }

    /// Blank form for a new duty in `category`
    pub fn create(service: DutyService, navigator: Navigator, category: DutyCategory) -> Self {
        let form = DutyForm::for_category(service.categories().name_of(category));
        Self::with_form(service, navigator, form, false)
    }

    /// Form pre-filled from an existing duty, loaded in the background.
    ///
    /// The form stays locked (no updates, no save) until the load lands.
    pub fn edit(service: DutyService, navigator: Navigator, duty_id: &str) -> Self {
        let vm = Self::with_form(service, navigator, DutyForm::default(), true);
        vm.load(duty_id.to_string());
        vm
    }

    pub fn state(&self) -> &StateStore<DutyFormUiState> {
        &self.state
    }

    /// User-facing text for the error currently shown on `field`
    pub fn error_message_for(&self, field: DutyFormField) -> Option<String> {
        let bounds = self.service.validator().bounds();
        self.state
            .with(|s| s.field_error(field))
            .map(|error| field_error_message(&error, &bounds))
    }

    /// Handle an intent; returns the save task when one was started
    pub fn on_intent(&self, intent: DutyFormIntent) -> Option<JoinHandle<()>> {
        match intent {
            DutyFormIntent::Update(update) => {
                self.update(update);
                None
            }
            DutyFormIntent::Save => self.save(),
            DutyFormIntent::ClearError => {
                self.state.update(|s| s.error_message = None);
                None
            }
        }
    }

    fn update(&self, update: FormFieldUpdate) {
        self.state.update_if(|s| {
            if s.is_loading || s.phase == FormPhase::Saving {
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
    }

    fn load(&self, duty_id: String) {
        let service = self.service.clone();
        let state = self.state.clone();
        self.tasks.spawn(async move {
            let result = execute_use_case("Load duty", service.get_duty_by_id(&duty_id)).await;
            state.update(|s| {
                s.is_loading = false;
                match result {
                    Ok(Some(duty)) => s.form = DutyForm::from_duty(&duty),
                    Ok(None) => s.error_message = Some("This duty no longer exists".to_string()),
                    Err(message) => s.error_message = Some(message),
                }
            });
        });
    }

    fn save(&self) -> Option<JoinHandle<()>> {
        let form = self.state.with(|s| s.form.clone());
        let errors = self.service.validator().validate(&form);

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
                warn!("Duty form has {} validation error(s)", errors.len());
            }
            return None;
        }

        info!("Saving duty form");
        let service = self.service.clone();
        let state = self.state.clone();
        let navigator = self.navigator.clone();
        Some(spawn_detached(async move {
            let result = execute_use_case("Save duty", service.save_duty(&form)).await;
            state.update(|s| match result {
                Ok(SaveDutyOutcome::Saved(duty)) => {
                    s.phase = FormPhase::Saved;
                    s.form.id = Some(duty.id);
                    s.form.created_at = Some(duty.created_at);
                }
                Ok(SaveDutyOutcome::Invalid(errors)) => {
                    s.phase = FormPhase::Editing;
                    s.errors = errors;
                }
                Err(message) => {
                    s.phase = FormPhase::Failed;
                    s.error_message = Some(message);
                }
            });
            if state.with(|s| s.phase == FormPhase::Saved) {
                navigator.back();
            }
        }))
    }

    pub fn clear(&self) {
        self.tasks.cancel_all();
    }
}
