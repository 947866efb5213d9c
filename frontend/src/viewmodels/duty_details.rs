//! Details of a single duty: its records, the per-month history chart, and
//! the delete actions for records and for the duty itself.

use backend::domain::chart::{BarChartData, MonthlyChartPoint};
use backend::domain::models::{Duty, DutyOccurrence};
use backend::DutyService;
use log::info;
use tokio::task::JoinHandle;

use crate::navigation::{Navigator, Route};
use crate::state::{execute_use_case, spawn_detached, StateStore, TaskScope};

#[derive(Debug, Clone, PartialEq)]
pub enum DutyDetailsIntent {
    Load,
    Retry,
    DismissError,
    AddOccurrence,
    Edit,
    RequestDeleteRecord(String),
    ConfirmDeleteRecord,
    CancelDeleteRecord,
    DeleteDuty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DutyDetailsUiState {
    pub duty_id: String,
    pub duty: Option<Duty>,
    /// Newest first
    pub records: Vec<DutyOccurrence>,
    pub monthly: Vec<MonthlyChartPoint>,
    pub chart: BarChartData,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub pending_record_delete: Option<String>,
}

impl DutyDetailsUiState {
    pub fn has_chart(&self) -> bool {
        self.chart.is_valid()
    }
}

pub struct DutyDetailsViewModel {
    service: DutyService,
    state: StateStore<DutyDetailsUiState>,
    navigator: Navigator,
    tasks: TaskScope,
}

impl DutyDetailsViewModel {
    pub fn new(service: DutyService, navigator: Navigator, duty_id: &str) -> Self {
        Self {
            service,
            state: StateStore::new(DutyDetailsUiState {
                duty_id: duty_id.to_string(),
                duty: None,
                records: Vec::new(),
                monthly: Vec::new(),
                chart: BarChartData::from_monthly(&[]),
                is_loading: false,
                error_message: None,
                pending_record_delete: None,
            }),
            navigator,
            tasks: TaskScope::new(),
        }
    }

    pub fn state(&self) -> &StateStore<DutyDetailsUiState> {
        &self.state
    }

    fn duty_id(&self) -> String {
        self.state.with(|s| s.duty_id.clone())
    }

    /// Handle an intent; detached deletes return their task
    pub fn on_intent(&self, intent: DutyDetailsIntent) -> Option<JoinHandle<()>> {
        match intent {
            DutyDetailsIntent::Load | DutyDetailsIntent::Retry => {
                let service = self.service.clone();
                let state = self.state.clone();
                self.tasks.spawn(async move { load_details(service, state).await });
            }
            DutyDetailsIntent::DismissError => self.state.update(|s| s.error_message = None),
            DutyDetailsIntent::AddOccurrence => self.navigator.to(Route::AddOccurrence { duty_id: self.duty_id() }),
            DutyDetailsIntent::Edit => self.navigator.to(Route::EditDuty { duty_id: self.duty_id() }),
            DutyDetailsIntent::RequestDeleteRecord(record_id) => {
                self.state.update(|s| s.pending_record_delete = Some(record_id))
            }
            DutyDetailsIntent::CancelDeleteRecord => self.state.update(|s| s.pending_record_delete = None),
            DutyDetailsIntent::ConfirmDeleteRecord => return self.delete_record(),
            DutyDetailsIntent::DeleteDuty => return Some(self.delete_duty()),
        }
        None
    }

    fn delete_record(&self) -> Option<JoinHandle<()>> {
        let mut target = None;
        self.state.update_if(|s| {
            target = s.pending_record_delete.take();
            target.is_some()
        });
        let record_id = target?;

        let service = self.service.clone();
        let state = self.state.clone();
        Some(spawn_detached(async move {
            let deleted = execute_use_case("Delete record", service.delete_record(&record_id)).await;
            match deleted {
                Ok(()) => load_details(service, state).await,
                Err(message) => state.update(|s| s.error_message = Some(message)),
            }
        }))
    }

    fn delete_duty(&self) -> JoinHandle<()> {
        let duty_id = self.duty_id();
        info!("Deleting duty {} from details", duty_id);
        let service = self.service.clone();
        let state = self.state.clone();
        let navigator = self.navigator.clone();
        spawn_detached(async move {
            match execute_use_case("Delete duty", service.delete_duty(&duty_id)).await {
                Ok(_) => navigator.back(),
                Err(message) => state.update(|s| s.error_message = Some(message)),
            }
        })
    }

    pub async fn refresh(&self) {
        load_details(self.service.clone(), self.state.clone()).await;
    }

    pub fn clear(&self) {
        self.tasks.cancel_all();
    }
}

async fn load_details(service: DutyService, state: StateStore<DutyDetailsUiState>) {
    let duty_id = state.with(|s| s.duty_id.clone());
    state.update(|s| {
        s.is_loading = true;
        s.error_message = None;
    });

    let result = execute_use_case("Load duty details", async {
        let duty = service.get_duty_by_id(&duty_id).await?;
        let records = service.get_records_by_duty_id(&duty_id).await?;
        let monthly = match duty {
            Some(_) => service.monthly_chart_data(&duty_id).await?,
            None => Vec::new(),
        };
        Ok::<_, anyhow::Error>((duty, records, monthly))
    })
    .await;

    state.update(|s| {
        s.is_loading = false;
        match result {
            Ok((duty, records, monthly)) => {
                if duty.is_none() {
                    s.error_message = Some("This duty no longer exists".to_string());
                }
                s.chart = BarChartData::from_monthly(&monthly);
                s.duty = duty;
                s.records = records;
                s.monthly = monthly;
            }
            Err(message) => s.error_message = Some(message),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationEvent;
    use crate::test_support::{date, duty, failing_backend, occurrence, seeded_backend};
    use backend::domain::models::{DutyStatus, DutyType};
    use backend::{DutyStorage, OccurrenceStorage};

    fn seed() -> (Vec<Duty>, Vec<DutyOccurrence>) {
        (
            vec![duty("duty::1", "Rent", "Personal", DutyType::Payable, Some(date(2099, 1, 1)))],
            vec![
                occurrence("o1", "duty::1", Some(1000.0), date(2024, 9, 5)),
                occurrence("o2", "duty::1", Some(1200.0), date(2024, 10, 5)),
            ],
        )
    }

    #[tokio::test]
    async fn test_load_records_and_chart() {
        let (duties, occurrences) = seed();
        let (backend, _) = seeded_backend(duties, occurrences).await;
        let vm = DutyDetailsViewModel::new(backend.duty_service, Navigator::detached(), "duty::1");

        vm.refresh().await;
        let state = vm.state().get();
        assert_eq!(state.duty.as_ref().unwrap().title, "Rent");
        assert_ne!(state.duty.as_ref().unwrap().status, DutyStatus::Overdue);
        assert_eq!(state.records[0].id, "o2");
        assert_eq!(state.monthly.len(), 2);
        assert_eq!(state.chart.points[0].label, "Sep 2024");
        assert_eq!(state.chart.max_value(), 1200.0);
        assert!(state.has_chart());
    }

    #[tokio::test]
    async fn test_delete_record_after_confirmation() {
        let (duties, occurrences) = seed();
        let (backend, storage) = seeded_backend(duties, occurrences).await;
        let vm = DutyDetailsViewModel::new(backend.duty_service, Navigator::detached(), "duty::1");
        vm.refresh().await;

        vm.on_intent(DutyDetailsIntent::RequestDeleteRecord("o1".to_string()));
        vm.on_intent(DutyDetailsIntent::ConfirmDeleteRecord).unwrap().await.unwrap();

        assert_eq!(storage.list_occurrences().await.unwrap().len(), 1);
        let state = vm.state().get();
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.monthly.len(), 1);
        assert!(state.pending_record_delete.is_none());
    }

    #[tokio::test]
    async fn test_delete_duty_navigates_back_even_after_clear() {
        let (duties, occurrences) = seed();
        let (backend, storage) = seeded_backend(duties, occurrences).await;
        let (navigator, mut events) = Navigator::channel();
        let vm = DutyDetailsViewModel::new(backend.duty_service, navigator, "duty::1");

        let handle = vm.on_intent(DutyDetailsIntent::DeleteDuty).unwrap();
        vm.clear();
        handle.await.unwrap();

        assert!(storage.list_duties().await.unwrap().is_empty());
        assert_eq!(events.recv().await, Some(NavigationEvent::Back));
    }

    #[tokio::test]
    async fn test_missing_duty_and_failures() {
        let (backend, _) = seeded_backend(vec![], vec![]).await;
        let vm = DutyDetailsViewModel::new(backend.duty_service, Navigator::detached(), "duty::404");
        vm.refresh().await;
        assert_eq!(vm.state().get().error_message.as_deref(), Some("This duty no longer exists"));
        assert!(!vm.state().get().has_chart());

        let (navigator, mut events) = Navigator::channel();
        let vm = DutyDetailsViewModel::new(failing_backend().duty_service, navigator, "duty::1");
        vm.refresh().await;
        assert_eq!(vm.state().get().error_message.as_deref(), Some("storage unavailable"));

        vm.on_intent(DutyDetailsIntent::AddOccurrence);
        vm.on_intent(DutyDetailsIntent::Edit);
        assert_eq!(events.recv().await, Some(NavigationEvent::ToRoute("duty/duty::1/occurrence".to_string())));
        assert_eq!(events.recv().await, Some(NavigationEvent::ToRoute("duty/duty::1/edit".to_string())));
    }
}
