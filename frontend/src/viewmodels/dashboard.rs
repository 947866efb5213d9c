//! # Dashboard ViewModel
//!
//! Loads the dashboard snapshot and exposes it together with the derived
//! gauges and formatted totals the dashboard sections render.

use backend::domain::chart::{category_chart_points, to_gauge_value, ChartPoint, GaugeValue};
use backend::domain::format::{format_currency, month_name};
use backend::domain::models::{DutyCategory, MonthlySummary};
use backend::domain::DashboardData;
use backend::DashboardService;
use chrono::NaiveDate;
use log::info;

use crate::navigation::{Navigator, Route};
use crate::state::{execute_use_case, StateStore, TaskScope};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardIntent {
    Load,
    Retry,
    DismissError,
    OpenDuty(String),
    ViewAll(DutyCategory),
    AddDuty(DutyCategory),
    OpenReview,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardUiState {
    pub is_loading: bool,
    pub data: Option<DashboardData>,
    pub error_message: Option<String>,
}

impl DashboardUiState {
    fn new() -> Self {
        Self {
            is_loading: false,
            data: None,
            error_message: None,
        }
    }

    fn summary(&self, category: Option<DutyCategory>) -> Option<&MonthlySummary> {
        let summaries = &self.data.as_ref()?.summaries;
        Some(match category {
            Some(DutyCategory::Personal) => &summaries.personal,
            Some(DutyCategory::Company) => &summaries.company,
            None => &summaries.overall,
        })
    }

    /// Completion gauge for a category, or overall when `None`
    pub fn gauge(&self, category: Option<DutyCategory>) -> Option<GaugeValue> {
        self.summary(category).map(to_gauge_value)
    }

    pub fn category_points(&self) -> Vec<ChartPoint> {
        self.data
            .as_ref()
            .map(|d| category_chart_points(&d.summaries))
            .unwrap_or_default()
    }

    pub fn formatted_amount(&self, category: Option<DutyCategory>, currency_symbol: &str) -> Option<String> {
        self.summary(category)
            .map(|s| format_currency(s.total_amount_paid, currency_symbol))
    }

    /// "October 2024" for the summarized month
    pub fn period_label(&self) -> Option<String> {
        self.summary(None)
            .map(|s| format!("{} {}", month_name(s.current_month), s.year))
    }
}

pub struct DashboardViewModel {
    service: DashboardService,
    state: StateStore<DashboardUiState>,
    navigator: Navigator,
    today: NaiveDate,
    tasks: TaskScope,
}

impl DashboardViewModel {
    pub fn new(service: DashboardService, navigator: Navigator, today: NaiveDate) -> Self {
        Self {
            service,
            state: StateStore::new(DashboardUiState::new()),
            navigator,
            today,
            tasks: TaskScope::new(),
        }
    }

    pub fn state(&self) -> &StateStore<DashboardUiState> {
        &self.state
    }

    pub fn on_intent(&self, intent: DashboardIntent) {
        match intent {
            DashboardIntent::Load | DashboardIntent::Retry => self.load(),
            DashboardIntent::DismissError => self.state.update(|s| s.error_message = None),
            DashboardIntent::OpenDuty(duty_id) => self.navigator.to(Route::DutyDetails { duty_id }),
            DashboardIntent::ViewAll(category) => self.navigator.to(Route::DutyList { category }),
            DashboardIntent::AddDuty(category) => self.navigator.to(Route::CreateDuty { category }),
            DashboardIntent::OpenReview => self.navigator.to(Route::Review),
        }
    }

    fn load(&self) {
        let service = self.service.clone();
        let state = self.state.clone();
        let today = self.today;
        self.tasks.spawn(async move { load_dashboard(service, state, today).await });
    }

    /// Load inline instead of in the background
    pub async fn refresh(&self) {
        load_dashboard(self.service.clone(), self.state.clone(), self.today).await;
    }

    /// Abort any load still running
    pub fn clear(&self) {
        self.tasks.cancel_all();
    }
}

async fn load_dashboard(service: DashboardService, state: StateStore<DashboardUiState>, today: NaiveDate) {
    info!("Dashboard load started");
    state.update(|s| {
        s.is_loading = true;
        s.error_message = None;
    });

    let result = execute_use_case("Load dashboard", service.get_dashboard(today)).await;

    state.update(|s| {
        s.is_loading = false;
        match result {
            Ok(data) => s.data = Some(data),
            Err(message) => s.error_message = Some(message),
        }
    });
}
