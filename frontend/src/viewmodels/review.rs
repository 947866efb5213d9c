//! Month-by-month review of everything recorded, optionally narrowed to one
//! category.

use backend::domain::format::format_currency;
use backend::domain::models::DutyCategory;
use backend::domain::review::DutyReview;
use backend::DutyService;

use crate::navigation::{Navigator, Route};
use crate::state::{execute_use_case, StateStore, TaskScope};

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewIntent {
    Load,
    SetFilter(Option<DutyCategory>),
    OpenDuty(String),
    DismissError,
    Back,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewUiState {
    pub filter: Option<DutyCategory>,
    pub review: DutyReview,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl ReviewUiState {
    pub fn formatted_total(&self, currency_symbol: &str) -> String {
        format_currency(self.review.total_amount, currency_symbol)
    }
}

pub struct DutyReviewViewModel {
    service: DutyService,
    state: StateStore<ReviewUiState>,
    navigator: Navigator,
    tasks: TaskScope,
}

impl DutyReviewViewModel {
    pub fn new(service: DutyService, navigator: Navigator) -> Self {
        Self {
            service,
            state: StateStore::new(ReviewUiState::default()),
            navigator,
            tasks: TaskScope::new(),
        }
    }

    pub fn state(&self) -> &StateStore<ReviewUiState> {
        &self.state
    }

    pub fn on_intent(&self, intent: ReviewIntent) {
        match intent {
            ReviewIntent::Load => self.load(),
            ReviewIntent::SetFilter(filter) => {
                if self.state.update_if(|s| {
                    let changed = s.filter != filter;
                    s.filter = filter;
                    changed
                }) {
                    // A newer filter supersedes any load still running
                    self.tasks.cancel_all();
                    self.load();
                }
            }
            ReviewIntent::OpenDuty(duty_id) => self.navigator.to(Route::DutyDetails { duty_id }),
            ReviewIntent::DismissError => self.state.update(|s| s.error_message = None),
            ReviewIntent::Back => self.navigator.back(),
        }
    }

    fn load(&self) {
        let service = self.service.clone();
        let state = self.state.clone();
        self.tasks.spawn(async move { load_review(service, state).await });
    }

    pub async fn refresh(&self) {
        load_review(self.service.clone(), self.state.clone()).await;
    }

    pub fn clear(&self) {
        self.tasks.cancel_all();
    }
}

async fn load_review(service: DutyService, state: StateStore<ReviewUiState>) {
    let filter = state.with(|s| s.filter);
    state.update(|s| {
        s.is_loading = true;
        s.error_message = None;
    });

    let result = execute_use_case("Load review", service.review(filter)).await;

    state.update(|s| {
        s.is_loading = false;
        match result {
            Ok(review) => s.review = review,
            Err(message) => s.error_message = Some(message),
        }
    });
}
