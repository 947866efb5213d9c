//! ViewModels: one per screen, each owning a [`StateStore`](crate::state::StateStore)
//! of its UI state and consuming a sealed intent type.

pub mod dashboard;
pub mod duty_details;
pub mod duty_form;
pub mod duty_list;
pub mod occurrence_form;
pub mod review;

pub use dashboard::{DashboardIntent, DashboardUiState, DashboardViewModel};
pub use duty_details::{DutyDetailsIntent, DutyDetailsUiState, DutyDetailsViewModel};
pub use duty_form::{DutyFormIntent, DutyFormUiState, DutyFormViewModel, FormPhase};
pub use duty_list::{DutyListIntent, DutyListUiState, DutyListViewModel};
pub use occurrence_form::{AddDutyOccurrenceViewModel, OccurrenceIntent, OccurrenceUiState};
pub use review::{DutyReviewViewModel, ReviewIntent, ReviewUiState};
