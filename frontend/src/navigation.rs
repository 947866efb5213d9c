//! Screen routes and the navigation events ViewModels emit.

use backend::domain::models::DutyCategory;
use log::debug;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    DutyList { category: DutyCategory },
    CreateDuty { category: DutyCategory },
    EditDuty { duty_id: String },
    DutyDetails { duty_id: String },
    AddOccurrence { duty_id: String },
    Review,
}

fn category_segment(category: DutyCategory) -> &'static str {
    match category {
        DutyCategory::Personal => "personal",
        DutyCategory::Company => "company",
    }
}

fn parse_category(segment: &str) -> Option<DutyCategory> {
    match segment {
        "personal" => Some(DutyCategory::Personal),
        "company" => Some(DutyCategory::Company),
        _ => None,
    }
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "dashboard".to_string(),
            Route::DutyList { category } => format!("duties/{}", category_segment(*category)),
            Route::CreateDuty { category } => format!("duties/{}/new", category_segment(*category)),
            Route::EditDuty { duty_id } => format!("duty/{}/edit", duty_id),
            Route::DutyDetails { duty_id } => format!("duty/{}", duty_id),
            Route::AddOccurrence { duty_id } => format!("duty/{}/occurrence", duty_id),
            Route::Review => "review".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Route> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["dashboard"] => Some(Route::Dashboard),
            ["review"] => Some(Route::Review),
            ["duties", category] => parse_category(category).map(|category| Route::DutyList { category }),
            ["duties", category, "new"] => parse_category(category).map(|category| Route::CreateDuty { category }),
            ["duty", id] if !id.is_empty() => Some(Route::DutyDetails { duty_id: id.to_string() }),
            ["duty", id, "edit"] if !id.is_empty() => Some(Route::EditDuty { duty_id: id.to_string() }),
            ["duty", id, "occurrence"] if !id.is_empty() => Some(Route::AddOccurrence { duty_id: id.to_string() }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Back,
    ToRoute(String),
}

/// Sends navigation events to whoever owns the screen stack
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    sender: Option<mpsc::UnboundedSender<NavigationEvent>>,
}

impl Navigator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NavigationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender: Some(sender) }, receiver)
    }

    /// A navigator whose events go nowhere
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn back(&self) {
        self.send(NavigationEvent::Back);
    }

    pub fn to(&self, route: Route) {
        self.send(NavigationEvent::ToRoute(route.path()));
    }

    fn send(&self, event: NavigationEvent) {
        debug!("Navigation: {:?}", event);
        if let Some(sender) = &self.sender {
            // The receiver is gone once the screen stack is torn down
            let _ = sender.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_parse_back() {
        let routes = [
            Route::Dashboard,
            Route::Review,
            Route::DutyList { category: DutyCategory::Company },
            Route::CreateDuty { category: DutyCategory::Personal },
            Route::EditDuty { duty_id: "duty::1".to_string() },
            Route::DutyDetails { duty_id: "duty::1".to_string() },
            Route::AddOccurrence { duty_id: "duty::1".to_string() },
        ];
        for route in routes {
            assert_eq!(Route::parse(&route.path()), Some(route));
        }
        assert_eq!(Route::parse("duties/family"), None);
        assert_eq!(Route::parse("nowhere"), None);
    }

    #[tokio::test]
    async fn test_navigator_events() {
        let (navigator, mut events) = Navigator::channel();
        navigator.to(Route::Review);
        navigator.back();

        assert_eq!(events.recv().await, Some(NavigationEvent::ToRoute("review".to_string())));
        assert_eq!(events.recv().await, Some(NavigationEvent::Back));

        Navigator::detached().back();
    }
}
