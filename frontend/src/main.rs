//! Headless walkthrough of the duty tracker screens.
//!
//! Usage: `duty-tracker [config.yaml]` (defaults to `duty-tracker.yaml`; a
//! missing file means default settings). In local mode a few sample duties
//! are created through the form screens before the dashboard is printed.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use backend::domain::format::{format_currency, format_date};
use backend::domain::models::{DutyCategory, DutyType, FormFieldUpdate, OccurrenceFieldUpdate};
use backend::{initialize_backend, AppConfig, Backend, StorageMode};
use chrono::{Days, Local, NaiveDate};
use frontend::viewmodels::{
    AddDutyOccurrenceViewModel, DashboardViewModel, DutyFormIntent, DutyFormViewModel, DutyReviewViewModel,
    FormPhase, OccurrenceIntent,
};
use frontend::{Navigator, StatusBadge, Theme};
use log::{debug, info};

struct SampleDuty {
    title: &'static str,
    category: DutyCategory,
    duty_type: DutyType,
    frequency: &'static str,
    due_in_days: u64,
    paid: Option<&'static str>,
}

const SAMPLES: &[SampleDuty] = &[
    SampleDuty {
        title: "rent",
        category: DutyCategory::Personal,
        duty_type: DutyType::Payable,
        frequency: "MONTHLY",
        due_in_days: 5,
        paid: Some("1200,00"),
    },
    SampleDuty {
        title: "renew car insurance",
        category: DutyCategory::Personal,
        duty_type: DutyType::Actionable,
        frequency: "YEARLY",
        due_in_days: 20,
        paid: None,
    },
    SampleDuty {
        title: "payroll taxes",
        category: DutyCategory::Company,
        duty_type: DutyType::Payable,
        frequency: "MONTHLY",
        due_in_days: 10,
        paid: None,
    },
];

async fn create_sample(backend: &Backend, navigator: &Navigator, today: NaiveDate, sample: &SampleDuty) -> Result<String> {
    let form = DutyFormViewModel::create(backend.duty_service.clone(), navigator.clone(), sample.category);
    let due = today
        .checked_add_days(Days::new(sample.due_in_days))
        .ok_or_else(|| anyhow!("due date out of range"))?;

    for update in [
        FormFieldUpdate::Title(sample.title.to_string()),
        FormFieldUpdate::DutyType(sample.duty_type),
        FormFieldUpdate::Frequency(sample.frequency.to_string()),
        FormFieldUpdate::StartDate(format_date(today)),
        FormFieldUpdate::DueDate(format_date(due)),
        FormFieldUpdate::DueReminderEnabled(true),
    ] {
        form.on_intent(DutyFormIntent::Update(update));
    }

    let Some(save) = form.on_intent(DutyFormIntent::Save) else {
        bail!("sample duty {:?} did not validate: {:?}", sample.title, form.state().get().errors);
    };
    save.await?;

    let state = form.state().get();
    match (state.phase, state.form.id) {
        (FormPhase::Saved, Some(id)) => Ok(id),
        _ => bail!("sample duty {:?} was not saved: {:?}", sample.title, state.error_message),
    }
}

async fn record_payment(backend: &Backend, navigator: &Navigator, today: NaiveDate, duty_id: &str, amount: &str) -> Result<()> {
    let screen = AddDutyOccurrenceViewModel::new(backend.duty_service.clone(), navigator.clone(), duty_id, today);
    screen.state().subscribe().wait_for(|s| !s.is_loading).await?;

    screen.on_intent(OccurrenceIntent::Update(OccurrenceFieldUpdate::PaidAmount(amount.to_string())));
    if let Some(save) = screen.on_intent(OccurrenceIntent::Save) {
        save.await?;
    }
    match screen.state().get().phase {
        FormPhase::Saved => Ok(()),
        _ => bail!("payment for {} was not recorded", duty_id),
    }
}

async fn seed_samples(backend: &Backend, navigator: &Navigator, today: NaiveDate) -> Result<()> {
    for sample in SAMPLES {
        let id = create_sample(backend, navigator, today, sample).await?;
        info!("Created sample duty {} ({})", id, sample.title);
        if let Some(amount) = sample.paid {
            record_payment(backend, navigator, today, &id, amount).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("duty-tracker.yaml"));
    let config = AppConfig::load(&config_path)?;
    let currency = config.currency_symbol.clone();
    let backend = initialize_backend(config)?;

    let today = Local::now().date_naive();
    let theme = Theme::default();
    let (navigator, mut events) = Navigator::channel();

    if backend.dashboard_service.mode() == StorageMode::Local {
        seed_samples(&backend, &navigator, today).await?;
    }

    let dashboard = DashboardViewModel::new(backend.dashboard_service.clone(), navigator.clone(), today);
    dashboard.refresh().await;
    let state = dashboard.state().get();
    if let Some(message) = &state.error_message {
        bail!("dashboard failed to load: {}", message);
    }

    println!("{}", state.period_label().unwrap_or_default());
    for (label, category) in [
        ("Overall", None),
        ("Personal", Some(DutyCategory::Personal)),
        ("Company", Some(DutyCategory::Company)),
    ] {
        let gauge = state.gauge(category).map(|g| g.value).unwrap_or(0.0);
        let paid = state.formatted_amount(category, &currency).unwrap_or_default();
        println!("  {:<9} {:>5.1}% done, {} paid", label, gauge, paid);
    }

    if let Some(data) = &state.data {
        println!("Upcoming:");
        for item in &data.upcoming_duties {
            let badge = StatusBadge::for_status(item.status(), &theme);
            let due = item.duty.due_date.map(format_date).unwrap_or_else(|| "-".to_string());
            println!("  [{}] {} due {} ({})", badge.label, item.duty.title, due, badge.foreground.hex());
        }
    }

    let now = Local::now().naive_local();
    for reminder in backend.duty_service.upcoming_reminders(now).await? {
        println!("Reminder: {} at {} ({:?})", reminder.title, reminder.fire_at, reminder.anchor);
    }

    let review = DutyReviewViewModel::new(backend.duty_service.clone(), navigator.clone());
    review.refresh().await;
    let review_state = review.state().get();
    for month in &review_state.review.months {
        println!("{}: {} record(s), {}", month.label, month.items.len(), format_currency(month.total_amount, &currency));
    }

    drop(navigator);
    while let Ok(event) = events.try_recv() {
        debug!("Unhandled navigation event: {:?}", event);
    }
    Ok(())
}
