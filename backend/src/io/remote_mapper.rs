use chrono::{DateTime, Datelike, NaiveDate, Utc};
use log::warn;
use shared::{
    DashboardRemoteResponse, EnhancedDutyOccurrenceRemote, EnhancedDutyRemote,
    EnhancedDutyWithOccurrenceRemote, EnhancedMonthlySummaryRemote, OverallStatsRemote,
};

use crate::domain::dashboard::DashboardData;
use crate::domain::format::parse_date;
use crate::domain::listing::upcoming;
use crate::domain::models::{
    CategorySummaries, Duty, DutyOccurrence, DutyStatus, DutyType, DutyWithLastOccurrence, Frequency,
    MonthlySummary, ReminderSettings,
};
use crate::domain::models::summary::completion_rate;

/// Maps the remote dashboard payload into domain entities.
///
/// Nothing in here fails: unparseable timestamps fall back to the instant the
/// caller supplies, unparseable optional dates become `None`.
pub struct DashboardRemoteMapper;

impl DashboardRemoteMapper {
    fn parse_instant(raw: &str, fallback: DateTime<Utc>) -> DateTime<Utc> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw.trim()) {
            return parsed.with_timezone(&Utc);
        }
        if let Some(date) = parse_date(raw) {
            return date.and_time(chrono::NaiveTime::MIN).and_utc();
        }
        warn!("Unparseable timestamp {:?}, using fallback", raw);
        fallback
    }

    fn parse_optional_date(raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw?;
        parse_date(raw).or_else(|| {
            DateTime::parse_from_rfc3339(raw.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
    }

    /// Convert a remote duty to a domain duty
    pub fn duty_to_domain(dto: &EnhancedDutyRemote, fallback: DateTime<Utc>) -> Duty {
        let created_at = Self::parse_instant(&dto.created_at, fallback);
        Duty {
            id: dto.id.to_string(),
            title: dto.title.clone(),
            duty_type: DutyType::from_str_or_default(&dto.duty_type),
            category_name: dto.category_name.clone(),
            created_at,
            updated_at: created_at,
            start_date: Self::parse_optional_date(dto.start_date.as_deref()),
            due_date: Self::parse_optional_date(dto.due_date.as_deref()),
            status: DutyStatus::Pending,
            frequency: dto.frequency.as_deref().and_then(Frequency::parse),
            estimated_amount: dto.estimated_amount,
            reminders: ReminderSettings::default(),
        }
    }

    /// Convert a remote occurrence to a domain occurrence
    pub fn occurrence_to_domain(dto: &EnhancedDutyOccurrenceRemote, fallback: DateTime<Utc>) -> DutyOccurrence {
        DutyOccurrence {
            id: dto.id.to_string(),
            duty_id: dto.duty_id.to_string(),
            amount_paid: dto.amount_paid,
            completed_at: Self::parse_instant(&dto.completed_at, fallback).date_naive(),
            notes: dto.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }

    fn status_to_domain(dto: &EnhancedDutyWithOccurrenceRemote) -> DutyStatus {
        let settled = dto
            .status
            .as_ref()
            .map_or(false, |s| s.is_paid || s.is_completed);
        if settled {
            DutyStatus::Paid
        } else if dto.is_overdue {
            DutyStatus::Overdue
        } else if dto.has_current_month_occurrence {
            DutyStatus::Paid
        } else {
            DutyStatus::Pending
        }
    }

    /// Convert a remote duty-with-occurrence join
    pub fn duty_with_occurrence_to_domain(
        dto: &EnhancedDutyWithOccurrenceRemote,
        fallback: DateTime<Utc>,
    ) -> DutyWithLastOccurrence {
        let mut duty = Self::duty_to_domain(&dto.duty, fallback);
        duty.status = Self::status_to_domain(dto);
        DutyWithLastOccurrence {
            duty,
            last_occurrence: dto
                .last_occurrence
                .as_ref()
                .map(|o| Self::occurrence_to_domain(o, fallback)),
            has_current_month_occurrence: dto.has_current_month_occurrence,
        }
    }

    /// Convert a remote monthly summary.
    ///
    /// The rate is derived from the totals; the wire `completionRate` is ignored.
    pub fn summary_to_domain(dto: &EnhancedMonthlySummaryRemote) -> MonthlySummary {
        MonthlySummary {
            total_amount_paid: dto.total_amount_paid,
            total_completed: dto.total_completed,
            total_tasks: dto.total_tasks,
            current_month: dto.current_month,
            year: dto.year,
            completion_rate: completion_rate(dto.total_completed, dto.total_tasks),
        }
    }

    fn overall_to_domain(dto: &OverallStatsRemote, month: u32, year: i32) -> MonthlySummary {
        MonthlySummary {
            total_amount_paid: dto.total_amount_paid_this_month,
            total_completed: dto.completed_this_month,
            total_tasks: dto.total_duties,
            current_month: month,
            year,
            completion_rate: completion_rate(dto.completed_this_month, dto.total_duties),
        }
    }

    /// Convert the whole remote dashboard.
    ///
    /// Missing summaries become empty summaries for the response's month
    /// (or `fallback`'s month when the metadata is missing too).
    pub fn to_domain(response: &DashboardRemoteResponse, fallback: DateTime<Utc>) -> DashboardData {
        let dashboard = &response.dashboard;
        let (month, year) = if response.metadata.current_month == 0 {
            (fallback.month(), fallback.year())
        } else {
            (response.metadata.current_month, response.metadata.current_year)
        };

        let map_list = |list: &[EnhancedDutyWithOccurrenceRemote]| -> Vec<DutyWithLastOccurrence> {
            list.iter()
                .map(|d| Self::duty_with_occurrence_to_domain(d, fallback))
                .collect()
        };
        let personal_duties = map_list(&dashboard.personal_duties);
        let company_duties = map_list(&dashboard.company_duties);

        let summary_or_empty = |summary: &Option<EnhancedMonthlySummaryRemote>| {
            summary
                .as_ref()
                .map(Self::summary_to_domain)
                .unwrap_or_else(|| MonthlySummary::empty(month, year))
        };
        let personal = summary_or_empty(&dashboard.personal_summary);
        let company = summary_or_empty(&dashboard.company_summary);
        let overall = match &dashboard.overall_stats {
            Some(stats) => Self::overall_to_domain(stats, month, year),
            None => personal.combine(&company),
        };

        let all: Vec<DutyWithLastOccurrence> = personal_duties
            .iter()
            .chain(company_duties.iter())
            .cloned()
            .collect();

        DashboardData {
            upcoming_duties: upcoming(&all),
            personal_duties,
            company_duties,
            summaries: CategorySummaries {
                personal,
                company,
                overall,
            },
            comparison: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fallback() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 15, 12, 0, 0).unwrap()
    }

    fn remote_duty(duty_type: &str, created_at: &str) -> EnhancedDutyRemote {
        EnhancedDutyRemote {
            id: 7,
            title: "Rent".to_string(),
            duty_type: duty_type.to_string(),
            category_name: "Personal".to_string(),
            created_at: created_at.to_string(),
            start_date: Some("2024-09-01".to_string()),
            due_date: Some("not a date".to_string()),
            frequency: Some("MONTHLY".to_string()),
            estimated_amount: Some(1200.0),
        }
    }

    #[test]
    fn test_unknown_type_maps_to_actionable() {
        let duty = DashboardRemoteMapper::duty_to_domain(&remote_duty("UNKNOWN", "2024-09-01T10:00:00Z"), fallback());
        assert_eq!(duty.duty_type, DutyType::Actionable);

        let duty = DashboardRemoteMapper::duty_to_domain(&remote_duty("PAYABLE", "2024-09-01T10:00:00Z"), fallback());
        assert_eq!(duty.duty_type, DutyType::Payable);
    }

    #[test]
    fn test_duty_fields() {
        let duty = DashboardRemoteMapper::duty_to_domain(&remote_duty("PAYABLE", "2024-09-01T10:00:00Z"), fallback());

        assert_eq!(duty.id, "7");
        assert_eq!(duty.created_at, Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap());
        assert_eq!(duty.start_date, NaiveDate::from_ymd_opt(2024, 9, 1));
        assert_eq!(duty.due_date, None);
        assert_eq!(duty.frequency, Some(Frequency::Monthly));
    }

    #[test]
    fn test_bad_timestamp_falls_back() {
        let duty = DashboardRemoteMapper::duty_to_domain(&remote_duty("PAYABLE", "yesterday-ish"), fallback());
        assert_eq!(duty.created_at, fallback());

        let occurrence = EnhancedDutyOccurrenceRemote {
            id: 1,
            duty_id: 7,
            amount_paid: Some(10.0),
            completed_at: String::new(),
            notes: Some("  ".to_string()),
            formatted_amount: None,
            days_ago: 0,
            is_recent: false,
        };
        let mapped = DashboardRemoteMapper::occurrence_to_domain(&occurrence, fallback());
        assert_eq!(mapped.completed_at, fallback().date_naive());
        assert_eq!(mapped.duty_id, "7");
        assert_eq!(mapped.notes, None);
    }

    #[test]
    fn test_dashboard_mapping() {
        let json = r#"{
            "dashboard": {
                "personalDuties": [{
                    "duty": { "id": 1, "title": "Rent", "type": "PAYABLE", "categoryName": "Personal",
                              "createdAt": "2024-09-01T10:00:00Z", "dueDate": "2024-10-01" },
                    "lastOccurrence": { "id": 10, "dutyId": 1, "amountPaid": 1200.0,
                                        "completedAt": "2024-10-05" },
                    "hasCurrentMonthOccurrence": true
                }],
                "companyDuties": [{
                    "duty": { "id": 2, "title": "Taxes", "type": "WHATEVER", "categoryName": "Company",
                              "createdAt": "bad", "dueDate": "2024-10-10" },
                    "isOverdue": true
                }],
                "personalSummary": { "totalAmountPaid": 1200.0, "totalCompleted": 1, "totalTasks": 1,
                                     "currentMonth": 10, "year": 2024, "completionRate": 1.0 },
                "companySummary": "broken"
            },
            "metadata": { "currentMonth": 10, "currentYear": 2024 }
        }"#;
        let response: DashboardRemoteResponse = serde_json::from_str(json).unwrap();

        let data = DashboardRemoteMapper::to_domain(&response, fallback());

        assert_eq!(data.personal_duties[0].status(), DutyStatus::Paid);
        assert_eq!(
            data.personal_duties[0].last_occurrence.as_ref().unwrap().completed_at,
            NaiveDate::from_ymd_opt(2024, 10, 5).unwrap()
        );
        assert_eq!(data.company_duties[0].status(), DutyStatus::Overdue);
        assert_eq!(data.company_duties[0].duty.duty_type, DutyType::Actionable);
        assert_eq!(data.company_duties[0].duty.created_at, fallback());

        assert_eq!(data.summaries.personal.completion_rate, 1.0);
        assert_eq!(data.summaries.company, MonthlySummary::empty(10, 2024));
        assert_eq!(data.summaries.overall.total_tasks, 1);
        assert_eq!(data.upcoming_duties.len(), 1);
        assert_eq!(data.upcoming_duties[0].duty.id, "2");
        assert!(data.comparison.is_none());
    }

    #[test]
    fn test_completion_rate_derived_from_totals() {
        let json = r#"{
            "dashboard": {
                "personalSummary": { "totalAmountPaid": 50.0, "totalCompleted": 1, "totalTasks": 1,
                                     "currentMonth": 10, "year": 2024 },
                "companySummary": { "totalAmountPaid": 0.0, "totalCompleted": 1, "totalTasks": 4,
                                    "currentMonth": 10, "year": 2024, "completionRate": 0.9 },
                "overallStats": { "totalDuties": 5, "completedThisMonth": 2, "completionRate": 0.0 }
            },
            "metadata": { "currentMonth": 10, "currentYear": 2024 }
        }"#;
        let response: DashboardRemoteResponse = serde_json::from_str(json).unwrap();

        let data = DashboardRemoteMapper::to_domain(&response, fallback());

        assert_eq!(data.summaries.personal.completion_rate, 1.0);
        assert_eq!(data.summaries.company.completion_rate, 0.25);
        assert_eq!(data.summaries.overall.completion_rate, 0.4);
    }

    #[test]
    fn test_empty_summary_rate_is_zero() {
        let dto: EnhancedMonthlySummaryRemote = serde_json::from_str(
            r#"{ "totalAmountPaid": 0.0, "totalCompleted": 0, "totalTasks": 0, "currentMonth": 1,
                 "year": 2024, "completionRate": 0.7 }"#,
        )
        .unwrap();
        assert_eq!(DashboardRemoteMapper::summary_to_domain(&dto).completion_rate, 0.0);
    }
}
