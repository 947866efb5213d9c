//! Wire types for the duty tracker.
//!
//! These are the JSON shapes exchanged with the remote dashboard endpoint. They
//! are mapped field-by-field into backend domain entities and are deliberately
//! forgiving: optional fields that arrive malformed deserialize to `None`
//! instead of failing the whole response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize an optional field, degrading any malformed value to `None`.
fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Top level response of `GET /dashboard`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRemoteResponse {
    pub dashboard: DashboardDataRemote,
    #[serde(default)]
    pub metadata: DashboardMetadataRemote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardDataRemote {
    #[serde(default)]
    pub personal_duties: Vec<EnhancedDutyWithOccurrenceRemote>,
    #[serde(default)]
    pub company_duties: Vec<EnhancedDutyWithOccurrenceRemote>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub personal_summary: Option<EnhancedMonthlySummaryRemote>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub company_summary: Option<EnhancedMonthlySummaryRemote>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub overall_stats: Option<OverallStatsRemote>,
}

/// A duty joined with its latest occurrence, as computed by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedDutyWithOccurrenceRemote {
    pub duty: EnhancedDutyRemote,
    #[serde(default, deserialize_with = "lenient_option")]
    pub last_occurrence: Option<EnhancedDutyOccurrenceRemote>,
    #[serde(default)]
    pub has_current_month_occurrence: bool,
    #[serde(default, deserialize_with = "lenient_option")]
    pub status: Option<DutyStatusRemote>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub next_due_date: Option<String>,
    #[serde(default)]
    pub is_overdue: bool,
    #[serde(default, deserialize_with = "lenient_option")]
    pub display_info: Option<DutyDisplayInfoRemote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedDutyRemote {
    pub id: i64,
    pub title: String,
    /// `"PAYABLE"` or `"ACTIONABLE"`; anything else is treated as actionable
    #[serde(rename = "type", default)]
    pub duty_type: String,
    #[serde(default)]
    pub category_name: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub frequency: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub estimated_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedDutyOccurrenceRemote {
    pub id: i64,
    pub duty_id: i64,
    #[serde(default, deserialize_with = "lenient_option")]
    pub amount_paid: Option<f64>,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` date
    #[serde(default)]
    pub completed_at: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_option")]
    pub formatted_amount: Option<String>,
    #[serde(default)]
    pub days_ago: i32,
    #[serde(default)]
    pub is_recent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedMonthlySummaryRemote {
    pub total_amount_paid: f64,
    pub total_completed: u32,
    pub total_tasks: u32,
    pub current_month: u32,
    pub year: i32,
    #[serde(default)]
    pub formatted_amount: String,
    #[serde(default)]
    pub completion_rate: f64,
    #[serde(default)]
    pub month_name: String,
    #[serde(default, deserialize_with = "lenient_option")]
    pub comparison_with_previous_month: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverallStatsRemote {
    pub total_duties: u32,
    pub completed_this_month: u32,
    pub pending_duties: u32,
    pub overdue_duties: u32,
    pub total_amount_paid_this_month: f64,
    pub formatted_total_amount: String,
    pub completion_rate: f64,
    pub has_overdue_items: bool,
    pub needs_attention: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardMetadataRemote {
    pub generated_at: String,
    pub current_month: u32,
    pub current_year: i32,
    pub month_name: String,
    pub timezone: String,
    pub version: String,
    pub has_data: bool,
    pub is_empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DutyStatusRemote {
    pub is_completed: bool,
    pub is_paid: bool,
    pub status_text: String,
    pub status_color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DutyDisplayInfoRemote {
    pub priority: String,
    pub category_color: String,
    pub category_icon: String,
    pub type_display_name: String,
    pub short_description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "dashboard": {
            "personalDuties": [{
                "duty": {
                    "id": 1,
                    "title": "Rent",
                    "type": "PAYABLE",
                    "categoryName": "Personal",
                    "createdAt": "2024-09-01T10:00:00Z",
                    "dueDate": "2024-10-01",
                    "frequency": "MONTHLY",
                    "estimatedAmount": 1200.0
                },
                "lastOccurrence": {
                    "id": 10,
                    "dutyId": 1,
                    "amountPaid": 1200.0,
                    "completedAt": "2024-10-05T09:00:00Z",
                    "daysAgo": 3,
                    "isRecent": true
                },
                "hasCurrentMonthOccurrence": true,
                "isOverdue": false
            }],
            "companyDuties": [],
            "personalSummary": {
                "totalAmountPaid": 1200.0,
                "totalCompleted": 1,
                "totalTasks": 1,
                "currentMonth": 10,
                "year": 2024,
                "completionRate": 1.0
            }
        },
        "metadata": {
            "generatedAt": "2024-10-08T12:00:00Z",
            "currentMonth": 10,
            "currentYear": 2024,
            "hasData": true
        }
    }"#;

    #[test]
    fn test_parse_dashboard_response() {
        let response: DashboardRemoteResponse = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(response.dashboard.personal_duties.len(), 1);
        let entry = &response.dashboard.personal_duties[0];
        assert_eq!(entry.duty.title, "Rent");
        assert_eq!(entry.duty.duty_type, "PAYABLE");
        assert_eq!(entry.duty.estimated_amount, Some(1200.0));
        assert_eq!(entry.last_occurrence.as_ref().unwrap().amount_paid, Some(1200.0));
        assert!(entry.has_current_month_occurrence);
        assert!(response.dashboard.company_summary.is_none());
        assert_eq!(response.metadata.current_year, 2024);
    }

    #[test]
    fn test_malformed_optional_fields_degrade_to_none() {
        let json = r#"{
            "dashboard": {
                "personalDuties": [{
                    "duty": {
                        "id": 2,
                        "title": "Gym",
                        "type": "ACTIONABLE",
                        "estimatedAmount": "not a number",
                        "frequency": 42
                    },
                    "lastOccurrence": "garbage",
                    "displayInfo": [1, 2, 3]
                }],
                "personalSummary": { "totalTasks": "three" }
            }
        }"#;

        let response: DashboardRemoteResponse = serde_json::from_str(json).unwrap();
        let entry = &response.dashboard.personal_duties[0];

        assert_eq!(entry.duty.estimated_amount, None);
        assert_eq!(entry.duty.frequency, None);
        assert!(entry.last_occurrence.is_none());
        assert!(entry.display_info.is_none());
        assert!(response.dashboard.personal_summary.is_none());
        assert_eq!(response.metadata, DashboardMetadataRemote::default());
    }

    #[test]
    fn test_missing_required_duty_field_is_an_error() {
        let json = r#"{ "dashboard": { "personalDuties": [{ "duty": { "title": "No id" } }] } }"#;
        assert!(serde_json::from_str::<DashboardRemoteResponse>(json).is_err());
    }
}
