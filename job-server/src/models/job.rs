use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum JobStatus {
    Draft,
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl LineItem {
    /// `None` when the total does not fit in an `i64`
    pub fn total_cents(&self) -> Option<i64> {
        self.unit_price_cents.checked_mul(i64::from(self.quantity))
    }
}

/// A job record as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub client_name: String,
    pub title: String,
    pub status: JobStatus,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
}

impl Job {
    pub fn total_cents(&self) -> Option<i64> {
        self.line_items
            .iter()
            .try_fold(0i64, |total, item| total.checked_add(item.total_cents()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        assert_eq!(JobStatus::InProgress.to_string(), "in_progress");
        assert_eq!("completed".parse::<JobStatus>().unwrap(), JobStatus::Completed);
        assert!("finished".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_job_from_json() {
        let job: Job = serde_json::from_str(
            r#"{
                "id": "17",
                "client_name": "Harbor Dental",
                "title": "Replace water heater",
                "status": "scheduled",
                "scheduled_at": "2026-10-20T14:00:00Z",
                "line_items": [
                    {"description": "Water heater", "quantity": 1, "unit_price_cents": 89900},
                    {"description": "Labor hour", "quantity": 3, "unit_price_cents": 9500}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(job.status, JobStatus::Scheduled);
        assert!(job.scheduled_at.is_some());
        assert_eq!(job.total_cents(), Some(89900 + 3 * 9500));
    }

    #[test]
    fn test_job_without_line_items() {
        let job: Job = serde_json::from_str(
            r#"{"id": "1", "client_name": "A", "title": "Estimate visit", "status": "draft"}"#,
        )
        .unwrap();

        assert_eq!(job.total_cents(), Some(0));
        assert_eq!(job.scheduled_at, None);
    }

    #[test]
    fn test_total_overflow() {
        let item = |quantity, unit_price_cents| LineItem {
            description: "Generator".to_string(),
            quantity,
            unit_price_cents,
        };
        let mut job: Job = serde_json::from_str(
            r#"{"id": "1", "client_name": "A", "title": "Backup power", "status": "draft"}"#,
        )
        .unwrap();

        job.line_items = vec![item(4_000_000_000, 9_000_000_000_000)];
        assert_eq!(job.line_items[0].total_cents(), None);
        assert_eq!(job.total_cents(), None);

        job.line_items = vec![item(1, i64::MAX), item(1, 1)];
        assert_eq!(job.line_items[0].total_cents(), Some(i64::MAX));
        assert_eq!(job.total_cents(), None);
    }
}
