//! The consultation request form.
//!
//! There is no delivery backend: a valid submission is logged, held for a
//! fixed delay and always acknowledged.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

pub const OTHER_SERVICE: &str = "other";

/// `(value, label)` pairs offered in the timeframe select.
pub const TIMEFRAMES: [(&str, &str); 5] = [
    ("asap", "As Soon As Possible"),
    ("1-2-weeks", "1–2 Weeks"),
    ("1-month", "Within a Month"),
    ("1-3-months", "1–3 Months"),
    ("planning", "Just Planning"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "zipCode", alias = "zip_code")]
    pub zip_code: String,
    pub service: String,
    pub timeframe: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl ContactSubmission {
    /// Every field error, in form order. Empty when the submission is valid.
    /// `service_slugs` are the selectable services besides `other`.
    pub fn field_errors(&self, service_slugs: &[String]) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let mut push = |field: &'static str, message: &'static str| errors.push(FieldError { field, message });

        if blank(&self.name) {
            push("name", "Name is required");
        }
        if blank(&self.email) {
            push("email", "Email is required");
        } else if !email_pattern().is_match(self.email.trim()) {
            push("email", "Enter a valid email");
        }
        if blank(&self.phone) {
            push("phone", "Phone number is required");
        }
        if blank(&self.zip_code) {
            push("zipCode", "ZIP code is required");
        }
        let service = self.service.trim();
        if !service.is_empty()
            && service != OTHER_SERVICE
            && !service_slugs.iter().any(|slug| slug == service)
        {
            push("service", "Select a service from the list");
        }
        let timeframe = self.timeframe.trim();
        if !timeframe.is_empty() && !TIMEFRAMES.iter().any(|(value, _)| *value == timeframe) {
            push("timeframe", "Select a timeframe from the list");
        }
        if blank(&self.message) {
            push("message", "Please describe your project or question");
        }

        errors
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub name: String,
    pub received_at: DateTime<Utc>,
}

/// Accepts validated submissions.
#[derive(Debug, Clone)]
pub struct ContactDesk {
    delay: Duration,
}

impl ContactDesk {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn submit(&self, submission: &ContactSubmission) -> Receipt {
        tracing::info!(
            name = %submission.name,
            email = %submission.email,
            service = %submission.service,
            timeframe = %submission.timeframe,
            zip = %submission.zip_code,
            "Consultation request received"
        );
        tokio::time::sleep(self.delay).await;

        Receipt {
            name: submission.name.trim().to_string(),
            received_at: Utc::now(),
        }
    }
}
