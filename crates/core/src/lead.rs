//! Contact-form leads and seminar enquiries.
//!
//! Both forms are validated here and persisted as append-only CSV rows by
//! `lessonsite_db::csv_store`. Validation trims every field and rejects the
//! submission as a whole when a required field is blank, so a failed
//! submission never produces a partial row.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Column header of `leads.csv`, in field order of [`Lead`].
pub const LEAD_HEADER: [&str; 7] = ["timestamp", "name", "phone", "email", "topic", "message", "ip"];

/// Column header of `seminars.csv`, in field order of [`SeminarRequest`].
pub const SEMINAR_HEADER: [&str; 9] = [
    "timestamp",
    "org",
    "contact",
    "phone",
    "email",
    "attendees",
    "preferred_date",
    "message",
    "ip",
];

/// Message returned for any submission missing a required field.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

/// Format a write time the way every CSV store records it.
///
/// Fixed-width UTC with microseconds, so rows sort lexically by time.
pub fn record_timestamp(at: Timestamp) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

/// Raw contact form as submitted (`POST /book`).
#[derive(Debug, Default, Deserialize)]
pub struct LeadForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub topic: Option<String>,
    pub message: Option<String>,
}

/// One row of `leads.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub topic: String,
    pub message: String,
    pub ip: String,
}

impl Lead {
    /// Validate a submitted form and stamp it with write time and origin.
    ///
    /// `name`, `phone` and `topic` are required; `email` and `message` may be
    /// empty.
    pub fn from_form(form: LeadForm, origin: &str, at: Timestamp) -> Result<Self, CoreError> {
        let lead = Self {
            timestamp: record_timestamp(at),
            name: trimmed(form.name),
            phone: trimmed(form.phone),
            email: trimmed(form.email),
            topic: trimmed(form.topic),
            message: trimmed(form.message),
            ip: origin.to_string(),
        };
        if lead.name.is_empty() || lead.phone.is_empty() || lead.topic.is_empty() {
            return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }
        Ok(lead)
    }
}

// ---------------------------------------------------------------------------
// Seminar enquiries
// ---------------------------------------------------------------------------

/// Raw seminar enquiry form (`POST /seminar`).
#[derive(Debug, Default, Deserialize)]
pub struct SeminarForm {
    pub org: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub attendees: Option<String>,
    pub preferred_date: Option<String>,
    pub message: Option<String>,
}

/// One row of `seminars.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeminarRequest {
    pub timestamp: String,
    pub org: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub attendees: String,
    pub preferred_date: String,
    pub message: String,
    pub ip: String,
}

impl SeminarRequest {
    /// Validate an enquiry; `org`, `contact` and `phone` are required.
    pub fn from_form(form: SeminarForm, origin: &str, at: Timestamp) -> Result<Self, CoreError> {
        let request = Self {
            timestamp: record_timestamp(at),
            org: trimmed(form.org),
            contact: trimmed(form.contact),
            phone: trimmed(form.phone),
            email: trimmed(form.email),
            attendees: trimmed(form.attendees),
            preferred_date: trimmed(form.preferred_date),
            message: trimmed(form.message),
            ip: origin.to_string(),
        };
        if request.org.is_empty() || request.contact.is_empty() || request.phone.is_empty() {
            return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }
        Ok(request)
    }
}
