//! The complaint record and its lifecycle vocabulary.

use crate::error::{TrackerError, TrackerResult};
use crate::types::{ComplaintId, WardId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status. `Resolved` is terminal: a resolved complaint is
/// permanently excluded from escalation and cannot be reopened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Submitted,
    InProgress,
    Escalated,
    Resolved,
}

impl Status {
    /// Parse an operator-supplied status string. Anything outside the
    /// four-valued set is rejected.
    pub fn parse(value: &str) -> TrackerResult<Self> {
        match value {
            "submitted" => Ok(Status::Submitted),
            "in-progress" => Ok(Status::InProgress),
            "escalated" => Ok(Status::Escalated),
            "resolved" => Ok(Status::Resolved),
            other => Err(TrackerError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "submitted",
            Status::InProgress => "in-progress",
            Status::Escalated => "escalated",
            Status::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display/urgency tier, derived entirely from time-to-deadline.
/// Ordered so that urgency only climbs as the clock advances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Normal,
    Urgent,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Urgent => "urgent",
            Priority::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the intake surface hands to `submit`. Everything here is immutable
/// once the complaint exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub ward_id: WardId,
    pub category: String,
    pub text: String,
    pub language: String,
    /// Pointer to an externally stored recording; never inspected here.
    #[serde(default)]
    pub audio_reference: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    pub ward_id: WardId,
    pub category: String,
    pub text: String,
    pub language: String,
    pub audio_reference: Option<String>,
    /// Origin of all escalation math. Immutable.
    pub submitted_at: DateTime<Utc>,
    /// Stamped whenever an operator moves status away from `submitted`.
    /// Absent means "never touched". Once set, never cleared.
    pub last_response_at: Option<DateTime<Utc>>,
    pub status: Status,
    /// Notification-chain tier, 1..=3. Monotone non-decreasing.
    pub escalation_level: u8,
    /// Last computed priority. A cache for list views only — sweep and the
    /// read surface always recompute from timestamps.
    pub priority: Priority,
    /// Whether the most recent escalation-relevant dispatch succeeded.
    pub notification_sent: bool,
}
