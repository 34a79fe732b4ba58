//! Escalation calculator — pure deadline and priority math.
//!
//! Given a complaint's submission time, its last-response time, the current
//! time, and a policy, this module decides:
//!   1. The escalation deadline (business vs. after-hours submission)
//!   2. Whether escalation is due
//!   3. The display priority tier
//!   4. A human-readable remaining-time string
//!
//! RULES:
//!   - Stateless and deterministic. No clock reads; `now` is a parameter.
//!   - Timestamps are UTC; hour-of-day classification uses the UTC hour.
//!   - A complaint that has ever received a response is never flagged due,
//!     no matter how much further time elapses.

use crate::complaint::Priority;
use crate::config::EscalationPolicy;
use chrono::{DateTime, Duration, Timelike, Utc};

/// Everything the dashboards and the sweep need to know about one
/// complaint's escalation state at a given instant.
#[derive(Debug, Clone)]
pub struct EscalationStatus {
    pub due: bool,
    pub deadline: DateTime<Utc>,
    /// Time left until the deadline, clamped to zero.
    pub remaining: Duration,
    pub priority: Priority,
    pub display: String,
}

/// Deadline for an unanswered complaint. Classification looks at the hour
/// component only; minutes and seconds are ignored.
pub fn compute_deadline(
    submitted_at: DateTime<Utc>,
    policy: &EscalationPolicy,
) -> DateTime<Utc> {
    let hour = submitted_at.hour();
    let during_business_hours =
        hour >= policy.business_hours_start && hour < policy.business_hours_end;

    if during_business_hours {
        submitted_at + Duration::hours(policy.business_hours_deadline_hours)
    } else {
        submitted_at + Duration::hours(policy.after_hours_deadline_hours)
    }
}

/// True iff the complaint has never been responded to and `now` is strictly
/// past the deadline.
pub fn is_escalation_due(
    submitted_at: DateTime<Utc>,
    last_response_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    policy: &EscalationPolicy,
) -> bool {
    last_response_at.is_none() && now > compute_deadline(submitted_at, policy)
}

/// Full evaluation: due flag, clamped remaining time, priority tier, and
/// the display string shown on dashboards.
pub fn evaluate(
    submitted_at: DateTime<Utc>,
    last_response_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    policy: &EscalationPolicy,
) -> EscalationStatus {
    let deadline = compute_deadline(submitted_at, policy);
    let due = is_escalation_due(submitted_at, last_response_at, now, policy);

    // Never report a negative countdown.
    let remaining = (deadline - now).max(Duration::zero());

    let priority = if due {
        Priority::Critical
    } else if remaining <= Duration::hours(2) {
        Priority::Urgent
    } else {
        Priority::Normal
    };

    let display = if due {
        "Escalation due".to_string()
    } else if remaining >= Duration::minutes(1) {
        // Whole hours and whole minutes, floor division.
        let hours = remaining.num_hours();
        let minutes = remaining.num_minutes() % 60;
        format!("{hours}h {minutes}m remaining")
    } else {
        "Escalating soon".to_string()
    };

    EscalationStatus {
        due,
        deadline,
        remaining,
        priority,
        display,
    }
}
