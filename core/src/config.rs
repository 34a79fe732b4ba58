//! Tracker configuration: escalation policy, recipient directory, sweep
//! cadence. Loaded from a JSON file or built from defaults.
//!
//! RULE: policy bounds are validated once, at construction. A policy that
//! fails validation is a fatal startup error, never a silent misclassify.

use crate::error::{TrackerError, TrackerResult};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Deadline rules for the escalation calculator.
///
/// Hours of day are evaluated on the UTC clock, uniformly end-to-end.
/// A submission whose UTC hour falls in `[business_hours_start,
/// business_hours_end)` gets the business-hours deadline; anything else
/// gets the after-hours deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicy {
    pub business_hours_start: u32,
    pub business_hours_end: u32,
    pub business_hours_deadline_hours: i64,
    pub after_hours_deadline_hours: i64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            business_hours_start: 9,
            business_hours_end: 21,
            business_hours_deadline_hours: 12,
            after_hours_deadline_hours: 24,
        }
    }
}

/// Ceiling on deadline windows: one year. Anything larger is a typo, and
/// unchecked values would overflow the duration arithmetic.
const MAX_DEADLINE_HOURS: i64 = 24 * 365;

impl EscalationPolicy {
    /// Fail fast on nonsense bounds.
    pub fn validate(&self) -> TrackerResult<()> {
        if self.business_hours_start >= self.business_hours_end {
            return Err(TrackerError::InvalidPolicy {
                reason: format!(
                    "business_hours_start ({}) must be before business_hours_end ({})",
                    self.business_hours_start, self.business_hours_end
                ),
            });
        }
        if self.business_hours_end > 24 {
            return Err(TrackerError::InvalidPolicy {
                reason: format!(
                    "business_hours_end ({}) exceeds 24",
                    self.business_hours_end
                ),
            });
        }
        if self.business_hours_deadline_hours <= 0 || self.after_hours_deadline_hours <= 0 {
            return Err(TrackerError::InvalidPolicy {
                reason: "deadline hours must be positive".into(),
            });
        }
        if self.business_hours_deadline_hours > MAX_DEADLINE_HOURS
            || self.after_hours_deadline_hours > MAX_DEADLINE_HOURS
        {
            return Err(TrackerError::InvalidPolicy {
                reason: format!("deadline hours must not exceed {MAX_DEADLINE_HOURS}"),
            });
        }
        Ok(())
    }
}

/// A notification target resolved from an escalation level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

/// Escalation chain: level 1 → ward administrator, level 2 → facility
/// superintendent, level 3 → regional health director.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipientDirectory {
    pub ward_admin: Recipient,
    pub superintendent: Recipient,
    pub health_director: Recipient,
}

impl Default for RecipientDirectory {
    fn default() -> Self {
        Self {
            ward_admin: Recipient {
                email: "admin@hospital.gov.in".into(),
                name: "Hospital Administrator".into(),
            },
            superintendent: Recipient {
                email: "superintendent@hospital.gov.in".into(),
                name: "Hospital Superintendent".into(),
            },
            health_director: Recipient {
                email: "director@health.gov.in".into(),
                name: "Health Director".into(),
            },
        }
    }
}

impl RecipientDirectory {
    /// Levels outside [1,3] fall back to the ward administrator.
    pub fn recipient_for(&self, level: u8) -> &Recipient {
        match level {
            2 => &self.superintendent,
            3 => &self.health_director,
            _ => &self.ward_admin,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub policy: EscalationPolicy,
    pub recipients: RecipientDirectory,
    /// How often the external scheduler is expected to call sweep().
    pub sweep_interval_minutes: u64,
    /// Bound on a single notification dispatch before it counts as failed.
    pub notify_timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            policy: EscalationPolicy::default(),
            recipients: RecipientDirectory::default(),
            sweep_interval_minutes: 5,
            notify_timeout_secs: 5,
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(content: &str) -> TrackerResult<Self> {
        let config: TrackerConfig = serde_json::from_str(content)?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> TrackerResult<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_json_str(&content)
    }
}
