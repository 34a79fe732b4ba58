//! Complaint lifecycle manager — the single writer over the complaint set.
//!
//! This component:
//!   1. Accepts new complaints and dispatches the level-1 notification
//!   2. Applies operator status updates, stamping last-response time
//!   3. Sweeps open complaints and escalates the ones past deadline
//!   4. Serves read-only dashboard queries (lists and aggregate counts)
//!
//! RULES:
//!   - `now` is always a parameter; this module never reads the clock.
//!   - Priority is recomputed at every read. The stored field is a cache
//!     for the returned copies, never an input to sweep decisions.
//!   - A failed notification never aborts submit or sweep. During a sweep
//!     it discards that complaint's escalation attempt entirely; the next
//!     sweep retries.

use crate::complaint::{Complaint, ComplaintDraft, Priority, Status};
use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::escalation;
use crate::notifier::{Notification, Notifier, TimeoutNotifier};
use crate::store::ComplaintStore;
use crate::types::ComplaintId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Maximum notification-chain tier. Sweep refuses to escalate past this.
pub const MAX_ESCALATION_LEVEL: u8 = 3;

/// Read-side filter for dashboard lists.
#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub ward_id: Option<String>,
    pub status: Option<Status>,
}

/// Aggregate tallies for dashboard headers. Priorities are recomputed at
/// the query instant, not read from the cached field.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintCounts {
    pub total: usize,
    pub by_status: HashMap<String, i64>,
    pub by_ward: HashMap<String, i64>,
    pub by_category: HashMap<String, i64>,
    pub by_priority: HashMap<String, i64>,
}

pub struct ComplaintDesk {
    config: TrackerConfig,
    store: ComplaintStore,
    notifier: Box<dyn Notifier>,
}

impl ComplaintDesk {
    /// Build a desk over an injected store. Fails fast on an invalid policy.
    pub fn new(
        config: TrackerConfig,
        store: ComplaintStore,
        notifier: Box<dyn Notifier>,
    ) -> TrackerResult<Self> {
        config.policy.validate()?;
        Ok(Self {
            config,
            store,
            notifier,
        })
    }

    /// Build a desk whose notification dispatches are bounded by the
    /// configured timeout. This is the standard assembly path: a notifier
    /// that hangs past `notify_timeout_secs` counts as a failed send.
    pub fn with_bounded_notifier(
        config: TrackerConfig,
        store: ComplaintStore,
        notifier: Arc<dyn Notifier>,
    ) -> TrackerResult<Self> {
        let timeout = std::time::Duration::from_secs(config.notify_timeout_secs);
        let bounded = TimeoutNotifier::new(notifier, timeout);
        Self::new(config, store, Box::new(bounded))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn notification_for(&self, complaint: &Complaint, level: u8, priority: Priority) -> Notification {
        let recipient = self.config.recipients.recipient_for(level);
        Notification {
            recipient_email: recipient.email.clone(),
            recipient_name: recipient.name.clone(),
            complaint_id: complaint.id.clone(),
            ward_id: complaint.ward_id.clone(),
            category: complaint.category.clone(),
            complaint_text: complaint.text.clone(),
            escalation_level: level,
            submitted_at: complaint.submitted_at,
            priority,
        }
    }

    /// Register a new complaint. The record is stored and returned even
    /// when the initial notification fails; the outcome lands in
    /// `notification_sent`.
    pub fn submit(&mut self, draft: ComplaintDraft, now: DateTime<Utc>) -> Complaint {
        let status = escalation::evaluate(now, None, now, &self.config.policy);

        let mut complaint = Complaint {
            id: format!("cmp-{}", Uuid::new_v4()),
            ward_id: draft.ward_id,
            category: draft.category,
            text: draft.text,
            language: draft.language,
            audio_reference: draft.audio_reference,
            submitted_at: now,
            last_response_at: None,
            status: Status::Submitted,
            escalation_level: 1,
            priority: status.priority,
            notification_sent: false,
        };

        let note = self.notification_for(&complaint, 1, complaint.priority);
        complaint.notification_sent = self.notifier.send(&note);
        if !complaint.notification_sent {
            log::warn!(
                "submit: initial notification failed for complaint {}",
                complaint.id
            );
        }

        log::info!(
            "submit: complaint {} ward={} category={} priority={}",
            complaint.id,
            complaint.ward_id,
            complaint.category,
            complaint.priority,
        );

        self.store.upsert(complaint.clone());
        complaint
    }

    /// Operator status change. Any of the four statuses may move to any
    /// other; the value itself is all that is checked. Stamps
    /// `last_response_at` unless the new status is `submitted`.
    pub fn update_status(
        &mut self,
        id: &str,
        new_status: &str,
        now: DateTime<Utc>,
    ) -> TrackerResult<Complaint> {
        let status = Status::parse(new_status)?;

        let complaint = self
            .store
            .get_mut(id)
            .ok_or_else(|| TrackerError::NotFound { id: id.to_string() })?;

        complaint.status = status;
        if status != Status::Submitted {
            complaint.last_response_at = Some(now);
        }
        let updated = complaint.clone();

        log::info!("status: complaint {id} -> {status}");
        // Returned copies carry the priority at `now`, like every read.
        Ok(self.refreshed(&updated, now))
    }

    /// Evaluate every open complaint and escalate the ones past deadline.
    ///
    /// A due complaint below the level cap gets the next level's recipient
    /// notified first; only a successful send commits the mutation
    /// (level +1, status escalated, priority critical). A failed send
    /// leaves the record untouched for this cycle. Returns the ids that
    /// were escalated.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> Vec<ComplaintId> {
        let mut escalated = Vec::new();

        for id in self.store.open_ids() {
            let Some(complaint) = self.store.get(&id) else {
                continue;
            };

            let status = escalation::evaluate(
                complaint.submitted_at,
                complaint.last_response_at,
                now,
                &self.config.policy,
            );

            if !status.due || complaint.escalation_level >= MAX_ESCALATION_LEVEL {
                continue;
            }

            let next_level = complaint.escalation_level + 1;
            let note = self.notification_for(complaint, next_level, Priority::Critical);

            if !self.notifier.send(&note) {
                // Discard the attempt; the next sweep retries.
                log::warn!(
                    "sweep: notification failed for complaint {id}, level {} kept",
                    complaint.escalation_level
                );
                continue;
            }

            if let Some(complaint) = self.store.get_mut(&id) {
                complaint.escalation_level = next_level;
                complaint.status = Status::Escalated;
                complaint.priority = Priority::Critical;
                complaint.notification_sent = true;
                log::info!("sweep: complaint {id} escalated to level {next_level}");
                escalated.push(id);
            }
        }

        log::debug!(
            "sweep: {} complaint(s) escalated of {} stored",
            escalated.len(),
            self.store.len()
        );
        escalated
    }

    // ── Read surface ───────────────────────────────────────────────

    /// Copy of a complaint with priority recomputed at `now`.
    pub fn get(&self, id: &str, now: DateTime<Utc>) -> Option<Complaint> {
        self.store.get(id).map(|c| self.refreshed(c, now))
    }

    /// Complaints matching the filter, oldest first, priorities refreshed.
    pub fn list(&self, filter: &ComplaintFilter, now: DateTime<Utc>) -> Vec<Complaint> {
        self.store
            .list()
            .into_iter()
            .filter(|c| {
                filter
                    .ward_id
                    .as_ref()
                    .is_none_or(|ward| &c.ward_id == ward)
                    && filter.status.is_none_or(|status| c.status == status)
            })
            .map(|c| self.refreshed(c, now))
            .collect()
    }

    /// Aggregate counts by category, ward, status, and recomputed priority.
    pub fn counts(&self, now: DateTime<Utc>) -> ComplaintCounts {
        let mut by_status: HashMap<String, i64> = HashMap::new();
        let mut by_ward: HashMap<String, i64> = HashMap::new();
        let mut by_category: HashMap<String, i64> = HashMap::new();
        let mut by_priority: HashMap<String, i64> = HashMap::new();

        let all = self.store.list();
        for complaint in &all {
            let refreshed = self.refreshed(complaint, now);
            *by_status.entry(refreshed.status.as_str().into()).or_default() += 1;
            *by_ward.entry(refreshed.ward_id.clone()).or_default() += 1;
            *by_category.entry(refreshed.category.clone()).or_default() += 1;
            *by_priority
                .entry(refreshed.priority.as_str().into())
                .or_default() += 1;
        }

        ComplaintCounts {
            total: all.len(),
            by_status,
            by_ward,
            by_category,
            by_priority,
        }
    }

    fn refreshed(&self, complaint: &Complaint, now: DateTime<Utc>) -> Complaint {
        let mut copy = complaint.clone();
        copy.priority = escalation::evaluate(
            copy.submitted_at,
            copy.last_response_at,
            now,
            &self.config.policy,
        )
        .priority;
        copy
    }
}
