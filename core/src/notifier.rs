//! Notification boundary.
//!
//! The tracker treats delivery as an opaque, possibly slow, possibly
//! failing capability. No retry logic lives here: a failed send is
//! reported as `false` and the caller decides what that means (for the
//! sweep, it means the escalation attempt is discarded until next cycle).

use crate::complaint::Priority;
use crate::types::{ComplaintId, WardId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// Full payload handed to a notifier for one dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub recipient_email: String,
    pub recipient_name: String,
    pub complaint_id: ComplaintId,
    pub ward_id: WardId,
    pub category: String,
    pub complaint_text: String,
    pub escalation_level: u8,
    pub submitted_at: DateTime<Utc>,
    pub priority: Priority,
}

/// The delivery capability injected into the lifecycle manager.
/// Returns whether the send succeeded. Implementations must not panic on
/// delivery failure.
pub trait Notifier: Send + Sync {
    fn send(&self, note: &Notification) -> bool;
}

/// Default notifier: logs the dispatch and reports success. Stands in for
/// a real email/SMS gateway.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, note: &Notification) -> bool {
        log::info!(
            "notify: level={} to={} <{}> complaint={} ward={} category={} priority={}",
            note.escalation_level,
            note.recipient_name,
            note.recipient_email,
            note.complaint_id,
            note.ward_id,
            note.category,
            note.priority,
        );
        true
    }
}

/// Bounds a single dispatch: the inner send runs on a worker thread and
/// any answer arriving after the timeout counts as a failed send, not a
/// hang. The worker is detached; a late answer is dropped.
pub struct TimeoutNotifier {
    inner: Arc<dyn Notifier>,
    timeout: Duration,
}

impl TimeoutNotifier {
    pub fn new(inner: Arc<dyn Notifier>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl Notifier for TimeoutNotifier {
    fn send(&self, note: &Notification) -> bool {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let worker_note = note.clone();
        thread::spawn(move || {
            let _ = tx.send(inner.send(&worker_note));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(sent) => sent,
            Err(_) => {
                log::warn!(
                    "notify: dispatch for complaint {} timed out after {:?}",
                    note.complaint_id,
                    self.timeout,
                );
                false
            }
        }
    }
}
