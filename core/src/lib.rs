//! wardline-core: hospital complaint intake and escalation tracking.
//!
//! Patients submit complaints tied to a ward; unresolved complaints
//! escalate through a three-level notification chain as their deadline
//! passes. The escalation calculator is pure; the lifecycle manager owns
//! the complaint set and drives notifications through an injected
//! [`notifier::Notifier`].

pub mod complaint;
pub mod config;
pub mod error;
pub mod escalation;
pub mod lifecycle;
pub mod notifier;
pub mod store;
pub mod types;

pub use complaint::{Complaint, ComplaintDraft, Priority, Status};
pub use config::{EscalationPolicy, Recipient, RecipientDirectory, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use lifecycle::{ComplaintCounts, ComplaintDesk, ComplaintFilter, MAX_ESCALATION_LEVEL};
pub use notifier::{LogNotifier, Notification, Notifier, TimeoutNotifier};
pub use store::ComplaintStore;
