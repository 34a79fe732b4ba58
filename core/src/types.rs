//! Shared primitive types used across the tracker.

/// A stable, unique identifier for a complaint. Assigned at submission.
pub type ComplaintId = String;

/// Identifier of the hospital ward a complaint is tied to.
pub type WardId = String;
