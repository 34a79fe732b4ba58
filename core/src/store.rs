//! In-memory complaint repository.
//!
//! RULE: Only the store owns the complaint collection. The lifecycle
//! manager calls store methods — nothing reaches into ambient state.
//! Single writer: callers serialize mutation externally.

use crate::complaint::{Complaint, Status};
use crate::types::ComplaintId;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ComplaintStore {
    complaints: HashMap<ComplaintId, Complaint>,
}

impl ComplaintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Complaint> {
        self.complaints.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Complaint> {
        self.complaints.get_mut(id)
    }

    /// Insert or replace a record, keyed by id.
    pub fn upsert(&mut self, complaint: Complaint) {
        self.complaints.insert(complaint.id.clone(), complaint);
    }

    /// All complaints, oldest submission first.
    pub fn list(&self) -> Vec<&Complaint> {
        let mut all: Vec<&Complaint> = self.complaints.values().collect();
        all.sort_by_key(|c| c.submitted_at);
        all
    }

    /// Ids of complaints still subject to escalation (status != resolved),
    /// oldest submission first.
    pub fn open_ids(&self) -> Vec<ComplaintId> {
        let mut open: Vec<&Complaint> = self
            .complaints
            .values()
            .filter(|c| c.status != Status::Resolved)
            .collect();
        open.sort_by_key(|c| c.submitted_at);
        open.into_iter().map(|c| c.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.complaints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complaints.is_empty()
    }
}
