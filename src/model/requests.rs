//! Request sequencing for collaborator round trips
//!
//! Every outgoing request gets a sequence number from one monotonic
//! counter. Responses carry it back so late answers can be told apart:
//!
//! - [`RequestTracker::accept_latest`]: only the most recently issued request
//!   for a target may apply (workflow attempts, file loads)
//! - [`RequestTracker::accept_newer`]: any response newer than the last one
//!   applied may apply (listings, acknowledgements)

use std::collections::HashMap;
use std::fmt;

/// Sequence number attached to a request and echoed by its response
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestSeq(pub u64);

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The model field a response writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestTarget {
    Tree,
    FileContent,
    Save,
    Create,
    Delete,
    Run,
    Miners,
    Deploy,
    Call,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    next: u64,
    issued: HashMap<RequestTarget, RequestSeq>,
    applied: HashMap<RequestTarget, RequestSeq>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the sequence number for a new request
    pub fn issue(&mut self, target: RequestTarget) -> RequestSeq {
        self.next += 1;
        let seq = RequestSeq(self.next);
        self.issued.insert(target, seq);
        seq
    }

    /// Most recent sequence issued for `target`
    pub fn latest(&self, target: RequestTarget) -> Option<RequestSeq> {
        self.issued.get(&target).copied()
    }

    /// Whether `seq` is the most recently issued request for `target`
    pub fn is_latest(&self, target: RequestTarget, seq: RequestSeq) -> bool {
        self.latest(target) == Some(seq)
    }

    /// Accept only the response to the most recent request
    pub fn accept_latest(&mut self, target: RequestTarget, seq: RequestSeq) -> bool {
        if !self.is_latest(target, seq) {
            tracing::debug!("Discarding superseded {:?} response {}", target, seq);
            return false;
        }
        self.applied.insert(target, seq);
        true
    }

    /// Accept any response newer than the last applied one
    pub fn accept_newer(&mut self, target: RequestTarget, seq: RequestSeq) -> bool {
        match self.applied.get(&target) {
            Some(last) if *last >= seq => {
                tracing::debug!(
                    "Discarding stale {:?} response {} (already applied {})",
                    target,
                    seq,
                    last
                );
                false
            }
            _ => {
                self.applied.insert(target, seq);
                true
            }
        }
    }
}
