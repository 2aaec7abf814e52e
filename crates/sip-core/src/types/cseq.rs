//! CSeq header
//!
//! Sequence number + method pair from
//! [RFC 3261 Section 8.1.1.5](https://datatracker.ietf.org/doc/html/rfc3261#section-8.1.1.5),
//! ordering requests within a dialog and distinguishing new requests from
//! retransmissions.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::method::Method;

/// The CSeq header field value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CSeq {
    /// Sequence number
    pub seq: u32,
    /// Method of the request this CSeq belongs to
    pub method: Method,
}

impl CSeq {
    /// Create a new CSeq value.
    pub fn new(seq: u32, method: Method) -> Self {
        Self { seq, method }
    }

    /// The sequence number.
    pub fn sequence(&self) -> u32 {
        self.seq
    }
}

impl fmt::Display for CSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.seq, self.method)
    }
}
