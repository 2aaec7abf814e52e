//! Contact header
//!
//! The return address of
//! [RFC 3261 Section 8.1.1.8](https://datatracker.ietf.org/doc/html/rfc3261#section-8.1.1.8):
//! where subsequent requests for this dialog should be sent directly.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::address::Address;
use super::uri::Uri;

/// The Contact header field value.
///
/// Wraps a single [`Address`]; multi-contact REGISTER-style values are out of
/// scope for this stack.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact(pub Address);

impl Contact {
    /// Create a contact from an address.
    pub fn new(address: Address) -> Self {
        Self(address)
    }

    /// The contact address.
    pub fn address(&self) -> &Address {
        &self.0
    }

    /// The contact URI.
    pub fn uri(&self) -> &Uri {
        &self.0.uri
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uri> for Contact {
    fn from(uri: Uri) -> Self {
        Contact(Address::new(uri))
    }
}
