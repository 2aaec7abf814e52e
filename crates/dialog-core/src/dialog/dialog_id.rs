//! Dialog identifiers
//!
//! A dialog is identified by the Call-ID chosen by the originator together
//! with the tag each side contributed (RFC 3261 Section 12). Each side keys
//! its dialogs relative to itself: `call_id:local_tag:remote_tag`.
//!
//! The recipient of an initiating request can compute its identifier as soon
//! as it has injected its To tag; the originator's identifier is complete
//! only once the first tagged response arrives.

use std::fmt;
use serde::{Serialize, Deserialize};

use sipua_sip_core::{Request, Response};

use crate::errors::{DialogError, DialogResult};

/// Unique identifier of a dialog, relative to the local side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId {
    /// Call-ID shared by every message of the exchange
    pub call_id: String,
    /// Tag contributed by this side
    pub local_tag: String,
    /// Tag contributed by the far side
    pub remote_tag: String,
}

impl DialogId {
    /// Create a dialog identifier from its parts.
    pub fn new(
        call_id: impl Into<String>,
        local_tag: impl Into<String>,
        remote_tag: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            local_tag: local_tag.into(),
            remote_tag: remote_tag.into(),
        }
    }

    /// Derive the identifier of a recipient-side dialog from an inbound
    /// initiating request.
    ///
    /// The local tag must already have been injected into the To header:
    /// every response reuses it, so the identifier stays stable for the
    /// dialog's lifetime. Missing Call-ID or CSeq means the exchange cannot
    /// be correlated and is a hard error, as is a request without a From
    /// tag.
    pub fn from_server_request(request: &Request) -> DialogResult<Self> {
        let call_id = request
            .call_id()
            .ok_or_else(|| DialogError::missing_header("Call-ID"))?;
        if request.cseq().is_none() {
            return Err(DialogError::missing_header("CSeq"));
        }
        let local_tag = request
            .to_tag()
            .ok_or_else(|| DialogError::missing_tag("To"))?;
        let remote_tag = request
            .from_tag()
            .ok_or_else(|| DialogError::missing_tag("From"))?;

        Ok(Self::new(call_id, local_tag, remote_tag))
    }

    /// Derive the identifier of an originator-side dialog from a response
    /// carrying the far end's tag.
    pub fn from_client_response(response: &Response) -> DialogResult<Self> {
        let call_id = response
            .call_id()
            .ok_or_else(|| DialogError::missing_header("Call-ID"))?;
        let local_tag = response
            .from_tag()
            .ok_or_else(|| DialogError::missing_tag("From"))?;
        let remote_tag = response
            .to_tag()
            .ok_or_else(|| DialogError::missing_tag("To"))?;

        Ok(Self::new(call_id, local_tag, remote_tag))
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.call_id, self.local_tag, self.remote_tag)
    }
}
