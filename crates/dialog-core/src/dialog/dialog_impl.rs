//! Dialog implementation
//!
//! This module contains the main [`Dialog`] struct: the stateful entity
//! behind a server or client session. A dialog owns the anchor messages of
//! the exchange, the local sequence counter for subsequent requests, and the
//! lifecycle state.
//!
//! Two execution contexts race over a dialog: caller code driving the
//! session, and transaction callbacks (response processing, termination
//! notification). State lives behind a mutex and the sequence counter is
//! atomic; neither lock is ever held across an await.

use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use tracing::debug;

use bytes::Bytes;
use sipua_sip_core::{Address, CSeq, Header, Method, Request, Response, Uri};

use super::dialog_id::DialogId;
use super::dialog_state::DialogState;
use crate::errors::{DialogError, DialogResult};

/// A SIP dialog as defined in RFC 3261.
///
/// Constructed by the [`DialogUserAgent`](crate::ua::DialogUserAgent)
/// factory and owned by exactly one role session
/// ([`DialogServerSession`](crate::api::DialogServerSession) or
/// [`DialogClientSession`](crate::api::DialogClientSession)) for its
/// lifetime.
#[derive(Debug)]
pub struct Dialog {
    /// Identifier pinned by rehydration, if any; otherwise derived from the
    /// tags once both are known
    pinned_id: Option<DialogId>,

    /// Call-ID shared by every message of the exchange
    call_id: String,

    /// This side's party address (From for the initiator, To for the
    /// recipient), tag managed separately
    local_address: Address,

    /// The far side's party address
    remote_address: Address,

    /// Tag this side contributed; injected before any response is built and
    /// never regenerated
    local_tag: Option<String>,

    /// Tag the far side contributed; for the initiator this is learned from
    /// the first tagged response
    remote_tag: Mutex<Option<String>>,

    /// Where subsequent requests are addressed (the far end's Contact)
    remote_target: Mutex<Uri>,

    /// Observed transport source of the last inbound message, used when the
    /// user agent is configured to bypass the advertised Contact
    remote_source: Mutex<Option<SocketAddr>>,

    /// Sequence number of the most recent locally generated request
    local_seq: AtomicU32,

    /// Lifecycle state, raced by the owning session and the termination
    /// watcher
    state: Mutex<DialogState>,

    /// Whether this dialog was created by the local UA (true) or by the
    /// remote UA (false)
    is_initiator: bool,

    /// The initiating request; set once, never mutated afterwards
    invite_request: Request,

    /// The response that concluded the initiating exchange; set once
    invite_response: Mutex<Option<Response>>,

    /// When this dialog was constructed
    created_at: DateTime<Utc>,
}

impl Dialog {
    /// Create a recipient-side dialog from an inbound initiating request.
    ///
    /// The request must already carry the injected local (To) tag; the
    /// factory validates headers and injects the tag before calling this.
    pub(crate) fn new_server(invite_request: Request) -> DialogResult<Self> {
        let remote_target = invite_request
            .contact()
            .map(|c| c.uri().clone())
            .ok_or(DialogError::MissingContact)?;
        Self::new_server_with_target(invite_request, remote_target)
    }

    /// Recipient-side construction with an explicit remote target, for
    /// rehydrated anchors that no longer carry a Contact.
    fn new_server_with_target(invite_request: Request, remote_target: Uri) -> DialogResult<Self> {
        let call_id = invite_request
            .call_id()
            .ok_or_else(|| DialogError::missing_header("Call-ID"))?
            .to_string();
        let local_address = invite_request
            .to()
            .cloned()
            .ok_or_else(|| DialogError::missing_header("To"))?;
        let remote_address = invite_request
            .from()
            .cloned()
            .ok_or_else(|| DialogError::missing_header("From"))?;

        Ok(Self {
            pinned_id: None,
            call_id,
            local_tag: local_address.tag().map(str::to_string),
            remote_tag: Mutex::new(remote_address.tag().map(str::to_string)),
            local_address,
            remote_address,
            remote_target: Mutex::new(remote_target),
            remote_source: Mutex::new(invite_request.source),
            local_seq: AtomicU32::new(0),
            state: Mutex::new(DialogState::Initial),
            is_initiator: false,
            invite_request,
            invite_response: Mutex::new(None),
            created_at: Utc::now(),
        })
    }

    /// Create an initiator-side dialog from an outbound initiating request.
    ///
    /// The remote tag is unknown until the first tagged response arrives;
    /// until then the dialog has no complete identifier.
    pub(crate) fn new_client(invite_request: Request) -> DialogResult<Self> {
        let call_id = invite_request
            .call_id()
            .ok_or_else(|| DialogError::missing_header("Call-ID"))?
            .to_string();
        let cseq = invite_request
            .cseq()
            .ok_or_else(|| DialogError::missing_header("CSeq"))?
            .seq;
        let local_address = invite_request
            .from()
            .cloned()
            .ok_or_else(|| DialogError::missing_header("From"))?;
        let remote_address = invite_request
            .to()
            .cloned()
            .ok_or_else(|| DialogError::missing_header("To"))?;

        Ok(Self {
            pinned_id: None,
            call_id,
            local_tag: local_address.tag().map(str::to_string),
            remote_tag: Mutex::new(None),
            local_address,
            remote_address,
            remote_target: Mutex::new(invite_request.uri.clone()),
            remote_source: Mutex::new(None),
            local_seq: AtomicU32::new(cseq),
            state: Mutex::new(DialogState::Initial),
            is_initiator: true,
            invite_request,
            invite_response: Mutex::new(None),
            created_at: Utc::now(),
        })
    }

    /// Rebuild a dialog from persisted session parameters, pinned to the
    /// supplied state, sequence number and (optionally) identifier.
    pub(crate) fn from_parts(
        invite_request: Request,
        invite_response: Option<Response>,
        state: DialogState,
        cseq: u32,
        pinned_id: Option<DialogId>,
        is_initiator: bool,
    ) -> DialogResult<Self> {
        let mut dialog = if is_initiator {
            Self::new_client(invite_request)?
        } else {
            // Persisted recipient anchors may legitimately lack a Contact;
            // fall back to the far party's own address as the target.
            let remote_target = invite_request
                .contact()
                .map(|c| c.uri().clone())
                .or_else(|| invite_request.from().map(|a| a.uri().clone()))
                .ok_or_else(|| DialogError::missing_header("From"))?;
            Self::new_server_with_target(invite_request, remote_target)?
        };

        if is_initiator && dialog.remote_tag.get_mut().unwrap().is_none() {
            // A persisted initiator anchor may already carry the far tag
            let anchor_tag = dialog.invite_request.to_tag().map(str::to_string);
            *dialog.remote_tag.get_mut().unwrap() = anchor_tag;
        }

        if let Some(response) = invite_response {
            if is_initiator {
                if let Some(tag) = response.to_tag() {
                    *dialog.remote_tag.get_mut().unwrap() = Some(tag.to_string());
                }
                if let Some(contact) = response.contact() {
                    *dialog.remote_target.get_mut().unwrap() = contact.uri().clone();
                }
            }
            *dialog.invite_response.get_mut().unwrap() = Some(response);
        }

        dialog.pinned_id = pinned_id;
        *dialog.state.get_mut().unwrap() = state;
        *dialog.local_seq.get_mut() = cseq;
        Ok(dialog)
    }

    // -- identity ----------------------------------------------------------

    /// The dialog identifier.
    ///
    /// `None` while the far side's tag is still unknown (an initiator-side
    /// dialog before the first tagged response) and no identifier was pinned
    /// by rehydration.
    pub fn id(&self) -> Option<DialogId> {
        if let Some(id) = &self.pinned_id {
            return Some(id.clone());
        }
        let local_tag = self.local_tag.clone()?;
        let remote_tag = self.remote_tag.lock().unwrap().clone()?;
        Some(DialogId::new(self.call_id.clone(), local_tag, remote_tag))
    }

    /// The Call-ID of the exchange.
    pub fn call_id(&self) -> &str {
        &self.call_id
    }

    /// The tag this side contributed, if known.
    pub fn local_tag(&self) -> Option<&str> {
        self.local_tag.as_deref()
    }

    /// The tag the far side contributed, if known yet.
    pub fn remote_tag(&self) -> Option<String> {
        self.remote_tag.lock().unwrap().clone()
    }

    /// Record the far side's tag, observed on a response.
    pub(crate) fn set_remote_tag(&self, tag: impl Into<String>) {
        let tag = tag.into();
        debug!(call_id = %self.call_id, tag = %tag, "learned remote tag");
        *self.remote_tag.lock().unwrap() = Some(tag);
    }

    /// Whether this dialog was initiated locally.
    pub fn is_initiator(&self) -> bool {
        self.is_initiator
    }

    /// When this dialog was constructed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -- anchors -----------------------------------------------------------

    /// The initiating request of the exchange.
    pub fn invite_request(&self) -> &Request {
        &self.invite_request
    }

    /// The response that concluded the initiating exchange, if one has been
    /// observed.
    pub fn invite_response(&self) -> Option<Response> {
        self.invite_response.lock().unwrap().clone()
    }

    /// Record the concluding response. First write wins; the anchor is never
    /// replaced afterwards.
    pub(crate) fn set_invite_response(&self, response: Response) {
        let mut anchor = self.invite_response.lock().unwrap();
        if anchor.is_none() {
            *anchor = Some(response);
        }
    }

    // -- routing -----------------------------------------------------------

    /// Where subsequent requests are currently addressed.
    pub fn remote_target(&self) -> Uri {
        self.remote_target.lock().unwrap().clone()
    }

    /// Update the remote target from a Contact observed on the far end's
    /// message.
    pub(crate) fn set_remote_target(&self, uri: Uri) {
        *self.remote_target.lock().unwrap() = uri;
    }

    /// Transport source of the last inbound message, if observed.
    pub fn remote_source(&self) -> Option<SocketAddr> {
        *self.remote_source.lock().unwrap()
    }

    /// Record the transport source of an inbound message.
    pub(crate) fn record_remote_source(&self, source: SocketAddr) {
        *self.remote_source.lock().unwrap() = Some(source);
    }

    // -- lifecycle ---------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> DialogState {
        *self.state.lock().unwrap()
    }

    /// Attempt a state transition.
    ///
    /// A transition is applied only if it advances the dialog: `Terminated`
    /// is terminal, repeated termination signals are no-ops, and a
    /// late-arriving transition to an earlier state never overwrites
    /// progress already made. Returns whether the transition was applied.
    pub fn transition(&self, new_state: DialogState) -> bool {
        let mut state = self.state.lock().unwrap();
        let current = *state;
        if current == DialogState::Terminated {
            debug!(call_id = %self.call_id, target = %new_state, "dialog already terminated, ignoring transition");
            return false;
        }
        if new_state <= current {
            debug!(call_id = %self.call_id, current = %current, target = %new_state, "ignoring regressive transition");
            return false;
        }
        debug!(call_id = %self.call_id, from = %current, to = %new_state, "transitioning state");
        *state = new_state;
        true
    }

    /// Force the dialog to its terminal state. Idempotent.
    pub fn terminate(&self) -> bool {
        self.transition(DialogState::Terminated)
    }

    // -- sequencing and request construction -------------------------------

    /// Sequence number of the most recent locally generated request.
    pub fn local_seq(&self) -> u32 {
        self.local_seq.load(Ordering::SeqCst)
    }

    /// Build the next in-dialog request.
    ///
    /// Atomically claims the next sequence number and stamps it, together
    /// with the Call-ID and both dialog tags, onto a request addressed at
    /// the current remote target. Concurrent calls each get a distinct,
    /// strictly increasing sequence number. (ACK and CANCEL, which echo the
    /// INVITE's number, are handled by the transaction layer and never come
    /// through here.)
    pub fn make_request(
        &self,
        method: Method,
        body: Option<Bytes>,
        headers: Vec<Header>,
    ) -> Request {
        let seq = self.local_seq.fetch_add(1, Ordering::SeqCst) + 1;

        let mut from = self.local_address.clone();
        if let Some(tag) = &self.local_tag {
            from.set_tag(tag.clone());
        }
        let mut to = self.remote_address.clone();
        if let Some(tag) = self.remote_tag.lock().unwrap().clone() {
            to.set_tag(tag);
        }

        let mut request = Request::new(method.clone(), self.remote_target())
            .with_from(from)
            .with_to(to)
            .with_call_id(self.call_id.clone())
            .with_cseq(CSeq::new(seq, method));
        request.headers = headers;
        if let Some(body) = body {
            request = request.with_body(body);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_invite() -> Request {
        Request::new(Method::Invite, Uri::sip("bob", "example.com"))
            .with_from(Address::new(Uri::sip("alice", "example.com")).with_tag("alice-tag"))
            .with_to(Address::new(Uri::sip("bob", "example.com")).with_tag("bob-tag"))
            .with_call_id("call-7")
            .with_cseq(CSeq::new(314, Method::Invite))
            .with_contact(Uri::sip("alice", "198.51.100.7").into())
    }

    #[test]
    fn test_server_dialog_identity() {
        let dialog = Dialog::new_server(server_invite()).unwrap();

        assert!(!dialog.is_initiator());
        assert_eq!(dialog.call_id(), "call-7");
        assert_eq!(dialog.local_tag(), Some("bob-tag"));
        assert_eq!(dialog.remote_tag().as_deref(), Some("alice-tag"));
        assert_eq!(
            dialog.id(),
            Some(DialogId::new("call-7", "bob-tag", "alice-tag"))
        );
    }

    #[test]
    fn test_client_id_incomplete_until_remote_tag() {
        let mut invite = server_invite();
        invite.to_mut().unwrap().clear_tag();
        let dialog = Dialog::new_client(invite).unwrap();

        assert!(dialog.is_initiator());
        assert!(dialog.id().is_none());

        dialog.set_remote_tag("bob-tag");
        assert_eq!(
            dialog.id(),
            Some(DialogId::new("call-7", "alice-tag", "bob-tag"))
        );
    }

    #[test]
    fn test_make_request_stamps_sequence_and_tags() {
        let dialog = Dialog::new_server(server_invite()).unwrap();

        let first = dialog.make_request(Method::Info, None, Vec::new());
        let second = dialog.make_request(Method::Bye, None, Vec::new());

        assert_eq!(first.cseq().unwrap().seq, 1);
        assert_eq!(second.cseq().unwrap().seq, 2);
        assert_eq!(dialog.local_seq(), 2);

        assert_eq!(first.call_id(), Some("call-7"));
        assert_eq!(first.from_tag(), Some("bob-tag"));
        assert_eq!(first.to_tag(), Some("alice-tag"));
        assert_eq!(first.uri.host, "198.51.100.7");
    }

    #[test]
    fn test_transition_rules() {
        let dialog = Dialog::new_server(server_invite()).unwrap();
        assert_eq!(dialog.state(), DialogState::Initial);

        assert!(dialog.transition(DialogState::Early));
        assert!(dialog.transition(DialogState::Confirmed));
        assert!(!dialog.transition(DialogState::Early));
        assert_eq!(dialog.state(), DialogState::Confirmed);

        assert!(dialog.terminate());
        assert!(!dialog.terminate());
        assert!(!dialog.transition(DialogState::Confirmed));
        assert_eq!(dialog.state(), DialogState::Terminated);
    }

    #[test]
    fn test_invite_response_anchor_set_once() {
        let dialog = Dialog::new_server(server_invite()).unwrap();
        assert!(dialog.invite_response().is_none());

        let ok = Response::from_request(dialog.invite_request(), sipua_sip_core::StatusCode::Ok);
        let busy =
            Response::from_request(dialog.invite_request(), sipua_sip_core::StatusCode::BusyHere);

        dialog.set_invite_response(ok.clone());
        dialog.set_invite_response(busy);
        assert_eq!(dialog.invite_response().unwrap().status, ok.status);
    }
}
