//! SIP request messages
//!
//! The already-parsed request object the dialog layer operates on. Fields
//! are public in the same spirit as the rest of the message model; typed
//! accessors exist for the headers that participate in dialog
//! identification, so callers read `request.from_tag()` instead of digging
//! through header lists.

use std::net::SocketAddr;
use bytes::Bytes;
use serde::{Serialize, Deserialize};

use super::address::Address;
use super::contact::Contact;
use super::cseq::CSeq;
use super::header::Header;
use super::method::Method;
use super::uri::Uri;

/// A SIP request.
///
/// # Examples
///
/// ```rust
/// use sipua_sip_core::{Request, Method, Uri, Address, CSeq};
///
/// let request = Request::new(Method::Invite, Uri::sip("bob", "example.com"))
///     .with_from(Address::new(Uri::sip("alice", "example.com")).with_tag("abc"))
///     .with_to(Address::new(Uri::sip("bob", "example.com")))
///     .with_call_id("call-1")
///     .with_cseq(CSeq::new(1, Method::Invite));
///
/// assert_eq!(request.call_id(), Some("call-1"));
/// assert_eq!(request.cseq().unwrap().seq, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Request method
    pub method: Method,
    /// Request-URI
    pub uri: Uri,
    /// From header (originator of the request)
    pub from: Option<Address>,
    /// To header (logical recipient)
    pub to: Option<Address>,
    /// Call-ID header
    pub call_id: Option<String>,
    /// CSeq header
    pub cseq: Option<CSeq>,
    /// Contact header (return address)
    pub contact: Option<Contact>,
    /// Uninterpreted extension headers, in order
    pub headers: Vec<Header>,
    /// Message body
    pub body: Bytes,
    /// Source address the message was received from, set by the transport
    /// on inbound messages; `None` for locally built requests.
    pub source: Option<SocketAddr>,
}

impl Request {
    /// Create a request with the given method and Request-URI and no headers.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            from: None,
            to: None,
            call_id: None,
            cseq: None,
            contact: None,
            headers: Vec::new(),
            body: Bytes::new(),
            source: None,
        }
    }

    // -- typed accessors ---------------------------------------------------

    /// The From header, if present.
    pub fn from(&self) -> Option<&Address> {
        self.from.as_ref()
    }

    /// Mutable access to the From header.
    pub fn from_mut(&mut self) -> Option<&mut Address> {
        self.from.as_mut()
    }

    /// The tag carried by the From header, if any.
    pub fn from_tag(&self) -> Option<&str> {
        self.from.as_ref().and_then(|a| a.tag())
    }

    /// The To header, if present.
    pub fn to(&self) -> Option<&Address> {
        self.to.as_ref()
    }

    /// Mutable access to the To header.
    pub fn to_mut(&mut self) -> Option<&mut Address> {
        self.to.as_mut()
    }

    /// The tag carried by the To header, if any.
    pub fn to_tag(&self) -> Option<&str> {
        self.to.as_ref().and_then(|a| a.tag())
    }

    /// The Call-ID header, if present.
    pub fn call_id(&self) -> Option<&str> {
        self.call_id.as_deref()
    }

    /// The CSeq header, if present.
    pub fn cseq(&self) -> Option<&CSeq> {
        self.cseq.as_ref()
    }

    /// The Contact header, if present.
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    // -- builders ----------------------------------------------------------

    /// Set the From header.
    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the To header.
    pub fn with_to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    /// Set the Call-ID header.
    pub fn with_call_id(mut self, call_id: impl Into<String>) -> Self {
        self.call_id = Some(call_id.into());
        self
    }

    /// Set the CSeq header.
    pub fn with_cseq(mut self, cseq: CSeq) -> Self {
        self.cseq = Some(cseq);
        self
    }

    /// Set the Contact header.
    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Append an extension header.
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    /// Set the message body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Record the transport-level source address of an inbound message.
    pub fn with_source(mut self, source: SocketAddr) -> Self {
        self.source = Some(source);
        self
    }
}
