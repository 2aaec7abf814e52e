//! SIP response messages
//!
//! Mirror of [`Request`](super::sip_request::Request) for the response side,
//! plus [`Response::from_request`], which seeds a response with the identity
//! headers a reply must echo (RFC 3261 Section 8.2.6.2): From, To, Call-ID
//! and CSeq are copied from the request; Contact and body are the
//! responder's to fill in.

use std::net::SocketAddr;
use bytes::Bytes;
use serde::{Serialize, Deserialize};

use super::address::Address;
use super::contact::Contact;
use super::cseq::CSeq;
use super::header::Header;
use super::sip_request::Request;
use super::status::StatusCode;

/// A SIP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Response status code
    pub status: StatusCode,
    /// From header, echoed from the request
    pub from: Option<Address>,
    /// To header, echoed from the request (possibly with a tag added)
    pub to: Option<Address>,
    /// Call-ID header, echoed from the request
    pub call_id: Option<String>,
    /// CSeq header, echoed from the request
    pub cseq: Option<CSeq>,
    /// Contact header of the responder
    pub contact: Option<Contact>,
    /// Uninterpreted extension headers, in order
    pub headers: Vec<Header>,
    /// Message body
    pub body: Bytes,
    /// Source address the message was received from, set by the transport
    /// on inbound messages.
    pub source: Option<SocketAddr>,
}

impl Response {
    /// Create a bare response with the given status and no headers.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
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

    /// Create a response to `request`, echoing its identity headers.
    ///
    /// The To header is copied as-is, tag included if the request carried
    /// one; responders that need to add a tag do so afterwards through
    /// [`to_mut`](Self::to_mut).
    pub fn from_request(request: &Request, status: StatusCode) -> Self {
        Self {
            status,
            from: request.from.clone(),
            to: request.to.clone(),
            call_id: request.call_id.clone(),
            cseq: request.cseq.clone(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::method::Method;
    use super::super::uri::Uri;

    #[test]
    fn test_from_request_echoes_identity_headers() {
        let request = Request::new(Method::Invite, Uri::sip("bob", "example.com"))
            .with_from(Address::new(Uri::sip("alice", "example.com")).with_tag("ft"))
            .with_to(Address::new(Uri::sip("bob", "example.com")))
            .with_call_id("call-1")
            .with_cseq(CSeq::new(7, Method::Invite));

        let response = Response::from_request(&request, StatusCode::Ringing);
        assert_eq!(response.status, StatusCode::Ringing);
        assert_eq!(response.from_tag(), Some("ft"));
        assert_eq!(response.to_tag(), None);
        assert_eq!(response.call_id(), Some("call-1"));
        assert_eq!(response.cseq().unwrap().seq, 7);
        assert!(response.contact().is_none());
    }

    #[test]
    fn test_to_tag_added_after_construction() {
        let request = Request::new(Method::Invite, Uri::sip("bob", "example.com"))
            .with_to(Address::new(Uri::sip("bob", "example.com")));

        let mut response = Response::from_request(&request, StatusCode::Ok);
        response.to_mut().unwrap().set_tag("srv-tag");
        assert_eq!(response.to_tag(), Some("srv-tag"));
    }
}
