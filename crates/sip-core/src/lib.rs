//! # SIPUA SIP-Core
//!
//! Typed SIP message model for the sipua stack.
//!
//! This crate provides the in-memory representation of SIP requests and
//! responses that the higher layers (notably `sipua-dialog-core`) operate on:
//! methods, status codes, URIs, the dialog-identifying headers (Call-ID,
//! From/To with their tags, CSeq) and the Contact return address.
//!
//! ## Architecture Position
//!
//! ```text
//! dialog-core (Dialog management)
//!      ↓
//! sip-core (Message model)  ← THIS CRATE
//! ```
//!
//! Wire parsing and serialization are deliberately not part of this crate;
//! messages arrive here already parsed by a transport/parser layer. The only
//! text conversions provided are `Display`/`FromStr` conveniences for URIs
//! and methods, which tests and examples rely on.
//!
//! ## Example
//!
//! ```rust
//! use sipua_sip_core::{Request, Method, Uri, Address, CSeq};
//!
//! let target: Uri = "sip:bob@example.com".parse().unwrap();
//! let invite = Request::new(Method::Invite, target.clone())
//!     .with_from(Address::new("sip:alice@example.com".parse().unwrap()).with_tag("a-tag"))
//!     .with_to(Address::new(target))
//!     .with_call_id("f81d4fae-7dec-11d0-a765-00a0c91e6bf6")
//!     .with_cseq(CSeq::new(1, Method::Invite));
//!
//! assert_eq!(invite.from_tag(), Some("a-tag"));
//! assert_eq!(invite.to_tag(), None);
//! ```

pub mod types;

// Re-export the main types at the crate root
pub use types::address::Address;
pub use types::contact::Contact;
pub use types::cseq::CSeq;
pub use types::header::Header;
pub use types::method::Method;
pub use types::sip_request::Request;
pub use types::sip_response::Response;
pub use types::status::StatusCode;
pub use types::uri::{Scheme, Uri, UriError};

/// Commonly used imports for working with SIP messages.
pub mod prelude {
    pub use crate::types::address::Address;
    pub use crate::types::contact::Contact;
    pub use crate::types::cseq::CSeq;
    pub use crate::types::header::Header;
    pub use crate::types::method::Method;
    pub use crate::types::sip_request::Request;
    pub use crate::types::sip_response::Response;
    pub use crate::types::status::StatusCode;
    pub use crate::types::uri::{Scheme, Uri};
}
