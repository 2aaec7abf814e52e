//! Core SIP message types
//!
//! One module per type, following the shape of the protocol grammar: request
//! and response messages plus the typed headers the dialog layer needs
//! accessor/mutator access to.

pub mod address;
pub mod contact;
pub mod cseq;
pub mod header;
pub mod method;
pub mod sip_request;
pub mod sip_response;
pub mod status;
pub mod uri;

pub use address::Address;
pub use contact::Contact;
pub use cseq::CSeq;
pub use header::Header;
pub use method::Method;
pub use sip_request::Request;
pub use sip_response::Response;
pub use status::StatusCode;
pub use uri::{Scheme, Uri};
