//! SIP request methods
//!
//! Implementation of the SIP method token as defined in
//! [RFC 3261 Section 7.1](https://datatracker.ietf.org/doc/html/rfc3261#section-7.1).

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// A SIP request method.
///
/// The common methods get their own variants; anything else is carried
/// verbatim in `Extension` so unknown tokens survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    /// INVITE - initiate a session
    Invite,
    /// ACK - acknowledge a final INVITE response
    Ack,
    /// BYE - terminate a session
    Bye,
    /// CANCEL - cancel a pending request
    Cancel,
    /// OPTIONS - query capabilities
    Options,
    /// REGISTER - register contact information
    Register,
    /// INFO - mid-session information
    Info,
    /// UPDATE - modify session state
    Update,
    /// MESSAGE - instant message
    Message,
    /// NOTIFY - event notification
    Notify,
    /// REFER - transfer request
    Refer,
    /// SUBSCRIBE - subscribe to event notification
    Subscribe,
    /// Any other method token
    Extension(String),
}

impl Method {
    /// Canonical (upper-case) token for this method.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Invite => "INVITE",
            Method::Ack => "ACK",
            Method::Bye => "BYE",
            Method::Cancel => "CANCEL",
            Method::Options => "OPTIONS",
            Method::Register => "REGISTER",
            Method::Info => "INFO",
            Method::Update => "UPDATE",
            Method::Message => "MESSAGE",
            Method::Notify => "NOTIFY",
            Method::Refer => "REFER",
            Method::Subscribe => "SUBSCRIBE",
            Method::Extension(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Method {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "INVITE" => Method::Invite,
            "ACK" => Method::Ack,
            "BYE" => Method::Bye,
            "CANCEL" => Method::Cancel,
            "OPTIONS" => Method::Options,
            "REGISTER" => Method::Register,
            "INFO" => Method::Info,
            "UPDATE" => Method::Update,
            "MESSAGE" => Method::Message,
            "NOTIFY" => Method::Notify,
            "REFER" => Method::Refer,
            "SUBSCRIBE" => Method::Subscribe,
            other => Method::Extension(other.to_string()),
        })
    }
}
