//! SIP response status codes
//!
//! Implementation of the SIP status codes defined in
//! [RFC 3261 Section 21](https://datatracker.ietf.org/doc/html/rfc3261#section-21).
//! Only the codes the stack actually produces or branches on get named
//! variants; everything else travels through `Other`.

use std::fmt;
use serde::{Serialize, Deserialize};

/// A SIP response status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCode {
    /// 100 Trying
    Trying,
    /// 180 Ringing
    Ringing,
    /// 183 Session Progress
    SessionProgress,
    /// 200 OK
    Ok,
    /// 202 Accepted
    Accepted,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 408 Request Timeout
    RequestTimeout,
    /// 486 Busy Here
    BusyHere,
    /// 487 Request Terminated
    RequestTerminated,
    /// 500 Server Internal Error
    ServerInternalError,
    /// 603 Decline
    Decline,
    /// Any other status code
    Other(u16),
}

impl StatusCode {
    /// Numeric value of this status code.
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::Trying => 100,
            StatusCode::Ringing => 180,
            StatusCode::SessionProgress => 183,
            StatusCode::Ok => 200,
            StatusCode::Accepted => 202,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::RequestTimeout => 408,
            StatusCode::BusyHere => 486,
            StatusCode::RequestTerminated => 487,
            StatusCode::ServerInternalError => 500,
            StatusCode::Decline => 603,
            StatusCode::Other(code) => *code,
        }
    }

    /// Default reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self.code() {
            100 => "Trying",
            180 => "Ringing",
            183 => "Session Progress",
            200 => "OK",
            202 => "Accepted",
            400 => "Bad Request",
            404 => "Not Found",
            408 => "Request Timeout",
            486 => "Busy Here",
            487 => "Request Terminated",
            500 => "Server Internal Error",
            603 => "Decline",
            _ => "Unknown",
        }
    }

    /// True for 1xx responses.
    pub fn is_provisional(&self) -> bool {
        (100..200).contains(&self.code())
    }

    /// True for 2xx responses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code())
    }

    /// True for any non-provisional response.
    pub fn is_final(&self) -> bool {
        self.code() >= 200
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        match code {
            100 => StatusCode::Trying,
            180 => StatusCode::Ringing,
            183 => StatusCode::SessionProgress,
            200 => StatusCode::Ok,
            202 => StatusCode::Accepted,
            400 => StatusCode::BadRequest,
            404 => StatusCode::NotFound,
            408 => StatusCode::RequestTimeout,
            486 => StatusCode::BusyHere,
            487 => StatusCode::RequestTerminated,
            500 => StatusCode::ServerInternalError,
            603 => StatusCode::Decline,
            other => StatusCode::Other(other),
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason_phrase())
    }
}
