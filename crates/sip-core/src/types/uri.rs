//! SIP URIs
//!
//! A deliberately small model of the SIP URI grammar from
//! [RFC 3261 Section 19.1](https://datatracker.ietf.org/doc/html/rfc3261#section-19.1):
//! scheme, optional user part, host and optional port. URI parameters and
//! headers are outside what the dialog layer needs and are not modeled.

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// URI scheme, `sip` or `sips`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    Sip,
    Sips,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Sip => write!(f, "sip"),
            Scheme::Sips => write!(f, "sips"),
        }
    }
}

/// Error produced when a URI string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid SIP URI '{input}': {reason}")]
pub struct UriError {
    /// The offending input
    pub input: String,
    /// What was wrong with it
    pub reason: String,
}

/// A SIP or SIPS URI.
///
/// # Examples
///
/// ```rust
/// use sipua_sip_core::Uri;
///
/// let uri: Uri = "sip:alice@example.com:5060".parse().unwrap();
/// assert_eq!(uri.user.as_deref(), Some("alice"));
/// assert_eq!(uri.host, "example.com");
/// assert_eq!(uri.port, Some(5060));
/// assert_eq!(uri.to_string(), "sip:alice@example.com:5060");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uri {
    pub scheme: Scheme,
    pub user: Option<String>,
    pub host: String,
    pub port: Option<u16>,
}

impl Uri {
    /// Create a `sip:` URI with a user part.
    pub fn sip(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: Scheme::Sip,
            user: Some(user.into()),
            host: host.into(),
            port: None,
        }
    }

    /// Create a `sip:` URI with only a host part.
    pub fn sip_host(host: impl Into<String>) -> Self {
        Self {
            scheme: Scheme::Sip,
            user: None,
            host: host.into(),
            port: None,
        }
    }

    /// Set the port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if let Some(user) = &self.user {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| UriError {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let (scheme, rest) = if let Some(rest) = s.strip_prefix("sips:") {
            (Scheme::Sips, rest)
        } else if let Some(rest) = s.strip_prefix("sip:") {
            (Scheme::Sip, rest)
        } else {
            return Err(err("missing sip: or sips: scheme"));
        };

        let (user, host_port) = match rest.split_once('@') {
            Some((user, host_port)) => {
                if user.is_empty() {
                    return Err(err("empty user part"));
                }
                (Some(user.to_string()), host_port)
            }
            None => (None, rest),
        };

        let (host, port) = match host_port.split_once(':') {
            Some((host, port)) => {
                let port: u16 = port.parse().map_err(|_| err("invalid port"))?;
                (host, Some(port))
            }
            None => (host_port, None),
        };

        if host.is_empty() {
            return Err(err("empty host"));
        }

        Ok(Uri {
            scheme,
            user,
            host: host.to_string(),
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_round_trip() {
        for input in ["sip:alice@example.com", "sips:bob@example.net:5061", "sip:example.org"] {
            let uri: Uri = input.parse().unwrap();
            assert_eq!(uri.to_string(), input);
        }
    }

    #[test]
    fn test_uri_rejects_garbage() {
        assert!("alice@example.com".parse::<Uri>().is_err());
        assert!("sip:@example.com".parse::<Uri>().is_err());
        assert!("sip:alice@".parse::<Uri>().is_err());
        assert!("sip:alice@example.com:notaport".parse::<Uri>().is_err());
    }
}
