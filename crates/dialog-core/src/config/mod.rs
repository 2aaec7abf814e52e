//! Configuration for the dialog user agent
//!
//! A [`DialogUserAgentConfig`] carries the few knobs this layer needs: the
//! default Contact attached to outbound requests and responses, the optional
//! From identity for outbound calls, the NAT policy flag, and an optional
//! User-Agent product token.

use serde::{Deserialize, Serialize};

use sipua_sip_core::{Address, Contact};

/// Configuration consumed by [`DialogUserAgent`](crate::ua::DialogUserAgent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogUserAgentConfig {
    /// Default Contact header attached to outbound initiating requests that
    /// carry none, and to responses built by server sessions. Within a
    /// dialog a Contact is required, so this has no "unset" state.
    pub contact: Contact,

    /// From identity for outbound calls built by
    /// [`invite`](crate::ua::DialogUserAgent::invite). Falls back to the
    /// contact address when unset.
    pub identity: Option<Address>,

    /// Send subsequent requests to the observed transport source of the far
    /// end's messages instead of its advertised Contact. Turn this on when
    /// the far end sits behind NAT and its Contact is not routable.
    pub rewrite_contact: bool,

    /// Product token stamped into a User-Agent header on generated
    /// messages, when set.
    pub user_agent: Option<String>,
}

impl DialogUserAgentConfig {
    /// Create a configuration with the given Contact and defaults otherwise.
    pub fn new(contact: Contact) -> Self {
        Self {
            contact,
            identity: None,
            rewrite_contact: false,
            user_agent: None,
        }
    }

    /// Set the From identity for outbound calls.
    pub fn with_identity(mut self, identity: Address) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Enable the NAT policy: target observed source addresses instead of
    /// advertised Contacts.
    pub fn with_rewrite_contact(mut self) -> Self {
        self.rewrite_contact = true;
        self
    }

    /// Set the User-Agent product token.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.contact.uri().host.is_empty() {
            return Err("Contact host must not be empty".to_string());
        }
        if let Some(user_agent) = &self.user_agent {
            if user_agent.is_empty() {
                return Err("User-Agent token must not be empty".to_string());
            }
        }
        Ok(())
    }
}
