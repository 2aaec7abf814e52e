//! Name-addr values for From/To headers
//!
//! The From and To header fields share a single grammar: an optional display
//! name, a URI, and parameters, of which only the `tag` parameter matters to
//! dialog identification ([RFC 3261 Section
//! 8.1.1.3](https://datatracker.ietf.org/doc/html/rfc3261#section-8.1.1.3)).
//! `Address` models exactly that triple.

use std::fmt;
use serde::{Serialize, Deserialize};

use super::uri::Uri;

/// A display name + URI + optional tag, as carried by From and To headers.
///
/// # Examples
///
/// ```rust
/// use sipua_sip_core::{Address, Uri};
///
/// let mut address = Address::new_with_display_name("Bob", Uri::sip("bob", "biloxi.com"));
/// assert_eq!(address.tag(), None);
///
/// address.set_tag("a6c85cf");
/// assert_eq!(address.tag(), Some("a6c85cf"));
/// assert_eq!(address.to_string(), "\"Bob\" <sip:bob@biloxi.com>;tag=a6c85cf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Optional display name
    pub display_name: Option<String>,
    /// The address URI
    pub uri: Uri,
    /// The dialog tag parameter, if present
    tag: Option<String>,
}

impl Address {
    /// Create an address from a URI, with no display name and no tag.
    pub fn new(uri: Uri) -> Self {
        Self {
            display_name: None,
            uri,
            tag: None,
        }
    }

    /// Create an address with a display name.
    pub fn new_with_display_name(display_name: impl Into<String>, uri: Uri) -> Self {
        Self {
            display_name: Some(display_name.into()),
            uri,
            tag: None,
        }
    }

    /// The tag parameter, if one has been set.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Set the tag parameter, replacing any previous value.
    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    /// Builder-style variant of [`set_tag`](Self::set_tag).
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Remove the tag parameter.
    pub fn clear_tag(&mut self) {
        self.tag = None;
    }

    /// The address URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "\"{}\" <{}>", name, self.uri)?,
            None => write!(f, "<{}>", self.uri)?,
        }
        if let Some(tag) = &self.tag {
            write!(f, ";tag={}", tag)?;
        }
        Ok(())
    }
}

impl From<Uri> for Address {
    fn from(uri: Uri) -> Self {
        Address::new(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display() {
        let plain = Address::new(Uri::sip("alice", "example.com"));
        assert_eq!(plain.to_string(), "<sip:alice@example.com>");

        let tagged = plain.with_tag("1928301774");
        assert_eq!(tagged.to_string(), "<sip:alice@example.com>;tag=1928301774");
    }

    #[test]
    fn test_set_tag_replaces() {
        let mut address = Address::new(Uri::sip("alice", "example.com")).with_tag("one");
        address.set_tag("two");
        assert_eq!(address.tag(), Some("two"));
    }
}
