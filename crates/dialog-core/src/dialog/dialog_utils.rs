//! Token generation for dialog tags and call identifiers
//!
//! Tags must be collision-resistant: two dialogs sharing a Call-ID are told
//! apart only by their tags. Generation is a pluggable capability injected
//! into the [`DialogUserAgent`](crate::ua::DialogUserAgent) rather than a
//! process-wide singleton, so deployments (and tests) can swap the source.

use uuid::Uuid;

/// Error produced by a failing token generator.
#[derive(Debug, Clone, thiserror::Error)]
#[error("token generation failed: {message}")]
pub struct TokenError {
    /// What went wrong
    pub message: String,
}

impl TokenError {
    /// Create a new token error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Produces collision-resistant unique tokens on demand.
pub trait TokenGenerator: Send + Sync {
    /// Generate one token.
    fn generate(&self) -> Result<String, TokenError>;
}

/// Default generator backed by random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> Result<String, TokenError> {
        Ok(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_tokens_are_distinct() {
        let generator = UuidTokenGenerator;
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        assert_ne!(a, b);
        assert!(!a.is_empty());
    }
}
