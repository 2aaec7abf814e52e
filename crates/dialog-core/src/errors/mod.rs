//! Error types for dialog-core
//!
//! Precondition errors (caller-supplied data invalid) and collaborator
//! failures are surfaced synchronously through [`DialogError`]; asynchronous
//! termination is never an error, it is a state transition observed through
//! [`DialogState`](crate::dialog::DialogState). No retries happen at this
//! layer.

use crate::dialog::dialog_utils::TokenError;

/// Result type for dialog operations
pub type DialogResult<T> = Result<T, DialogError>;

/// Errors produced by the dialog layer.
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// Session construction parameters did not carry the initiating request
    #[error("invite request is required")]
    MissingInviteRequest,

    /// A required header is absent from a message
    #[error("no {header} header present")]
    MissingHeader {
        /// Name of the missing header
        header: String,
    },

    /// A From/To header is present but carries no tag where one is required
    #[error("no tag on {header} header")]
    MissingTag {
        /// Name of the untagged header
        header: String,
    },

    /// An inbound initiating request carries no Contact header
    #[error("no Contact header present")]
    MissingContact,

    /// Generic protocol violation
    #[error("SIP protocol error: {message}")]
    ProtocolError {
        /// What was violated
        message: String,
    },

    /// The injected token generator failed
    #[error("generating dialog tag failed: {source}")]
    TokenGeneration {
        #[from]
        source: TokenError,
    },

    /// The transaction layer rejected or failed a submission
    #[error("transaction error: {message}")]
    TransactionError {
        /// What the transaction layer reported
        message: String,
    },

    /// The caller cancelled request transmission before a transaction existed
    #[error("request cancelled before a transaction was created")]
    RequestCancelled,

    /// An operation is not valid in the dialog's current state
    #[error("invalid dialog state: {message}")]
    InvalidState {
        /// Why the operation was refused
        message: String,
    },

    /// The user agent configuration failed validation
    #[error("configuration error: {message}")]
    ConfigError {
        /// What failed validation
        message: String,
    },
}

impl DialogError {
    /// Create a MissingHeader error.
    pub fn missing_header(header: &str) -> Self {
        DialogError::MissingHeader {
            header: header.to_string(),
        }
    }

    /// Create a MissingTag error.
    pub fn missing_tag(header: &str) -> Self {
        DialogError::MissingTag {
            header: header.to_string(),
        }
    }

    /// Create a ProtocolError.
    pub fn protocol_error(message: &str) -> Self {
        DialogError::ProtocolError {
            message: message.to_string(),
        }
    }

    /// Create a TransactionError.
    pub fn transaction_error(message: &str) -> Self {
        DialogError::TransactionError {
            message: message.to_string(),
        }
    }

    /// Create an InvalidState error.
    pub fn invalid_state(message: &str) -> Self {
        DialogError::InvalidState {
            message: message.to_string(),
        }
    }
}
