//! Transaction-layer integration traits
//!
//! The transaction machinery (retransmission timers, response matching,
//! RFC 3261 Section 17) lives below this crate. Dialog-core consumes it
//! through the narrow seams defined here:
//!
//! - [`TransactionHandle`]: an in-flight transaction that can notify its
//!   termination exactly once
//! - [`ServerTransaction`]: a server-side INVITE transaction that can also
//!   send responses
//! - [`RequestSender`]: the user agent's collaborator for submitting
//!   requests and obtaining transaction handles
//!
//! Rehydrated sessions, which have no live transaction, are bound to the
//! inert [`NoOpTransaction`]/[`NoOpServerTransaction`] placeholders instead
//! of a null reference.

pub mod termination;

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use sipua_sip_core::{Request, Response};

use crate::errors::DialogResult;

pub use termination::watch_transaction;

/// One-shot callback fired when a transaction's lifecycle concludes.
pub type TerminationCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to an in-flight transaction.
pub trait TransactionHandle: Send + Sync {
    /// Register a callback invoked exactly once when the transaction
    /// concludes, whether successfully, by failure, or by cancellation.
    ///
    /// Implementations must invoke the callback at most once, and must
    /// invoke it even when the transaction ends without any response (for
    /// example on timeout).
    fn on_terminate(&self, callback: TerminationCallback);
}

/// Handle to a server-side transaction that can send responses.
#[async_trait]
pub trait ServerTransaction: TransactionHandle {
    /// Send a response through this transaction.
    async fn respond(&self, response: Response) -> DialogResult<()>;
}

/// Per-request submission options.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Send to this transport address instead of resolving the Request-URI.
    /// Set by the dialog layer when the user agent is configured to target
    /// the observed source of the far end's messages (NAT policy).
    pub destination: Option<SocketAddr>,
}

/// The user agent's request submission collaborator.
///
/// Submits a request to the transaction layer and returns the handle
/// representing its in-flight transaction.
#[async_trait]
pub trait RequestSender: Send + Sync {
    /// Submit a request, returning the transaction created for it.
    async fn send_request(
        &self,
        request: Request,
        options: RequestOptions,
    ) -> DialogResult<Arc<dyn TransactionHandle>>;
}

/// Placeholder transaction for sessions constructed from persisted
/// parameters: registered termination callbacks are dropped and never fire.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpTransaction;

impl TransactionHandle for NoOpTransaction {
    fn on_terminate(&self, _callback: TerminationCallback) {}
}

/// Server-side placeholder transaction. Responses are accepted and
/// discarded; the initiating exchange it stands in for concluded long ago.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpServerTransaction;

impl TransactionHandle for NoOpServerTransaction {
    fn on_terminate(&self, _callback: TerminationCallback) {}
}

#[async_trait]
impl ServerTransaction for NoOpServerTransaction {
    async fn respond(&self, response: Response) -> DialogResult<()> {
        debug!(status = %response.status, "discarding response sent through no-op transaction");
        Ok(())
    }
}
