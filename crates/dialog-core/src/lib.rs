//! # SIPUA Dialog-Core
//!
//! SIP dialog management layer for the sipua stack.
//!
//! This crate turns a sequence of correlated request/response exchanges (an
//! INVITE, its provisional and final responses, and subsequent in-dialog
//! requests) into a single addressable, stateful session object. It derives
//! the correlation key from the identity headers, keeps the lifecycle state
//! machine honest under concurrent updates, and guarantees that late or
//! duplicated termination signals never undo progress a dialog has already
//! made.
//!
//! ## Architecture Position
//!
//! ```text
//! application / call control
//!      ↓
//! dialog-core (Dialog management)  ← THIS CRATE
//!      ↓
//! transaction layer (Reliability)      consumed through traits
//!      ↓
//! transport (Network)                  not visible here
//! ```
//!
//! The transaction and transport layers are collaborators, not
//! dependencies: dialog-core talks to them through
//! [`RequestSender`](transaction::RequestSender),
//! [`TransactionHandle`](transaction::TransactionHandle) and
//! [`ServerTransaction`](transaction::ServerTransaction).
//!
//! ## What This Crate Does
//!
//! - **Dialog identity**: stable correlation keys from Call-ID plus the two
//!   tags, with the recipient's tag injected exactly once
//! - **Dialog state management**: `Initial → Early → Confirmed → Terminated`
//!   with non-regressing, idempotent transitions
//! - **CSeq management**: atomic sequence numbering for subsequent requests
//! - **Role sessions**: [`DialogServerSession`](api::DialogServerSession)
//!   and [`DialogClientSession`](api::DialogClientSession) over a shared
//!   [`DialogSession`](api::DialogSession) surface
//! - **Termination watching**: a dying invite transaction ends an
//!   unconfirmed dialog without polling
//! - **Rehydration**: sessions can be exported to
//!   [`DialogSessionParams`](ua::DialogSessionParams) and rebuilt without a
//!   live transaction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use sipua_dialog_core::{
//!     DialogResult, DialogSession, DialogUserAgent, DialogUserAgentConfig,
//!     Request, RequestOptions, RequestSender, Response, ServerTransaction,
//!     StatusCode, TerminationCallback, TransactionHandle, Uri,
//! };
//!
//! /// Bridge to your transaction layer.
//! struct Sender;
//!
//! #[async_trait]
//! impl RequestSender for Sender {
//!     async fn send_request(
//!         &self,
//!         _request: Request,
//!         _options: RequestOptions,
//!     ) -> DialogResult<Arc<dyn TransactionHandle>> {
//!         unimplemented!("submit to the transaction layer")
//!     }
//! }
//!
//! struct ServerTx;
//!
//! impl TransactionHandle for ServerTx {
//!     fn on_terminate(&self, _callback: TerminationCallback) {}
//! }
//!
//! #[async_trait]
//! impl ServerTransaction for ServerTx {
//!     async fn respond(&self, _response: Response) -> DialogResult<()> {
//!         unimplemented!("send through the server transaction")
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DialogUserAgentConfig::new(Uri::sip("alice", "192.0.2.1").into());
//!     let ua = DialogUserAgent::new(Arc::new(Sender), config)?;
//!
//!     // An inbound INVITE and its transaction, handed over by the
//!     // transaction layer:
//!     # let invite: Request = todo!();
//!     let session = ua.read_invite(invite, Arc::new(ServerTx))?;
//!     session.respond(StatusCode::Ringing, Vec::new(), None).await?;
//!     session.respond(StatusCode::Ok, Vec::new(), None).await?;
//!     assert!(session.state().is_confirmed());
//!     Ok(())
//! }
//! ```
//!
//! Outbound dialogs start from [`DialogUserAgent::invite`]; see
//! `examples/basic_dialog.rs` for a complete in-memory round trip.

// Core modules
pub mod api;
pub mod config;
pub mod dialog;
pub mod errors;
pub mod transaction;
pub mod ua;

// Re-export main types
pub use api::{DialogClientSession, DialogServerSession, DialogSession};
pub use config::DialogUserAgentConfig;
pub use dialog::{Dialog, DialogId, DialogState};
pub use dialog::{TokenError, TokenGenerator, UuidTokenGenerator};
pub use errors::{DialogError, DialogResult};
pub use transaction::{
    watch_transaction, NoOpServerTransaction, NoOpTransaction, RequestOptions, RequestSender,
    ServerTransaction, TerminationCallback, TransactionHandle,
};
pub use ua::{DialogSessionParams, DialogUserAgent};

// Re-export for convenience
pub use sipua_sip_core::{
    Address, CSeq, Contact, Header, Method, Request, Response, StatusCode, Uri,
};
