//! Role sessions
//!
//! The public face of a dialog is one of two session types, created by the
//! [`DialogUserAgent`](crate::ua::DialogUserAgent) factory:
//!
//! - [`DialogServerSession`] for the side that received the initiating
//!   request (it can additionally respond to it),
//! - [`DialogClientSession`] for the side that sent it (it additionally
//!   processes the responses coming back).
//!
//! Both share the [`DialogSession`] operations: reading state, reading the
//! anchor messages, sending subsequent in-dialog requests, and terminating.

pub mod client;
pub mod server;

pub use client::DialogClientSession;
pub use server::DialogServerSession;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use sipua_sip_core::{Header, Method, Request, Response};

use crate::dialog::{Dialog, DialogId, DialogState};
use crate::errors::{DialogError, DialogResult};
use crate::transaction::TransactionHandle;
use crate::ua::{DialogSessionParams, DialogUserAgent};

/// Operations shared by both session roles.
#[async_trait]
pub trait DialogSession: Send + Sync {
    /// The underlying dialog entity.
    fn dialog(&self) -> &Arc<Dialog>;

    /// The user agent this session was created by.
    fn user_agent(&self) -> &DialogUserAgent;

    /// The dialog identifier, once both tags are known.
    fn id(&self) -> Option<DialogId> {
        self.dialog().id()
    }

    /// Snapshot of the current lifecycle state.
    fn state(&self) -> DialogState {
        self.dialog().state()
    }

    /// The initiating request of the exchange.
    fn invite_request(&self) -> &Request {
        self.dialog().invite_request()
    }

    /// The response that concluded the initiating exchange, if observed.
    fn invite_response(&self) -> Option<Response> {
        self.dialog().invite_response()
    }

    /// Export the parameters needed to rehydrate this session later.
    fn to_params(&self) -> DialogSessionParams {
        let dialog = self.dialog();
        DialogSessionParams {
            invite_request: Some(dialog.invite_request().clone()),
            invite_response: dialog.invite_response(),
            state: dialog.state(),
            cseq: dialog.local_seq(),
            dialog_id: dialog.id(),
        }
    }

    /// Send a subsequent request within this dialog.
    ///
    /// Claims the next sequence number atomically, stamps it together with
    /// the correlation tags, and delegates transmission to the user agent's
    /// sender collaborator. No dialog lock is held across the submission.
    async fn send_request(
        &self,
        method: Method,
        body: Option<Bytes>,
        headers: Vec<Header>,
    ) -> DialogResult<Arc<dyn TransactionHandle>> {
        let dialog = self.dialog();
        if dialog.state().is_terminated() {
            return Err(DialogError::invalid_state(
                "cannot send a request on a terminated dialog",
            ));
        }
        let mut request = dialog.make_request(method, body, headers);
        let ua = self.user_agent();
        ua.stamp_user_agent(&mut request.headers);
        let options = ua.request_options(dialog);
        ua.sender().send_request(request, options).await
    }

    /// Terminate an established dialog by sending BYE.
    ///
    /// A no-op on an already-terminated dialog. Refused before
    /// establishment: an unanswered exchange is ended by cancelling its
    /// invite transaction, which the termination watcher then reflects.
    async fn bye(&self) -> DialogResult<()> {
        match self.state() {
            DialogState::Terminated => Ok(()),
            DialogState::Confirmed => {
                self.send_request(Method::Bye, None, Vec::new()).await?;
                self.dialog().terminate();
                Ok(())
            }
            state => Err(DialogError::invalid_state(&format!(
                "cannot send BYE in {} dialog; cancel the invite transaction instead",
                state
            ))),
        }
    }

    /// Explicitly force the dialog to `Terminated`. Idempotent; returns
    /// whether the state changed.
    fn terminate(&self) -> bool {
        self.dialog().terminate()
    }
}
