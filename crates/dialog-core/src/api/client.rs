//! Client-side dialog session
//!
//! The session held by the side that sent the initiating request. On top of
//! the shared [`DialogSession`](super::DialogSession) operations it
//! processes the responses coming back on the invite transaction: the first
//! tagged response completes the correlation key, and final responses decide
//! the dialog's fate.

use std::sync::Arc;

use tracing::debug;

use sipua_sip_core::{Response, StatusCode};

use crate::dialog::{Dialog, DialogState};
use crate::errors::{DialogError, DialogResult};
use crate::transaction::TransactionHandle;
use crate::ua::DialogUserAgent;

use super::DialogSession;

/// A dialog session for the originator of the initiating request.
pub struct DialogClientSession {
    dialog: Arc<Dialog>,
    invite_transaction: Arc<dyn TransactionHandle>,
    ua: DialogUserAgent,
}

impl DialogClientSession {
    pub(crate) fn new(
        dialog: Arc<Dialog>,
        invite_transaction: Arc<dyn TransactionHandle>,
        ua: DialogUserAgent,
    ) -> Self {
        Self {
            dialog,
            invite_transaction,
            ua,
        }
    }

    /// The transaction carrying the initiating request. A placeholder for
    /// rehydrated sessions.
    pub fn invite_transaction(&self) -> &Arc<dyn TransactionHandle> {
        &self.invite_transaction
    }

    /// Process a response to the initiating request.
    ///
    /// The remote tag (and with it the dialog identifier) is learned from
    /// the first response that carries one. A tagged provisional moves the
    /// dialog to `Early`; a 2xx records the anchor response, updates the
    /// remote target from its Contact, and moves to `Confirmed`; a failure
    /// moves to `Terminated`. 100 Trying is ignored.
    pub fn read_response(&self, response: &Response) -> DialogResult<()> {
        if let Some(call_id) = response.call_id() {
            if call_id != self.dialog.call_id() {
                return Err(DialogError::protocol_error(
                    "response Call-ID does not match dialog",
                ));
            }
        }
        if response.status == StatusCode::Trying {
            return Ok(());
        }

        if let Some(tag) = response.to_tag() {
            self.dialog.set_remote_tag(tag);
        }
        if let Some(source) = response.source {
            self.dialog.record_remote_source(source);
        }

        if response.status.is_provisional() {
            if response.to_tag().is_some() {
                self.dialog.transition(DialogState::Early);
            }
            return Ok(());
        }

        if response.status.is_success() {
            if let Some(contact) = response.contact() {
                self.dialog.set_remote_target(contact.uri().clone());
            }
            self.dialog.set_invite_response(response.clone());
            self.dialog.transition(DialogState::Confirmed);
        } else {
            self.dialog.set_invite_response(response.clone());
            self.dialog.transition(DialogState::Terminated);
        }
        debug!(call_id = %self.dialog.call_id(), status = %response.status, state = %self.dialog.state(), "processed INVITE response");
        Ok(())
    }
}

impl DialogSession for DialogClientSession {
    fn dialog(&self) -> &Arc<Dialog> {
        &self.dialog
    }

    fn user_agent(&self) -> &DialogUserAgent {
        &self.ua
    }
}
