//! Server-side dialog session
//!
//! The session held by the side that received the initiating request. On
//! top of the shared [`DialogSession`](super::DialogSession) operations it
//! can respond to the initiating request, always reusing the To tag that
//! was injected when the request was accepted.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use sipua_sip_core::{Header, Response, StatusCode};

use crate::dialog::{Dialog, DialogState};
use crate::errors::{DialogError, DialogResult};
use crate::transaction::ServerTransaction;
use crate::ua::DialogUserAgent;

use super::DialogSession;

/// A dialog session for the recipient of the initiating request.
pub struct DialogServerSession {
    dialog: Arc<Dialog>,
    invite_transaction: Arc<dyn ServerTransaction>,
    ua: DialogUserAgent,
}

impl DialogServerSession {
    pub(crate) fn new(
        dialog: Arc<Dialog>,
        invite_transaction: Arc<dyn ServerTransaction>,
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
    pub fn invite_transaction(&self) -> &Arc<dyn ServerTransaction> {
        &self.invite_transaction
    }

    /// Build and send a response to the initiating request.
    ///
    /// Identity headers are echoed from the anchor request. Any response
    /// other than 100 Trying carries the local tag injected at accept time;
    /// the tag is never regenerated, so the far end derives the same
    /// correlation key from every response. Dialog-establishing responses
    /// get the configured Contact when none was supplied.
    ///
    /// State advances with the response: a tagged provisional moves the
    /// dialog to `Early`, a 2xx to `Confirmed` (recording the response as
    /// the anchor), a failure to `Terminated`.
    pub async fn respond(
        &self,
        status: StatusCode,
        headers: Vec<Header>,
        body: Option<Bytes>,
    ) -> DialogResult<Response> {
        if self.dialog.state().is_terminated() {
            return Err(DialogError::invalid_state(
                "cannot respond on a terminated dialog",
            ));
        }

        let mut response = Response::from_request(self.dialog.invite_request(), status);
        response.headers = headers;
        if let Some(body) = body {
            response = response.with_body(body);
        }

        if status == StatusCode::Trying {
            // 100 is hop-by-hop and never carries the dialog tag
            if let Some(to) = response.to_mut() {
                to.clear_tag();
            }
        } else if response.to_tag().is_none() {
            if let Some(tag) = self.dialog.local_tag() {
                let tag = tag.to_string();
                if let Some(to) = response.to_mut() {
                    to.set_tag(tag);
                }
            }
        }

        let establishing = status.is_success() || (status.is_provisional() && status != StatusCode::Trying);
        if establishing && response.contact.is_none() {
            response.contact = Some(self.ua.config().contact.clone());
        }
        self.ua.stamp_user_agent(&mut response.headers);

        self.invite_transaction.respond(response.clone()).await?;
        debug!(call_id = %self.dialog.call_id(), status = %status, "sent response to INVITE");

        if status.is_success() {
            self.dialog.set_invite_response(response.clone());
            self.dialog.transition(DialogState::Confirmed);
        } else if status.is_provisional() {
            if response.to_tag().is_some() {
                self.dialog.transition(DialogState::Early);
            }
        } else {
            self.dialog.set_invite_response(response.clone());
            self.dialog.transition(DialogState::Terminated);
        }

        Ok(response)
    }
}

impl DialogSession for DialogServerSession {
    fn dialog(&self) -> &Arc<Dialog> {
        &self.dialog
    }

    fn user_agent(&self) -> &DialogUserAgent {
        &self.ua
    }
}
