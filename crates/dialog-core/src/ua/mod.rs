//! Dialog user agent, the session factory
//!
//! [`DialogUserAgent`] builds role sessions out of whichever of these an
//! application holds:
//!
//! - a freshly received initiating request plus its live server
//!   transaction ([`read_invite`](DialogUserAgent::read_invite)),
//! - a freshly sent initiating request plus the client transaction the
//!   sender collaborator returned
//!   ([`invite`](DialogUserAgent::invite) /
//!   [`write_invite`](DialogUserAgent::write_invite)),
//! - previously persisted session parameters with no live transaction
//!   ([`server_session_from_params`](DialogUserAgent::server_session_from_params) /
//!   [`client_session_from_params`](DialogUserAgent::client_session_from_params)).
//!
//! All paths are symmetric: they differ only in which anchor data is known
//! up front and which role the resulting session plays. Every construction
//! failure is surfaced synchronously and leaves no partial dialog behind.

use std::sync::Arc;

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use sipua_sip_core::{Address, CSeq, Header, Method, Request, Response, Uri};

use crate::api::{DialogClientSession, DialogServerSession};
use crate::config::DialogUserAgentConfig;
use crate::dialog::{Dialog, DialogId, DialogState, TokenGenerator, UuidTokenGenerator};
use crate::errors::{DialogError, DialogResult};
use crate::transaction::{
    watch_transaction, NoOpServerTransaction, NoOpTransaction, RequestOptions, RequestSender,
    ServerTransaction,
};

use serde::{Deserialize, Serialize};

/// Immutable parameter bundle for rehydrating a session without a live
/// transaction, e.g. after a process restart or when session state is
/// persisted externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogSessionParams {
    /// The initiating request that started the dialog. Required.
    pub invite_request: Option<Request>,
    /// The response to the initiating request, if one was observed.
    pub invite_response: Option<Response>,
    /// The state to pin the dialog to.
    pub state: DialogState,
    /// The last sequence number used for subsequent requests.
    pub cseq: u32,
    /// Precomputed dialog identifier, if one was persisted.
    pub dialog_id: Option<DialogId>,
}

/// User agent controlling dialog construction.
///
/// Holds the request-sending collaborator (used for the initiating INVITE
/// and for every subsequent in-dialog request), the token generation
/// capability, and the configuration. Cloning is cheap; sessions keep a
/// clone so they can send through the same collaborator.
#[derive(Clone)]
pub struct DialogUserAgent {
    sender: Arc<dyn RequestSender>,
    tokens: Arc<dyn TokenGenerator>,
    config: DialogUserAgentConfig,
}

impl DialogUserAgent {
    /// Create a user agent with the default UUID token generator.
    pub fn new(
        sender: Arc<dyn RequestSender>,
        config: DialogUserAgentConfig,
    ) -> DialogResult<Self> {
        config
            .validate()
            .map_err(|message| DialogError::ConfigError { message })?;
        Ok(Self {
            sender,
            tokens: Arc::new(UuidTokenGenerator),
            config,
        })
    }

    /// Replace the token generation capability.
    pub fn with_token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    /// The user agent configuration.
    pub fn config(&self) -> &DialogUserAgentConfig {
        &self.config
    }

    pub(crate) fn sender(&self) -> &Arc<dyn RequestSender> {
        &self.sender
    }

    /// Submission options for a request within `dialog`, honoring the NAT
    /// policy flag.
    pub(crate) fn request_options(&self, dialog: &Dialog) -> RequestOptions {
        RequestOptions {
            destination: if self.config.rewrite_contact {
                dialog.remote_source()
            } else {
                None
            },
        }
    }

    /// Stamp the configured User-Agent token, unless one is already present.
    pub(crate) fn stamp_user_agent(&self, headers: &mut Vec<Header>) {
        if let Some(user_agent) = &self.config.user_agent {
            if !headers.iter().any(|h| h.name.eq_ignore_ascii_case("User-Agent")) {
                headers.push(Header::new("User-Agent", user_agent.clone()));
            }
        }
    }

    // -- construction paths ------------------------------------------------

    /// Rehydrate a recipient-side session from persisted parameters.
    ///
    /// The session is pinned to the supplied id/state/sequence and bound to
    /// an inert transaction placeholder. Only use this when the initial
    /// transaction has already concluded.
    pub fn server_session_from_params(
        &self,
        params: DialogSessionParams,
    ) -> DialogResult<DialogServerSession> {
        let invite_request = params
            .invite_request
            .ok_or(DialogError::MissingInviteRequest)?;
        let dialog = Arc::new(Dialog::from_parts(
            invite_request,
            params.invite_response,
            params.state,
            params.cseq,
            params.dialog_id,
            false,
        )?);
        debug!(call_id = %dialog.call_id(), state = %dialog.state(), "rehydrated server session");
        Ok(DialogServerSession::new(
            dialog,
            Arc::new(NoOpServerTransaction),
            self.clone(),
        ))
    }

    /// Rehydrate an originator-side session from persisted parameters.
    pub fn client_session_from_params(
        &self,
        params: DialogSessionParams,
    ) -> DialogResult<DialogClientSession> {
        let invite_request = params
            .invite_request
            .ok_or(DialogError::MissingInviteRequest)?;
        let dialog = Arc::new(Dialog::from_parts(
            invite_request,
            params.invite_response,
            params.state,
            params.cseq,
            params.dialog_id,
            true,
        )?);
        debug!(call_id = %dialog.call_id(), state = %dialog.state(), "rehydrated client session");
        Ok(DialogClientSession::new(
            dialog,
            Arc::new(NoOpTransaction),
            self.clone(),
        ))
    }

    /// Accept an inbound initiating request.
    ///
    /// Validates the headers the exchange cannot be correlated without,
    /// generates and injects the local To tag (the same tag every response
    /// must reuse), derives the dialog identifier, and binds the new session
    /// to the live server transaction. The termination watcher is registered
    /// so a transaction that dies before the dialog confirms forces it to
    /// `Terminated`.
    pub fn read_invite(
        &self,
        mut invite: Request,
        transaction: Arc<dyn ServerTransaction>,
    ) -> DialogResult<DialogServerSession> {
        if invite.contact().is_none() {
            return Err(DialogError::MissingContact);
        }
        if invite.call_id().is_none() {
            return Err(DialogError::missing_header("Call-ID"));
        }
        if invite.cseq().is_none() {
            return Err(DialogError::missing_header("CSeq"));
        }
        if invite.from_tag().is_none() {
            return Err(DialogError::missing_tag("From"));
        }

        // Prebuild the To tag: it must be identical on every response this
        // dialog produces, so it is injected once, here, into the anchor.
        let to = invite
            .to_mut()
            .ok_or_else(|| DialogError::missing_header("To"))?;
        if to.tag().is_none() {
            let tag = self.tokens.generate()?;
            to.set_tag(tag);
        }

        let id = DialogId::from_server_request(&invite)?;

        let dialog = Arc::new(Dialog::new_server(invite)?);
        watch_transaction(&dialog, transaction.as_ref());

        info!(id = %id, "accepted inbound INVITE");
        Ok(DialogServerSession::new(dialog, transaction, self.clone()))
    }

    /// Start an outbound exchange toward `target`.
    ///
    /// Builds the initiating INVITE from the configured identity and
    /// delegates to [`write_invite`](Self::write_invite) with a fresh
    /// (never-cancelled) token.
    pub async fn invite(
        &self,
        target: Uri,
        body: Option<Bytes>,
        headers: Vec<Header>,
    ) -> DialogResult<DialogClientSession> {
        let mut request =
            Request::new(Method::Invite, target.clone()).with_to(Address::new(target));
        request.headers = headers;
        if let Some(body) = body {
            request = request.with_body(body);
        }
        self.write_invite(request, CancellationToken::new()).await
    }

    /// Send a caller-built initiating INVITE.
    ///
    /// Missing pieces are filled in before submission: the configured
    /// Contact, the From identity and its tag (generated, so the dialog key
    /// is defined on this side from the start), Call-ID and CSeq. If
    /// `cancel` fires before the sender collaborator returns a transaction
    /// the attempt fails cleanly with [`DialogError::RequestCancelled`] and
    /// no dialog is constructed; once the transaction exists, cancelling the
    /// exchange is the transaction layer's business.
    pub async fn write_invite(
        &self,
        mut invite: Request,
        cancel: CancellationToken,
    ) -> DialogResult<DialogClientSession> {
        if invite.contact.is_none() {
            invite.contact = Some(self.config.contact.clone());
        }
        if invite.from.is_none() {
            let identity = self
                .config
                .identity
                .clone()
                .unwrap_or_else(|| self.config.contact.address().clone());
            invite.from = Some(identity);
        }
        if invite.from_tag().is_none() {
            let tag = self.tokens.generate()?;
            if let Some(from) = invite.from_mut() {
                from.set_tag(tag);
            }
        }
        if invite.to.is_none() {
            invite.to = Some(Address::new(invite.uri.clone()));
        }
        if invite.call_id.is_none() {
            invite.call_id = Some(self.tokens.generate()?);
        }
        if invite.cseq.is_none() {
            invite.cseq = Some(CSeq::new(1, Method::Invite));
        }
        self.stamp_user_agent(&mut invite.headers);

        if cancel.is_cancelled() {
            return Err(DialogError::RequestCancelled);
        }
        let transaction = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DialogError::RequestCancelled),
            result = self
                .sender
                .send_request(invite.clone(), RequestOptions::default()) => result?,
        };

        let dialog = Arc::new(Dialog::new_client(invite)?);
        watch_transaction(&dialog, transaction.as_ref());

        info!(call_id = %dialog.call_id(), "sent outbound INVITE");
        Ok(DialogClientSession::new(dialog, transaction, self.clone()))
    }
}
