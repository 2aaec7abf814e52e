//! Shared test doubles for the dialog-core integration tests
//!
//! Real implementations everywhere except the two external collaborators:
//! the transaction layer ([`MockTransaction`]) and the request submission
//! path ([`MockSender`]). Both record what passes through them so tests can
//! assert on it, and the mock transaction lets tests fire the termination
//! callback exactly the way the transaction layer would.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sipua_dialog_core::{
    DialogError, DialogResult, DialogUserAgent, DialogUserAgentConfig, RequestOptions,
    RequestSender, ServerTransaction, TerminationCallback, TokenError, TokenGenerator,
    TransactionHandle,
};
use sipua_sip_core::{Address, CSeq, Contact, Method, Request, Response, Uri};

/// Transaction double. Stores the one-shot termination callback so a test
/// can fire it, and captures responses sent through it.
#[derive(Default)]
pub struct MockTransaction {
    callback: Mutex<Option<TerminationCallback>>,
    responses: Mutex<Vec<Response>>,
}

impl MockTransaction {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fire the termination callback, as the transaction layer does when
    /// its lifecycle concludes. Later calls are no-ops: the callback is
    /// one-shot.
    pub fn fire_termination(&self) {
        if let Some(callback) = self.callback.lock().unwrap().take() {
            callback();
        }
    }

    /// Whether a termination callback has been registered (and not fired).
    pub fn has_callback(&self) -> bool {
        self.callback.lock().unwrap().is_some()
    }

    /// Responses sent through this transaction, in order.
    pub fn sent_responses(&self) -> Vec<Response> {
        self.responses.lock().unwrap().clone()
    }
}

impl TransactionHandle for MockTransaction {
    fn on_terminate(&self, callback: TerminationCallback) {
        *self.callback.lock().unwrap() = Some(callback);
    }
}

#[async_trait]
impl ServerTransaction for MockTransaction {
    async fn respond(&self, response: Response) -> DialogResult<()> {
        self.responses.lock().unwrap().push(response);
        Ok(())
    }
}

/// Request sender double. Captures submitted requests and their options and
/// hands back a fresh [`MockTransaction`] per submission, which tests can
/// retrieve to drive termination.
#[derive(Default)]
pub struct MockSender {
    submissions: Mutex<Vec<(Request, RequestOptions)>>,
    transactions: Mutex<Vec<Arc<MockTransaction>>>,
    fail: bool,
}

impl MockSender {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A sender whose submissions are all refused.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    /// Requests submitted so far, in order.
    pub fn sent_requests(&self) -> Vec<Request> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .map(|(request, _)| request.clone())
            .collect()
    }

    /// Options of each submission, in order.
    pub fn sent_options(&self) -> Vec<RequestOptions> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .map(|(_, options)| options.clone())
            .collect()
    }

    /// The transaction handed out for submission `index`.
    pub fn transaction(&self, index: usize) -> Arc<MockTransaction> {
        self.transactions.lock().unwrap()[index].clone()
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl RequestSender for MockSender {
    async fn send_request(
        &self,
        request: Request,
        options: RequestOptions,
    ) -> DialogResult<Arc<dyn TransactionHandle>> {
        if self.fail {
            return Err(DialogError::transaction_error("submission refused"));
        }
        self.submissions.lock().unwrap().push((request, options));
        let transaction = MockTransaction::new();
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(transaction)
    }
}

/// Token generator returning a fixed value, for deterministic tags.
pub struct StaticTokens(pub &'static str);

impl TokenGenerator for StaticTokens {
    fn generate(&self) -> Result<String, TokenError> {
        Ok(self.0.to_string())
    }
}

/// Token generator that always fails.
pub struct FailingTokens;

impl TokenGenerator for FailingTokens {
    fn generate(&self) -> Result<String, TokenError> {
        Err(TokenError::new("entropy exhausted"))
    }
}

/// Contact URI this test user agent advertises.
pub fn local_contact() -> Contact {
    Uri::sip("bob", "192.0.2.10").with_port(5060).into()
}

/// A user agent over a fresh [`MockSender`].
pub fn test_ua() -> (DialogUserAgent, Arc<MockSender>) {
    let sender = MockSender::new();
    let config = DialogUserAgentConfig::new(local_contact());
    let ua = DialogUserAgent::new(sender.clone(), config).unwrap();
    (ua, sender)
}

/// A well-formed inbound INVITE as the transport layer would deliver it.
pub fn inbound_invite() -> Request {
    Request::new(Method::Invite, Uri::sip("bob", "example.com"))
        .with_from(Address::new(Uri::sip("alice", "example.com")).with_tag("alice-tag"))
        .with_to(Address::new(Uri::sip("bob", "example.com")))
        .with_call_id("inbound-call-1")
        .with_cseq(CSeq::new(314, Method::Invite))
        .with_contact(Uri::sip("alice", "198.51.100.7").into())
        .with_source("198.51.100.7:5060".parse().unwrap())
}
