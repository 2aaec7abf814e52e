//! Basic dialog example
//!
//! Drives a complete server-side dialog in memory: accept an inbound
//! INVITE, ring, answer, then hang up with BYE. The transaction layer is
//! replaced by tiny in-process stand-ins so the example runs without a
//! network.
//!
//! Run with: cargo run --example basic_dialog -p sipua-dialog-core

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::info;

use sipua_dialog_core::{
    DialogResult, DialogSession, DialogUserAgent, DialogUserAgentConfig, Method, Request,
    RequestOptions, RequestSender, Response, ServerTransaction, StatusCode, TerminationCallback,
    TransactionHandle, Uri,
};
use sipua_sip_core::{Address, CSeq};

/// Transaction stand-in that just logs what it is asked to send.
#[derive(Default)]
struct LoopbackTransaction {
    callback: Mutex<Option<TerminationCallback>>,
}

impl TransactionHandle for LoopbackTransaction {
    fn on_terminate(&self, callback: TerminationCallback) {
        *self.callback.lock().unwrap() = Some(callback);
    }
}

#[async_trait]
impl ServerTransaction for LoopbackTransaction {
    async fn respond(&self, response: Response) -> DialogResult<()> {
        info!(status = %response.status, to_tag = ?response.to_tag(), "transaction sending response");
        Ok(())
    }
}

/// Request sender stand-in returning inert transactions.
struct LoopbackSender;

#[async_trait]
impl RequestSender for LoopbackSender {
    async fn send_request(
        &self,
        request: Request,
        _options: RequestOptions,
    ) -> DialogResult<Arc<dyn TransactionHandle>> {
        info!(method = %request.method, cseq = ?request.cseq(), "submitting request");
        Ok(Arc::new(LoopbackTransaction::default()))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("basic_dialog=info,sipua_dialog_core=debug")
        .init();

    let config = DialogUserAgentConfig::new(Uri::sip("bob", "192.0.2.10").into())
        .with_user_agent("sipua-example/0.2");
    let ua = DialogUserAgent::new(Arc::new(LoopbackSender), config)?;

    // The INVITE an upstream transaction layer would hand over
    let invite = Request::new(Method::Invite, Uri::sip("bob", "example.com"))
        .with_from(Address::new(Uri::sip("alice", "example.com")).with_tag("alice-tag"))
        .with_to(Address::new(Uri::sip("bob", "example.com")))
        .with_call_id("example-call-1")
        .with_cseq(CSeq::new(1, Method::Invite))
        .with_contact(Uri::sip("alice", "198.51.100.7").into());

    let session = ua.read_invite(invite, Arc::new(LoopbackTransaction::default()))?;
    info!(id = %session.id().unwrap(), state = %session.state(), "dialog accepted");

    session.respond(StatusCode::Ringing, Vec::new(), None).await?;
    info!(state = %session.state(), "ringing");

    session.respond(StatusCode::Ok, Vec::new(), Some("v=0".into())).await?;
    info!(state = %session.state(), "answered");

    session.bye().await?;
    info!(state = %session.state(), "hung up");

    Ok(())
}
