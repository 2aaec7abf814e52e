//! Integration tests for in-dialog requests and responses
//!
//! Tag reuse across responses, sequence numbering under concurrency, the
//! NAT policy flag, and BYE semantics.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use common::{inbound_invite, test_ua, MockSender, MockTransaction, StaticTokens};
use futures::future::join_all;
use sipua_dialog_core::{
    DialogError, DialogSession, DialogState, DialogUserAgent, DialogUserAgentConfig, Method,
    StatusCode, Uri,
};

// -- tag reuse --------------------------------------------------------------

/// Every response after acceptance reuses the single injected local tag
#[tokio::test]
async fn test_responses_reuse_injected_tag() {
    let (ua, _sender) = test_ua();
    let ua = ua.with_token_generator(Arc::new(StaticTokens("stable-tag")));
    let transaction = MockTransaction::new();
    let session = ua.read_invite(inbound_invite(), transaction.clone()).unwrap();

    session.respond(StatusCode::Trying, Vec::new(), None).await.unwrap();
    session.respond(StatusCode::Ringing, Vec::new(), None).await.unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();

    let responses = transaction.sent_responses();
    assert_eq!(responses.len(), 3);

    // 100 Trying never carries the dialog tag
    assert_eq!(responses[0].status, StatusCode::Trying);
    assert_eq!(responses[0].to_tag(), None);

    // Everything else carries the identical injected tag
    assert_eq!(responses[1].to_tag(), Some("stable-tag"));
    assert_eq!(responses[2].to_tag(), Some("stable-tag"));
}

/// Dialog-establishing responses carry the configured Contact
#[tokio::test]
async fn test_responses_carry_contact() {
    let (ua, _sender) = test_ua();
    let transaction = MockTransaction::new();
    let session = ua.read_invite(inbound_invite(), transaction.clone()).unwrap();

    session.respond(StatusCode::Ringing, Vec::new(), None).await.unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();

    for response in transaction.sent_responses() {
        assert_eq!(response.contact(), Some(&common::local_contact()));
    }
}

// -- sequence numbering -----------------------------------------------------

/// Sequential sends get strictly increasing sequence numbers
#[tokio::test]
async fn test_sequential_sends_increase_cseq() {
    let (ua, sender) = test_ua();
    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();

    for _ in 0..3 {
        session.send_request(Method::Info, None, Vec::new()).await.unwrap();
    }

    let stamped: Vec<u32> = sender
        .sent_requests()
        .iter()
        .map(|r| r.cseq().unwrap().seq)
        .collect();
    assert_eq!(stamped, vec![1, 2, 3]);
}

/// Concurrent sends never observe or stamp the same sequence number
#[tokio::test]
async fn test_concurrent_sends_stamp_distinct_cseq() {
    let (ua, sender) = test_ua();
    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();
    let session = Arc::new(session);

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let session = Arc::clone(&session);
            tokio::spawn(async move {
                session.send_request(Method::Info, None, Vec::new()).await.unwrap();
            })
        })
        .collect();
    join_all(tasks).await;

    let stamped: Vec<u32> = sender
        .sent_requests()
        .iter()
        .map(|r| r.cseq().unwrap().seq)
        .collect();
    assert_eq!(stamped.len(), 16);

    let distinct: HashSet<u32> = stamped.iter().copied().collect();
    assert_eq!(distinct.len(), 16, "sequence numbers must be pairwise distinct");
    assert_eq!(*stamped.iter().max().unwrap(), 16);
}

/// Subsequent requests are stamped with the correlation tags and Call-ID
#[tokio::test]
async fn test_requests_carry_dialog_identity() {
    let (ua, sender) = test_ua();
    let ua = ua.with_token_generator(Arc::new(StaticTokens("bob-tag")));
    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();

    session.send_request(Method::Info, None, Vec::new()).await.unwrap();

    let request = &sender.sent_requests()[0];
    assert_eq!(request.call_id(), Some("inbound-call-1"));
    assert_eq!(request.from_tag(), Some("bob-tag"));
    assert_eq!(request.to_tag(), Some("alice-tag"));
    // Addressed at the far end's advertised Contact
    assert_eq!(request.uri.host, "198.51.100.7");
}

// -- NAT policy -------------------------------------------------------------

/// With rewrite_contact set, requests target the observed source address
#[tokio::test]
async fn test_rewrite_contact_targets_observed_source() {
    let sender = MockSender::new();
    let config = DialogUserAgentConfig::new(common::local_contact()).with_rewrite_contact();
    let ua = DialogUserAgent::new(sender.clone(), config).unwrap();

    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();
    session.send_request(Method::Info, None, Vec::new()).await.unwrap();

    let options = &sender.sent_options()[0];
    assert_eq!(options.destination, Some("198.51.100.7:5060".parse().unwrap()));
}

/// Without the flag, no destination override is passed down
#[tokio::test]
async fn test_default_policy_uses_advertised_contact() {
    let (ua, sender) = test_ua();
    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();
    session.send_request(Method::Info, None, Vec::new()).await.unwrap();

    assert_eq!(sender.sent_options()[0].destination, None);
}

// -- BYE and terminal behavior ----------------------------------------------

/// BYE on a confirmed dialog sends the request and terminates the dialog
#[tokio::test]
async fn test_bye_terminates_confirmed_dialog() {
    let (ua, sender) = test_ua();
    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();
    session.respond(StatusCode::Ok, Vec::new(), None).await.unwrap();

    session.bye().await.unwrap();
    assert_eq!(session.state(), DialogState::Terminated);
    assert_eq!(sender.sent_requests()[0].method, Method::Bye);

    // Idempotent: a second BYE sends nothing
    session.bye().await.unwrap();
    assert_eq!(sender.submission_count(), 1);
}

/// BYE is refused before establishment
#[tokio::test]
async fn test_bye_refused_before_confirmed() {
    let (ua, _sender) = test_ua();
    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();

    assert!(matches!(
        session.bye().await,
        Err(DialogError::InvalidState { .. })
    ));
}

/// Sends are refused on a terminated dialog
#[tokio::test]
async fn test_send_refused_after_termination() {
    let (ua, sender) = test_ua();
    let session = ua.read_invite(inbound_invite(), MockTransaction::new()).unwrap();
    session.terminate();

    assert!(matches!(
        session.send_request(Method::Info, None, Vec::new()).await,
        Err(DialogError::InvalidState { .. })
    ));
    assert_eq!(sender.submission_count(), 0);
}

// -- client response processing ---------------------------------------------

/// The first tagged response completes the originator's correlation key
#[tokio::test]
async fn test_client_learns_remote_tag_from_response() {
    let (ua, sender) = test_ua();
    let session = ua.invite(Uri::sip("carol", "example.net"), None, Vec::new()).await.unwrap();
    assert!(session.id().is_none());

    let invite = sender.sent_requests()[0].clone();
    let mut ringing = sipua_sip_core::Response::from_request(&invite, StatusCode::Ringing);
    ringing.to_mut().unwrap().set_tag("carol-tag");
    session.read_response(&ringing).unwrap();

    assert_eq!(session.state(), DialogState::Early);
    let id = session.id().unwrap();
    assert_eq!(id.remote_tag, "carol-tag");
    assert_eq!(id.local_tag, invite.from_tag().unwrap());

    // Success confirms and records the anchor response
    let mut ok = sipua_sip_core::Response::from_request(&invite, StatusCode::Ok);
    ok.to_mut().unwrap().set_tag("carol-tag");
    ok.contact = Some(Uri::sip("carol", "203.0.113.40").into());
    session.read_response(&ok).unwrap();

    assert_eq!(session.state(), DialogState::Confirmed);
    assert!(session.invite_response().is_some());

    // Subsequent requests go to the Contact learned from the 2xx
    session.send_request(Method::Info, None, Vec::new()).await.unwrap();
    assert_eq!(sender.sent_requests()[1].uri.host, "203.0.113.40");
}

/// A final failure response terminates the client dialog
#[tokio::test]
async fn test_client_failure_response_terminates() {
    let (ua, sender) = test_ua();
    let session = ua.invite(Uri::sip("carol", "example.net"), None, Vec::new()).await.unwrap();

    let invite = sender.sent_requests()[0].clone();
    let mut busy = sipua_sip_core::Response::from_request(&invite, StatusCode::BusyHere);
    busy.to_mut().unwrap().set_tag("carol-tag");
    session.read_response(&busy).unwrap();

    assert_eq!(session.state(), DialogState::Terminated);
}

/// A response from some other exchange is rejected
#[tokio::test]
async fn test_client_rejects_foreign_response() {
    let (ua, _sender) = test_ua();
    let session = ua.invite(Uri::sip("carol", "example.net"), None, Vec::new()).await.unwrap();

    let mut foreign = sipua_sip_core::Response::new(StatusCode::Ok);
    foreign.call_id = Some("some-other-call".to_string());
    assert!(matches!(
        session.read_response(&foreign),
        Err(DialogError::ProtocolError { .. })
    ));
}

// -- user agent stamping ----------------------------------------------------

/// A configured product token is stamped onto generated requests
#[tokio::test]
async fn test_user_agent_header_stamped() {
    let sender = MockSender::new();
    let config =
        DialogUserAgentConfig::new(common::local_contact()).with_user_agent("sipua/0.2");
    let ua = DialogUserAgent::new(sender.clone(), config).unwrap();

    ua.invite(Uri::sip("carol", "example.net"), None, Vec::new()).await.unwrap();

    let request = &sender.sent_requests()[0];
    assert!(request
        .headers
        .iter()
        .any(|h| h.name == "User-Agent" && h.value == "sipua/0.2"));
}
