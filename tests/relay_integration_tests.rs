use std::time::Duration;

use futures::{SinkExt, StreamExt};
use longform::relay::{EventSource, FetchError, Filter, PublicKey, RelayClient};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_test::{assert_err, assert_ok};
use tokio_tungstenite::accept_async;
use tokio_tungstenite::tungstenite::Message;

// ============================================================================
// In-process relay
// ============================================================================

/// What the fake relay does after it receives the REQ.
enum Step {
    /// An article event for the client's subscription.
    Article(&'static str),
    /// An article event for some other subscription id.
    Foreign(&'static str),
    /// A frame that is not a relay message at all.
    Garbage,
    Notice(&'static str),
    Eose,
    Closed(&'static str),
    /// Drop the connection.
    Hangup,
    /// Keep the connection open and say nothing.
    Stall,
}

struct FakeRelay {
    url: String,
    /// Every text frame the client sent, once the connection ends.
    received: oneshot::Receiver<Vec<Value>>,
}

fn article_event(title: &str) -> Value {
    json!({
        "id": format!("{:0>64}", title.len()),
        "pubkey": "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e",
        "created_at": 1_700_000_000,
        "kind": 30023,
        "tags": [["title", title], ["published_at", "1700000000"]],
        "content": format!("# {title}"),
        "sig": ""
    })
}

async fn start_relay(script: Vec<Step>) -> FakeRelay {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    let (tx, received) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let mut seen = Vec::new();

        let req = next_json(&mut ws).await.unwrap();
        let sub = req[1].as_str().unwrap().to_string();
        seen.push(req);

        for step in script {
            let frame = match step {
                Step::Article(title) => json!(["EVENT", sub, article_event(title)]).to_string(),
                Step::Foreign(title) => {
                    json!(["EVENT", "someone-else", article_event(title)]).to_string()
                }
                Step::Garbage => "definitely not json".to_string(),
                Step::Notice(msg) => json!(["NOTICE", msg]).to_string(),
                Step::Eose => json!(["EOSE", sub]).to_string(),
                Step::Closed(reason) => json!(["CLOSED", sub, reason]).to_string(),
                Step::Hangup => {
                    let _ = tx.send(seen);
                    return;
                }
                Step::Stall => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    return;
                }
            };
            ws.send(Message::text(frame)).await.unwrap();
        }

        // Collect whatever the client sends until it closes
        while let Some(value) = next_json(&mut ws).await {
            seen.push(value);
        }
        let _ = tx.send(seen);
    });

    FakeRelay { url, received }
}

async fn next_json<S>(ws: &mut S) -> Option<Value>
where
    S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(Ok(message)) = ws.next().await {
        match message {
            Message::Text(text) => return serde_json::from_str(&text).ok(),
            Message::Close(_) => return None,
            _ => continue,
        }
    }
    None
}

fn client(url: &str) -> RelayClient {
    RelayClient::new(url, Duration::from_secs(5))
}

fn titles(batch: &longform::relay::Batch) -> Vec<String> {
    batch
        .iter()
        .map(|a| a.title().unwrap_or_default().to_string())
        .collect()
}

// ============================================================================
// Fetch Tests
// ============================================================================

#[tokio::test]
async fn test_events_until_eose_keep_arrival_order() {
    let relay = start_relay(vec![
        Step::Article("zebra"),
        Step::Article("apple"),
        Step::Article("mango"),
        Step::Eose,
    ])
    .await;

    let batch = assert_ok!(client(&relay.url).fetch(&Filter::long_form(None, 0)).await);
    assert_eq!(titles(&batch), vec!["zebra", "apple", "mango"]);
}

#[tokio::test]
async fn test_req_then_close_on_the_wire() {
    let author = PublicKey::from_hex(
        "7e7e9c42a91bfef19fa929e5fda1b72e0ebc1a4c1141673e2794234d86addf4e",
    )
    .unwrap();
    let relay = start_relay(vec![Step::Article("one"), Step::Eose]).await;

    assert_ok!(
        client(&relay.url)
            .fetch(&Filter::long_form(Some(author), 10))
            .await
    );
    let seen = relay.received.await.unwrap();

    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0][0], "REQ");
    assert_eq!(seen[0][2]["kinds"], json!([30023]));
    assert_eq!(seen[0][2]["authors"], json!([author.to_hex()]));
    assert_eq!(seen[0][2]["limit"], 10);
    assert_eq!(seen[1], json!(["CLOSE", seen[0][1]]));
}

#[tokio::test]
async fn test_empty_result_is_an_empty_batch() {
    let relay = start_relay(vec![Step::Eose]).await;
    let batch = assert_ok!(client(&relay.url).fetch(&Filter::long_form(None, 0)).await);
    assert!(batch.is_empty());
}

#[tokio::test]
async fn test_noise_is_skipped() {
    let relay = start_relay(vec![
        Step::Notice("rate limited, be gentle"),
        Step::Foreign("not ours"),
        Step::Garbage,
        Step::Article("ours"),
        Step::Eose,
    ])
    .await;

    let batch = assert_ok!(client(&relay.url).fetch(&Filter::long_form(None, 0)).await);
    assert_eq!(titles(&batch), vec!["ours"]);
}

#[tokio::test]
async fn test_limit_caps_collected_events() {
    let relay = start_relay(vec![
        Step::Article("a"),
        Step::Article("b"),
        Step::Article("c"),
        Step::Eose,
    ])
    .await;

    let batch = assert_ok!(client(&relay.url).fetch(&Filter::long_form(None, 2)).await);
    assert_eq!(titles(&batch), vec!["a", "b"]);
}

#[tokio::test]
async fn test_closed_is_a_subscription_error() {
    let relay = start_relay(vec![Step::Article("a"), Step::Closed("blocked: no thanks")]).await;
    let err = assert_err!(client(&relay.url).fetch(&Filter::long_form(None, 0)).await);
    assert_eq!(err, FetchError::Subscription("blocked: no thanks".to_string()));
}

#[tokio::test]
async fn test_hangup_before_eose_is_a_connection_error() {
    let relay = start_relay(vec![Step::Article("a"), Step::Hangup]).await;
    let err = assert_err!(client(&relay.url).fetch(&Filter::long_form(None, 0)).await);
    assert!(matches!(err, FetchError::Connection(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unreachable_relay_is_a_connection_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("ws://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = assert_err!(client(&url).fetch(&Filter::long_form(None, 0)).await);
    assert!(matches!(err, FetchError::Connection(_)), "got {err:?}");
}

#[tokio::test]
async fn test_silent_relay_times_out() {
    let relay = start_relay(vec![Step::Article("a"), Step::Stall]).await;
    let client = RelayClient::new(relay.url.as_str(), Duration::from_millis(200));

    let err = assert_err!(client.fetch(&Filter::long_form(None, 0)).await);
    assert_eq!(err, FetchError::Timeout(Duration::from_millis(200)));
    assert!(err.to_string().contains("timed out"));
}
