//! HTTP client tests against a loopback stub backend

use anyhow::Result;
use axum::{extract::State, routing::post, Json, Router};
use chat_core::{ChatClient, ChatError, RetryPolicy, Turn};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Retry schedule small enough for tests
fn fast_retries() -> RetryPolicy {
    RetryPolicy::new(2, Duration::from_millis(10))
}

/// Spin up a stub backend on a loopback port and return its base URL
async fn spawn_backend(app: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

async fn echo_handler(Json(body): Json<Value>) -> Json<Value> {
    // Mirror the field names back so the test can see what arrived
    let user_message = body["userMessage"].as_str().unwrap_or_default();
    let cached = body["cachedMessages"].as_array().map(Vec::len).unwrap_or(0);
    Json(json!({
        "choices": [
            {"message": {"role": "assistant", "content": format!("echo:{user_message}:{cached}")}}
        ]
    }))
}

#[tokio::test]
async fn successful_exchange_extracts_first_choice_content() -> Result<()> {
    let base = spawn_backend(Router::new().route("/api/chat", post(echo_handler))).await?;
    let client = ChatClient::with_policy(&base, Duration::from_secs(5), fast_retries())?;

    let context = vec![Turn::new("hi", "hello"), Turn::new("more", "context")];
    let content = client.send(&context, "how are you").await?;

    // Handler saw camelCase keys and both cached turns
    assert_eq!(content, "echo:how are you:2");
    Ok(())
}

#[tokio::test]
async fn server_errors_are_not_retried() -> Result<()> {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/api/chat",
            post(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom")
            }),
        )
        .with_state(Arc::clone(&hits));
    let base = spawn_backend(app).await?;
    let client = ChatClient::with_policy(&base, Duration::from_secs(5), fast_retries())?;

    let err = client.send(&[], "hello").await.unwrap_err();
    assert!(matches!(err, ChatError::Status { status: 500, .. }));
    assert!(!err.is_timeout());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn missing_choices_is_a_decode_error() -> Result<()> {
    let app = Router::new().route(
        "/api/chat",
        post(|| async { Json(json!({"choices": []})) }),
    );
    let base = spawn_backend(app).await?;
    let client = ChatClient::with_policy(&base, Duration::from_secs(5), fast_retries())?;

    let err = client.send(&[], "hello").await.unwrap_err();
    assert!(matches!(err, ChatError::Decode { .. }));
    assert!(!err.is_timeout());
    Ok(())
}

#[tokio::test]
async fn transport_failures_are_retried_before_surfacing() -> Result<()> {
    // Grab a port that nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let client = ChatClient::with_policy(
        &format!("http://{addr}"),
        Duration::from_secs(5),
        fast_retries(),
    )?;

    let started = Instant::now();
    let err = client.send(&[], "hello").await.unwrap_err();

    assert!(matches!(err, ChatError::Transport { .. }));
    assert!(err.is_retryable());
    // Two retries happened: the backoff sleeps (10 ms + 20 ms) elapsed
    assert!(started.elapsed() >= Duration::from_millis(30));
    Ok(())
}
