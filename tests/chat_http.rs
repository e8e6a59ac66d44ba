use std::rc::Rc;

use axum::{http::StatusCode, routing::post, Json, Router};
use medibot_web::prelude::*;

async fn echo(Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    Json(ChatResponse {
        reply: format!("**{}** received\nGet well soon", request.message),
    })
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "model not loaded")
}

async fn garbled() -> &'static str {
    "<html>not json</html>"
}

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn page(base_url: &str) -> (PageController<MemoryView, ChatClient>, MemoryView) {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = PageConfig::default();
    let view = MemoryView::for_config(&config);
    let client = Rc::new(ChatClient::new(base_url, config.chat.endpoint.clone()));
    let controller = PageController::new(view.clone(), client, config).unwrap();
    controller.init().unwrap();
    (controller, view)
}

fn transcript(view: &MemoryView) -> Vec<String> {
    view.children("chat-messages")
        .unwrap()
        .into_iter()
        .map(|entry| entry.markup)
        .collect()
}

#[tokio::test]
async fn reply_is_rendered() {
    let base = serve(Router::new().route("/chat", post(echo))).await;
    let (controller, view) = page(&base);

    view.set_input_value("user-input", " fever ").unwrap();
    let pending = controller.send_message().unwrap().unwrap();
    assert_eq!(view.input_value("user-input").unwrap(), "");

    let entry = pending.settle().await.unwrap();
    assert_eq!(entry.sender, Sender::Bot);
    assert_eq!(entry.text, "**fever** received\nGet well soon");
    assert_eq!(
        transcript(&view),
        vec!["fever", "<strong>fever</strong> received<br>Get well soon"]
    );
}

#[tokio::test]
async fn server_error_shows_fallback() {
    let base = serve(Router::new().route("/chat", post(broken))).await;
    let (controller, view) = page(&base);

    view.set_input_value("user-input", "hello").unwrap();
    let pending = controller.send_message().unwrap().unwrap();
    pending.settle().await.unwrap();

    assert_eq!(transcript(&view), vec!["hello", FALLBACK_REPLY]);
}

#[tokio::test]
async fn non_json_body_shows_fallback() {
    let base = serve(Router::new().route("/chat", post(garbled))).await;
    let (controller, view) = page(&base);

    view.set_input_value("user-input", "hello").unwrap();
    controller.send_message().unwrap().unwrap().settle().await.unwrap();

    assert_eq!(transcript(&view), vec!["hello", FALLBACK_REPLY]);
}

#[tokio::test]
async fn unreachable_backend_shows_fallback() {
    // Grab a free port, then close it so the connection is refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (controller, view) = page(&format!("http://{}", addr));
    view.set_input_value("user-input", "hello").unwrap();
    controller.send_message().unwrap().unwrap().settle().await.unwrap();

    assert_eq!(transcript(&view), vec!["hello", FALLBACK_REPLY]);

    // The widget keeps working after the failure
    view.set_input_value("user-input", "retry").unwrap();
    assert!(controller.send_message().unwrap().is_some());
}

#[tokio::test]
async fn client_reports_status() {
    let base = serve(Router::new().route("/chat", post(broken))).await;
    let client = ChatClient::new(base, "/chat");

    let err = client
        .send(&ChatRequest { message: "hi".into() })
        .await
        .unwrap_err();
    match err {
        ChatError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model not loaded");
        }
        other => panic!("unexpected error: {other}"),
    }
}
