//! Drives `BedrockHandler` through the AWS SDK against a local server that
//! answers the way Bedrock Runtime does.

use aws_sdk_bedrockruntime::config::{
    retry::RetryConfig, BehaviorVersion, Credentials, Region,
};
use aws_smithy_eventstream::frame::write_message_to;
use aws_smithy_types::event_stream::{Header, HeaderValue, Message};
use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use bedrock_api::BedrockHandler;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use text_completion::{handle_submission, ErrorKind, ModelId, Renderer};

#[derive(Default)]
struct Screen {
    renders: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
}

impl Renderer for Screen {
    fn render(&mut self, text: &str) {
        self.renders.push(text.to_string());
    }
    fn success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }
    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

#[derive(Debug, Clone)]
struct Seen {
    model: String,
    authorization: String,
    body: serde_json::Value,
}

fn frame(headers: &[(&'static str, &'static str)], payload: Vec<u8>) -> Vec<u8> {
    let mut message = Message::new(payload);
    for (name, value) in headers {
        message = message.add_header(Header::new(*name, HeaderValue::String((*value).into())));
    }
    let mut out = Vec::new();
    write_message_to(&message, &mut out).unwrap();
    out
}

fn text_chunk(text: &str) -> Vec<u8> {
    let record = serde_json::json!({
        "type": "content_block_delta",
        "index": 0,
        "delta": {"type": "text_delta", "text": text},
    });
    // Bedrock wraps each record in a base64 `bytes` field.
    let payload = serde_json::json!({
        "bytes": aws_smithy_types::base64::encode(record.to_string()),
    });
    frame(
        &[
            (":message-type", "event"),
            (":event-type", "chunk"),
            (":content-type", "application/json"),
        ],
        payload.to_string().into_bytes(),
    )
}

async fn spawn_bedrock(
    status: StatusCode,
    headers: Vec<(&'static str, &'static str)>,
    body: Vec<u8>,
) -> (SocketAddr, Arc<Mutex<Vec<Seen>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = Router::new().route(
        "/model/:model_id/invoke-with-response-stream",
        post(
            move |Path(model): Path<String>, request_headers: HeaderMap, request: Bytes| {
                let recorder = recorder.clone();
                let headers = headers.clone();
                let body = body.clone();
                async move {
                    recorder.lock().unwrap().push(Seen {
                        model,
                        authorization: request_headers
                            .get(header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string(),
                        body: serde_json::from_slice(&request).unwrap_or_default(),
                    });
                    let mut response = (status, body).into_response();
                    for (name, value) in headers {
                        response.headers_mut().insert(
                            header::HeaderName::from_static(name),
                            header::HeaderValue::from_static(value),
                        );
                    }
                    response
                }
            },
        ),
    );

    let server = axum::Server::bind(&"127.0.0.1:0".parse().unwrap()).serve(app.into_make_service());
    let addr = server.local_addr();
    tokio::spawn(async move {
        server.await.unwrap();
    });
    (addr, seen)
}

fn handler_for(addr: SocketAddr) -> BedrockHandler {
    let config = aws_sdk_bedrockruntime::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-west-2"))
        .credentials_provider(Credentials::new("AKIDTEST", "secret", None, None, "test"))
        .endpoint_url(format!("http://{}", addr))
        .retry_config(RetryConfig::disabled())
        .build();
    BedrockHandler::from_conf(config)
}

#[tokio::test]
async fn streams_answer_from_event_stream_body() {
    let body = [text_chunk("Hi"), text_chunk(" there"), text_chunk("!")].concat();
    let (addr, seen) = spawn_bedrock(
        StatusCode::OK,
        vec![("content-type", "application/vnd.amazon.eventstream")],
        body,
    )
    .await;
    let handler = handler_for(addr);
    let mut screen = Screen::default();

    let submission = handle_submission(&handler, ModelId::ClaudeV2_1, "Hello", &mut screen).await;

    assert!(submission.outcome.is_ok(), "{:?}", submission.outcome);
    assert_eq!(submission.answer.as_str(), "Hi there!");
    assert_eq!(screen.renders, vec!["Hi", "Hi there", "Hi there!"]);
    assert_eq!(screen.successes, vec!["Response generated successfully!"]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].model, "anthropic.claude-v2:1");
    assert!(seen[0]
        .authorization
        .starts_with("AWS4-HMAC-SHA256 Credential=AKIDTEST/"));
    assert_eq!(
        seen[0].body,
        serde_json::json!({
            "anthropic_version": "bedrock-2023-05-31",
            "max_tokens": 1000,
            "messages": [{"role": "user", "content": "Hello"}],
        })
    );
}

#[tokio::test]
async fn error_status_surfaces_service_message() {
    let body = br#"{"message":"The security token included in the request is invalid."}"#.to_vec();
    let (addr, _seen) = spawn_bedrock(
        StatusCode::FORBIDDEN,
        vec![
            ("content-type", "application/json"),
            ("x-amzn-errortype", "AccessDeniedException"),
        ],
        body,
    )
    .await;
    let handler = handler_for(addr);
    let mut screen = Screen::default();

    let submission = handle_submission(&handler, ModelId::default(), "Hello", &mut screen).await;

    let err = submission.outcome.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err
        .to_string()
        .contains("The security token included in the request is invalid."));
    assert!(screen.renders.is_empty());
    assert_eq!(screen.errors.len(), 1);
}

#[tokio::test]
async fn exception_mid_stream_keeps_partial_text() {
    let exception = frame(
        &[
            (":message-type", "exception"),
            (":exception-type", "modelStreamErrorException"),
            (":content-type", "application/json"),
        ],
        br#"{"message":"Model stream error"}"#.to_vec(),
    );
    let body = [text_chunk("Once upon"), exception, text_chunk(" a time")].concat();
    let (addr, _seen) = spawn_bedrock(
        StatusCode::OK,
        vec![("content-type", "application/vnd.amazon.eventstream")],
        body,
    )
    .await;
    let handler = handler_for(addr);
    let mut screen = Screen::default();

    let submission = handle_submission(&handler, ModelId::default(), "Story", &mut screen).await;

    assert_eq!(submission.outcome.unwrap_err().kind(), ErrorKind::Transport);
    assert_eq!(submission.answer.as_str(), "Once upon");
    assert_eq!(screen.renders, vec!["Once upon"]);
    assert_eq!(screen.errors.len(), 1);
    assert!(screen.successes.is_empty());
}

#[tokio::test]
async fn connection_refused_shows_error_and_no_text() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let handler = handler_for(addr);
    let mut screen = Screen::default();

    let submission = handle_submission(&handler, ModelId::ClaudeV2_1, "Hello", &mut screen).await;

    assert_eq!(submission.outcome.unwrap_err().kind(), ErrorKind::Transport);
    assert!(submission.answer.is_empty());
    assert!(screen.renders.is_empty());
    assert!(screen.warnings.is_empty());
    assert_eq!(screen.errors.len(), 1);
    assert!(screen.errors[0].starts_with("An error occurred: "));
}
