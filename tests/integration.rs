use pretty_assertions::assert_eq;
use std::time::Duration;
use storyforge::{
    ai::{MockChatClient, MockImageClient, TogetherChatClient, TogetherImageClient},
    app::{App, AppServices},
    display::{DisplayService, MockDisplay, TerminalDisplay},
    models::Story,
    retry::RetryPolicy,
    Error,
};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 1x1 PNG
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0x99, 0x63, 0xF8,
    0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2, 0x25, 0x00, 0xBC, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn chat_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

/// Wire the real Together clients against a wiremock server.
fn wire_app(server: &MockServer, display: Box<dyn DisplayService>) -> App {
    let chat = TogetherChatClient::new("test-key".to_string(), "test-chat-model".to_string())
        .with_base_url(server.uri());
    let image_gen =
        TogetherImageClient::new("test-key".to_string(), "test-image-model".to_string())
            .with_base_url(server.uri());

    App::with_services(
        AppServices {
            chat: Box::new(chat),
            image_gen: Box::new(image_gen),
            display,
        },
        fast_retry(),
        Duration::ZERO,
    )
}

/// Mount the outline and story chat responses; the two calls are told apart
/// by their prompt wording.
async fn mount_chat_endpoints(server: &MockServer, image_server_uri: &str) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Create a story line and image prompt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
            r#"{"story_line": "Animals form an orchestra", "image_prompt": "forest animals with instruments"}"#,
        )))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Write a short story"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_body("The forest hums at dusk.")),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "url": format!("{}/generated.png", image_server_uri) }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_pipeline_over_the_wire() {
    let server = MockServer::start().await;
    mount_chat_endpoints(&server, &server.uri()).await;

    let display = MockDisplay::new();
    let display_probe = display.clone();
    let app = wire_app(&server, Box::new(display));

    let story = app.run("a magical forest").await.unwrap();

    assert_eq!(story.topic, "a magical forest");
    assert_eq!(story.story_line, "Animals form an orchestra");
    assert_eq!(story.image_prompt, "forest animals with instruments");
    assert_eq!(story.image_url, format!("{}/generated.png", server.uri()));
    assert_eq!(story.story, "The forest hums at dusk.");
    assert_eq!(display_probe.get_presented().len(), 1);
}

#[tokio::test]
async fn test_pipeline_recovers_from_rate_limited_image_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Create a story line and image prompt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
            r#"{"story_line": "line", "image_prompt": "prompt"}"#,
        )))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Write a short story"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("a story")))
        .mount(&server)
        .await;

    // First two image calls are rate limited, the third succeeds.
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{ "url": "https://images.test/settled.png" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = wire_app(&server, Box::new(MockDisplay::new()));
    let story = app.run("a magical forest").await.unwrap();

    assert_eq!(story.image_url, "https://images.test/settled.png");
}

#[tokio::test]
async fn test_pipeline_fails_fast_on_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let app = wire_app(&server, Box::new(MockDisplay::new()));
    let err = app.run("a magical forest").await.unwrap_err();

    assert!(err.to_string().contains("outline generation"));
    assert!(!err.is_rate_limited());
}

#[tokio::test]
async fn test_story_survives_unreachable_image_at_display_time() {
    let server = MockServer::start().await;
    // The image endpoint hands back a URL that will 404 when fetched.
    mount_chat_endpoints(&server, &server.uri()).await;

    let app = wire_app(&server, Box::new(TerminalDisplay::new()));
    let story = app.run("a magical forest").await.unwrap();

    // The display fetch failed, but the story text made it through intact.
    assert_eq!(story.story, "The forest hums at dusk.");
}

#[tokio::test]
async fn test_terminal_display_renders_fetched_image() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/generated.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(TINY_PNG))
        .mount(&server)
        .await;

    let story = Story {
        topic: "a magical forest".to_string(),
        story_line: "Animals form an orchestra".to_string(),
        image_prompt: "forest animals with instruments".to_string(),
        image_url: format!("{}/generated.png", server.uri()),
        story: "The forest hums at dusk.".to_string(),
    };

    TerminalDisplay::new().present(&story).await.unwrap();
}

#[tokio::test]
async fn test_mock_driven_pipeline_short_circuits_on_image_failure() {
    let chat = MockChatClient::new();
    let chat_probe = chat.clone();
    let image_gen = MockImageClient::new()
        .with_response(Err(Error::AiProvider("API error (status 503)".to_string())));

    let app = App::with_services(
        AppServices {
            chat: Box::new(chat),
            image_gen: Box::new(image_gen),
            display: Box::new(MockDisplay::new()),
        },
        fast_retry(),
        Duration::ZERO,
    );

    app.run("a magical forest").await.unwrap_err();
    assert_eq!(chat_probe.get_outline_call_count(), 1);
    assert_eq!(chat_probe.get_story_call_count(), 0);
}
