//! Mattermost client adapter tests against a mock server

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use voicepost::application::ports::{
    FileUploader, PostCreator, PostError, QuickReply, QuickReplyError, TranslationError,
    Translator, UploadError,
};
use voicepost::application::UploadPostPipeline;
use voicepost::application::VoiceMessageError;
use voicepost::domain::recording::ElapsedTime;
use voicepost::domain::voice::{CapturedAudioAsset, ChannelTarget, VoicePost};
use voicepost::infrastructure::MattermostClient;

fn recording(dir: &TempDir) -> CapturedAudioAsset {
    let path = dir.path().join("a.mp3");
    std::fs::write(&path, b"ID3fake-audio").unwrap();
    CapturedAudioAsset::new(format!("file://{}", path.display()), "client-1")
}

fn client(server: &MockServer) -> MattermostClient {
    MattermostClient::new(server.uri(), Some("tok".to_string()))
}

#[tokio::test]
async fn upload_sends_multipart_with_channel_and_client_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/files"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("name=\"channel_id\""))
        .and(body_string_contains("client-1"))
        .and(body_string_contains("ID3fake-audio"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "file_infos": [{"id": "F1", "name": "Voice Message.mp3"}],
            "client_ids": ["client-1"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let response = client(&server)
        .upload_file(&recording(&dir), "chan")
        .await
        .unwrap();

    assert_eq!(response.code, 201);
    let result = response.into_result().unwrap();
    assert_eq!(result.remote_file_id, "F1");
}

#[tokio::test]
async fn upload_server_error_is_a_status_not_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/files"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let response = client(&server)
        .upload_file(&recording(&dir), "chan")
        .await
        .unwrap();

    assert_eq!(response.code, 500);
    assert!(response.into_result().is_none());
}

#[tokio::test]
async fn upload_of_missing_file_is_read_failure() {
    let server = MockServer::start().await;
    let asset = CapturedAudioAsset::new("file:///nonexistent/voicepost.mp3", "client-1");

    let err = client(&server).upload_file(&asset, "chan").await.unwrap_err();

    assert!(matches!(err, UploadError::ReadFailed(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_post_sends_voice_post_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/posts"))
        .and(body_json(json!({
            "channel_id": "chan",
            "root_id": "",
            "message": "Voice Message",
            "type": "custom_voice",
            "props": {"fileId": "F1", "duration": 2500}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "P1"})))
        .expect(1)
        .mount(&server)
        .await;

    let target = ChannelTarget::new("chan", None).unwrap();
    let draft = VoicePost::new(target, "F1", ElapsedTime::from_millis(2_500)).to_draft();

    client(&server).create_post(&draft, &[]).await.unwrap();
}

#[tokio::test]
async fn create_post_rejection_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/posts"))
        .respond_with(ResponseTemplate::new(403).set_body_string("no permission"))
        .mount(&server)
        .await;

    let target = ChannelTarget::new("chan", None).unwrap();
    let draft = VoicePost::new(target, "F1", ElapsedTime::ZERO).to_draft();

    let err = client(&server).create_post(&draft, &[]).await.unwrap_err();
    match err {
        PostError::Rejected { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("no permission"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn pipeline_posts_after_upload_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/files"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "file_infos": [{"id": "F1"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/posts"))
        .and(body_string_contains("\"fileId\":\"F1\""))
        .and(body_string_contains("\"root_id\":\"thread\""))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = client(&server);
    let pipeline = UploadPostPipeline::new(client.clone(), client);
    let target = ChannelTarget::new("chan", Some("thread".into())).unwrap();

    let post = pipeline
        .run(recording(&dir), &target, ElapsedTime::from_millis(1_000))
        .await
        .unwrap();
    assert_eq!(post.file_id, "F1");
}

#[tokio::test]
async fn pipeline_never_posts_when_upload_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v4/files"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v4/posts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let client = client(&server);
    let pipeline = UploadPostPipeline::new(client.clone(), client);
    let target = ChannelTarget::new("chan", None).unwrap();

    let err = pipeline
        .run(recording(&dir), &target, ElapsedTime::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, VoiceMessageError::UploadFailure(_)));
}

#[tokio::test]
async fn translate_returns_translation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/plugins/com.mattermost.plugin-translate-button/api/v1/translate",
        ))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"text": "hello", "from": "en", "to": "de"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translation": "hallo"})))
        .mount(&server)
        .await;

    let text = client(&server).translate("hello", "en", "de").await.unwrap();
    assert_eq!(text, "hallo");
}

#[tokio::test]
async fn translate_failures_collapse_to_one_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server).translate("hello", "en", "de").await.unwrap_err();
    assert!(matches!(err, TranslationError::Failed));
    assert_eq!(err.to_string(), "Translation failed");
}

#[tokio::test]
async fn translate_without_token_makes_no_request() {
    let server = MockServer::start().await;
    let client = MattermostClient::new(server.uri(), None);

    let err = client.translate("hello", "en", "de").await.unwrap_err();

    assert!(matches!(err, TranslationError::MissingToken));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn quick_reply_returns_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/plugins/com.mattermost.plugin-forward-message/api/v1/quick-reply",
        ))
        .and(body_json(json!({"postId": "p1", "channelId": "c1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK"})))
        .mount(&server)
        .await;

    let status = client(&server).quick_reply("p1", "c1").await.unwrap();
    assert_eq!(status, "OK");
}

#[tokio::test]
async fn quick_reply_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let err = client(&server).quick_reply("p1", "c1").await.unwrap_err();
    assert!(matches!(err, QuickReplyError::Rejected { status: 404, .. }));
}
