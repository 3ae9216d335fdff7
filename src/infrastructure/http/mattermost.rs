//! Mattermost REST client adapter
//!
//! One client implements every server-facing port: file upload, post
//! creation and the translate and quick-reply plugin endpoints.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::application::ports::{
    FileUploader, PostCreator, PostError, QuickReply, QuickReplyError, TranslationError,
    Translator, UploadError,
};
use crate::domain::voice::{CapturedAudioAsset, PostDraft, UploadData, UploadResponse};

const FILES_ROUTE: &str = "/api/v4/files";
const POSTS_ROUTE: &str = "/api/v4/posts";

/// Translate plugin endpoint
pub const TRANSLATE_ROUTE: &str = "/plugins/com.mattermost.plugin-translate-button/api/v1/translate";

/// Quick reply plugin endpoint
pub const QUICK_REPLY_ROUTE: &str = "/plugins/com.mattermost.plugin-forward-message/api/v1/quick-reply";

// Request and response types

#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    #[serde(flatten)]
    draft: &'a PostDraft,
    #[serde(skip_serializing_if = "no_files")]
    file_ids: &'a [String],
}

fn no_files(ids: &&[String]) -> bool {
    ids.is_empty()
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    from: &'a str,
    to: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translation: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuickReplyRequest<'a> {
    post_id: &'a str,
    channel_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct QuickReplyResponse {
    status: String,
}

/// Mattermost server client. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct MattermostClient {
    server_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl MattermostClient {
    /// Create a client for `server_url`, authenticating with `token` when given
    pub fn new(server_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
            client: reqwest::Client::new(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, route: &str) -> String {
        format!("{}{}", self.server_url, route)
    }

    fn post(&self, route: &str) -> RequestBuilder {
        let request = self.client.post(self.url(route));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn error_body(response: reqwest::Response) -> String {
        response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string())
    }
}

#[async_trait]
impl FileUploader for MattermostClient {
    async fn upload_file(
        &self,
        asset: &CapturedAudioAsset,
        channel_id: &str,
    ) -> Result<UploadResponse, UploadError> {
        let path = asset.local_path();
        let bytes = fs::read(&path)
            .await
            .map_err(|e| UploadError::ReadFailed(format!("{}: {}", path.display(), e)))?;
        debug!(path = %path.display(), size = bytes.len(), "uploading file");

        let file = Part::bytes(bytes)
            .file_name(asset.file_name())
            .mime_str(asset.mime_type().as_str())
            .map_err(|e| UploadError::RequestFailed(e.to_string()))?;
        let form = Form::new()
            .text("channel_id", channel_id.to_string())
            .text("client_ids", asset.client_id().to_string())
            .part("files", file);

        let response = self
            .post(FILES_ROUTE)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::RequestFailed(e.to_string()))?;

        let code = response.status().as_u16();
        if !response.status().is_success() {
            let body = Self::error_body(response).await;
            warn!(code, %body, "upload rejected");
            return Ok(UploadResponse::status_only(code));
        }

        let data: UploadData = response
            .json()
            .await
            .map_err(|e| UploadError::ParseError(e.to_string()))?;

        Ok(UploadResponse {
            code,
            data: Some(data),
        })
    }
}

#[async_trait]
impl PostCreator for MattermostClient {
    async fn create_post(&self, draft: &PostDraft, file_ids: &[String]) -> Result<(), PostError> {
        let body = CreatePostRequest { draft, file_ids };

        let response = self
            .post(POSTS_ROUTE)
            .json(&body)
            .send()
            .await
            .map_err(|e| PostError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostError::Rejected {
                status: status.as_u16(),
                message: Self::error_body(response).await,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Translator for MattermostClient {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, TranslationError> {
        if self.token.is_none() {
            return Err(TranslationError::MissingToken);
        }

        let body = TranslateRequest { text, from, to };
        let response = self.post(TRANSLATE_ROUTE).json(&body).send().await.map_err(|e| {
            warn!(error = %e, "translate request failed");
            TranslationError::Failed
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "translate rejected");
            return Err(TranslationError::Failed);
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "translate response unreadable");
            TranslationError::Failed
        })?;

        parsed.translation.ok_or(TranslationError::Failed)
    }
}

#[async_trait]
impl QuickReply for MattermostClient {
    async fn quick_reply(
        &self,
        post_id: &str,
        channel_id: &str,
    ) -> Result<String, QuickReplyError> {
        let body = QuickReplyRequest {
            post_id,
            channel_id,
        };

        let response = self
            .post(QUICK_REPLY_ROUTE)
            .json(&body)
            .send()
            .await
            .map_err(|e| QuickReplyError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuickReplyError::Rejected {
                status: status.as_u16(),
                message: Self::error_body(response).await,
            });
        }

        let parsed: QuickReplyResponse = response
            .json()
            .await
            .map_err(|e| QuickReplyError::RequestFailed(e.to_string()))?;
        Ok(parsed.status)
    }
}
