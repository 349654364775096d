use anyhow::{bail, Context};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};

use crate::database::NoteView;

/// Thin HTTP client for the notes API
pub struct NotesClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl NotesClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub async fn list(&self) -> anyhow::Result<Vec<NoteView>> {
        let res = self.authorized(self.http.get(self.url("/notes")))?.send().await?;
        let res = check(res).await?;
        res.json::<Vec<NoteView>>()
            .await
            .context("failed to decode notes response")
    }

    pub async fn add(&self, message: &str) -> anyhow::Result<()> {
        let res = self
            .authorized(self.http.post(self.url("/notes")))?
            .json(&json!({ "message": message }))
            .send()
            .await?;
        check(res).await?;
        Ok(())
    }

    /// Returns the status code alongside the body; a degraded server answers 503
    pub async fn health(&self) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.http.get(self.url("/health")).send().await?;
        let status = res.status();
        let body = res.json::<Value>().await.context("failed to decode health response")?;
        Ok((status, body))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> anyhow::Result<RequestBuilder> {
        match &self.token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => bail!("no token supplied; pass --token or set NOTES_TOKEN"),
        }
    }
}

async fn check(res: Response) -> anyhow::Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED {
        bail!("server rejected the token ({})", body.trim());
    }
    bail!("server returned {}: {}", status, body.trim())
}
