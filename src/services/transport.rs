// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP transport to the coupon REST API.
//!
//! Handles:
//! - Attaching the bearer token and the last-update header to every request
//! - Mapping non-2xx responses to [`AppError::Api`]
//! - Recording the last successful exchange on the session

use crate::error::{AppError, Result};
use crate::session::Session;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Header carrying the epoch-millisecond time of the last successful exchange.
pub const LAST_UPDATE_HEADER: &str = "lupd";

/// Shared HTTP client for the coupon API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bind the client to one session. Everything sent through the returned
    /// transport carries that session's credentials.
    pub fn transport(&self, session: &Session) -> Transport {
        Transport {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session: session.clone(),
        }
    }
}

/// Session-bound transport. Call sites never handle credentials themselves.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl Transport {
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(last_update) = self.session.last_update() {
            builder = builder.header(LAST_UPDATE_HEADER, last_update.to_string());
        }
        builder
    }

    /// Send a request and return the successful response.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            self.session.touch();
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Coupon API request rejected");
        Err(AppError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    async fn json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("JSON parse error: {}", e)))
    }

    async fn text(response: reqwest::Response) -> Result<String> {
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;
        Ok(unquote(body))
    }

    /// GET with a JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::json(response).await
    }

    /// GET with query parameters and a plain-text response.
    pub async fn get_text_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<String> {
        tracing::debug!(path, "GET");
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Self::text(response).await
    }

    /// POST a JSON body, expecting a JSON response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(path, "POST");
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::json(response).await
    }

    /// POST a JSON body, expecting a text response.
    pub async fn post_json_for_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String> {
        tracing::debug!(path, "POST");
        let response = self
            .send(self.request(Method::POST, path).json(body))
            .await?;
        Self::text(response).await
    }

    /// POST without a body, expecting a text response.
    pub async fn post_empty(&self, path: &str) -> Result<String> {
        tracing::debug!("POST");
        let response = self.send(self.request(Method::POST, path)).await?;
        Self::text(response).await
    }

    /// PUT a JSON body, expecting a text response.
    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String> {
        tracing::debug!(path, "PUT");
        let response = self
            .send(self.request(Method::PUT, path).json(body))
            .await?;
        Self::text(response).await
    }

    /// DELETE, expecting a text response.
    pub async fn delete(&self, path: &str) -> Result<String> {
        tracing::debug!(path, "DELETE");
        let response = self.send(self.request(Method::DELETE, path)).await?;
        Self::text(response).await
    }
}

/// Plain-text endpoints sometimes answer with a JSON string literal.
fn unquote(body: String) -> String {
    match serde_json::from_str::<String>(&body) {
        Ok(inner) => inner,
        Err(_) => body,
    }
}

/// Extract a human-readable message from an error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.trim().to_string()),
        Ok(serde_json::Value::String(s)) => s,
        _ => body.trim().to_string(),
    }
}
