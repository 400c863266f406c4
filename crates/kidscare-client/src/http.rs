//! Shared HTTP plumbing for the REST API.

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use kidscare_core::config::ApiConfig;
use kidscare_core::error::{AppError, ErrorKind};
use kidscare_core::result::AppResult;
use kidscare_entity::user::DetailResponse;
use kidscare_session::SessionStore;

/// Which bearer token, if any, accompanies a request.
#[derive(Debug, Clone, Copy)]
enum Bearer<'a> {
    /// Whatever the session store holds at send time.
    Session,
    /// A token that is not in the store yet.
    Explicit(&'a str),
    /// No `Authorization` header.
    Omit,
}

/// HTTP client bound to the API base URL and the session store.
///
/// Cheap to clone; clones share the connection pool and the store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Base URL without a trailing slash.
    base_url: String,
    /// Underlying reqwest client.
    http: reqwest::Client,
    /// Source of the bearer token.
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client from the `[api]` configuration section.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    /// The session store this client reads its token from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET` with the session token.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.http.get(self.url(path)), Bearer::Session).await?;
        decode(response).await
    }

    /// `GET` with a token that has not been stored yet.
    pub async fn get_with_token<T: DeserializeOwned>(&self, path: &str, token: &str) -> AppResult<T> {
        let response = self
            .send(self.http.get(self.url(path)), Bearer::Explicit(token))
            .await?;
        decode(response).await
    }

    /// `POST` a JSON body with the session token.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.post(self.url(path)).json(body), Bearer::Session)
            .await?;
        decode(response).await
    }

    /// `POST` a JSON body without any credentials.
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.post(self.url(path)).json(body), Bearer::Omit)
            .await?;
        decode(response).await
    }

    /// `PUT` a JSON body with the session token.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.http.put(self.url(path)).json(body), Bearer::Session)
            .await?;
        decode(response).await
    }

    /// `DELETE` with the session token.
    ///
    /// Returns the server's `detail` message when the response carries one.
    pub async fn delete(&self, path: &str) -> AppResult<Option<String>> {
        let response = self
            .send(self.http.delete(self.url(path)), Bearer::Session)
            .await?;
        let text = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str::<DetailResponse>(&text)
            .ok()
            .map(|d| d.detail))
    }

    async fn send(&self, request: RequestBuilder, bearer: Bearer<'_>) -> AppResult<Response> {
        let request = match bearer {
            Bearer::Session => match self.session.token() {
                Some(token) => request.bearer_auth(token),
                None => request,
            },
            Bearer::Explicit(token) => request.bearer_auth(token),
            Bearer::Omit => request,
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "API response");

        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    response.json::<T>().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Unexpected response body: {e}"),
            e,
        )
    })
}

fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        "Could not reach the API server".to_string()
    } else {
        format!("Request failed: {err}")
    };
    AppError::with_source(ErrorKind::Network, message, err)
}

/// Map a non-success response to an error, carrying the server's `detail`.
pub(crate) fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = detail_message(body).unwrap_or_else(|| format!("HTTP {status}"));
    match status.as_u16() {
        401 => AppError::authentication(message),
        403 => AppError::authorization(message),
        404 => AppError::not_found(message),
        400 | 409 | 422 => AppError::validation(message),
        _ => AppError::api(message),
    }
}

/// Extract `detail` from an error body.
///
/// Plain strings are used as-is; validation error lists are joined by
/// their `msg` fields.
fn detail_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| {
                    let msg = item.get("msg")?.as_str()?;
                    let field = item
                        .get("loc")
                        .and_then(Value::as_array)
                        .and_then(|loc| loc.last())
                        .and_then(Value::as_str);
                    Some(match field {
                        Some(field) => format!("{field}: {msg}"),
                        None => msg.to_string(),
                    })
                })
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
