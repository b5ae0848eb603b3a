//! HTTP transport with bearer authentication and one-shot re-login.
//!
//! Every request goes through [`HttpTransport::send`], which:
//! 1. attaches `Authorization: Bearer <token>` when the session holds a token
//! 2. on a 401, logs in again with the stored email and password, saves the new
//!    tokens and retries the original request once
//! 3. if re-login is impossible or fails, clears the session and returns
//!    [`DineError::AuthExpired`]
//!
//! The network itself sits behind [`HttpExecutor`] so tests can script
//! responses without a server.

use crate::auth::Session;
use crate::domain::error::{DineError, Result};
use crate::domain::AuthResponse;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

const UNAUTHORIZED: u16 = 401;

/// A request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A fully resolved request handed to an [`HttpExecutor`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DineError::Decode`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Executes prepared requests. Implementations must not retry on their own.
pub trait HttpExecutor: Send + Sync {
    fn execute(&self, request: PreparedRequest) -> BoxFuture<'_, Result<RawResponse>>;
}

/// [`HttpExecutor`] backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    /// # Errors
    ///
    /// Returns [`DineError::Network`] if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: PreparedRequest) -> BoxFuture<'_, Result<RawResponse>> {
        async move {
            let mut builder = self
                .client
                .request(request.method, request.url)
                .header(CONTENT_TYPE, "application/json");
            if let Some(token) = request.bearer {
                builder = builder.bearer_auth(token);
            }
            if let Some(body) = request.body {
                builder = builder.json(&body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(RawResponse { status, body })
        }
        .boxed()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Maps non-2xx responses to [`DineError::Api`], keeping the server's `message`.
///
/// # Errors
///
/// Returns [`DineError::Api`] for any status outside `200..300`.
pub fn ensure_success(response: RawResponse) -> Result<RawResponse> {
    if (200..300).contains(&response.status) {
        return Ok(response);
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|b| b.message);
    Err(DineError::Api {
        status: response.status,
        message,
    })
}

#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    session: Session,
    executor: Arc<dyn HttpExecutor>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, session: Session, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            executor,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn prepare(&self, request: &ApiRequest, bearer: Option<String>) -> Result<PreparedRequest> {
        let raw = format!("{}{}", self.base_url, request.path);
        let mut url = Url::parse(&raw)
            .map_err(|e| DineError::Config(format!("invalid request URL {raw}: {e}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(PreparedRequest {
            method: request.method.clone(),
            url,
            bearer,
            body: request.body.clone(),
        })
    }

    /// Sends an authenticated request, re-logging in once on a 401.
    ///
    /// # Errors
    ///
    /// - [`DineError::Network`] if no response arrived
    /// - [`DineError::AuthExpired`] if the 401 could not be recovered
    /// - [`DineError::Api`] for any other non-success status
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let token = self.session.token()?;
        let response = self.executor.execute(self.prepare(&request, token)?).await?;
        if response.status != UNAUTHORIZED {
            return ensure_success(response);
        }

        tracing::info!(path = %request.path, "request unauthorized, re-authenticating");
        match self.reauthenticate().await {
            Ok(token) => {
                let retry = self.executor.execute(self.prepare(&request, Some(token))?).await?;
                ensure_success(retry)
            }
            Err(e) => {
                tracing::warn!(error = %e, "re-authentication failed, clearing session");
                if let Err(clear_err) = self.session.clear() {
                    tracing::error!(error = %clear_err, "failed to clear session");
                }
                Err(DineError::AuthExpired)
            }
        }
    }

    /// Sends a request without a bearer token and without 401 recovery.
    ///
    /// Used for the login and register calls themselves.
    ///
    /// # Errors
    ///
    /// [`DineError::Network`] or [`DineError::Api`].
    pub async fn send_unauthenticated(&self, request: ApiRequest) -> Result<RawResponse> {
        let response = self.executor.execute(self.prepare(&request, None)?).await?;
        ensure_success(response)
    }

    /// Sends an authenticated request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Anything [`send`](Self::send) returns, plus [`DineError::Decode`].
    pub async fn get_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        self.send(request).await?.json()
    }

    async fn reauthenticate(&self) -> Result<String> {
        let credentials = self
            .session
            .credentials()?
            .ok_or_else(|| DineError::Storage("no stored credentials".to_string()))?;

        let request = ApiRequest::post(LOGIN_PATH, serde_json::to_value(&credentials)?);
        let auth: AuthResponse = self.send_unauthenticated(request).await?.json()?;
        self.session.save_auth(&auth)?;
        tracing::debug!("re-authentication succeeded");
        Ok(auth.token)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned responses and records every request it sees.
    #[derive(Default)]
    pub struct ScriptedExecutor {
        responses: Mutex<VecDeque<Result<RawResponse>>>,
        pub seen: Mutex<Vec<PreparedRequest>>,
    }

    impl ScriptedExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
            if let Ok(mut queue) = self.responses.lock() {
                queue.push_back(Ok(RawResponse { status, body: body.into() }));
            }
            self
        }

        pub fn fail(&self, message: &str) -> &Self {
            if let Ok(mut queue) = self.responses.lock() {
                queue.push_back(Err(DineError::Network(message.to_string())));
            }
            self
        }

        pub fn requests(&self) -> Vec<PreparedRequest> {
            self.seen.lock().map(|s| s.clone()).unwrap_or_default()
        }
    }

    impl HttpExecutor for ScriptedExecutor {
        fn execute(&self, request: PreparedRequest) -> BoxFuture<'_, Result<RawResponse>> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request);
            }
            let next = self
                .responses
                .lock()
                .ok()
                .and_then(|mut q| q.pop_front())
                .unwrap_or_else(|| Err(DineError::Network("no scripted response".to_string())));
            async move { next }.boxed()
        }
    }
}
