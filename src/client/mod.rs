//! Session client
//!
//! The client half of the session-trust contract: persists the token
//! returned by a successful login under a fixed key, attaches it to every
//! protected call, and treats any verification failure uniformly by
//! clearing the stored token and demanding re-authentication. There is no
//! refresh path; a dead session always goes back through login.

use reqwest::Client;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ErrorBody;
use crate::models::{
    CreateQuoteRequest, LoginRequest, LoginResponse, LoginUser, QuoteResponse, QuotesResponse,
    RegisterRequest, RegisterResponse, VerifyResponse,
};

mod store;

pub use store::TokenStore;

/// Session client errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// No usable session. Callers should route the user to the login view.
    #[error("Authentication required")]
    LoginRequired,

    /// The server rejected the request for a non-session reason.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Token storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

/// API client holding the session token
pub struct SessionClient {
    http: Client,
    base_url: String,
    store: TokenStore,
}

impl SessionClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>, store: TokenStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a new account. Does not log in; the caller proceeds to
    /// `login` with the same credentials.
    pub async fn register(&self, req: &RegisterRequest) -> Result<RegisterResponse, SessionError> {
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(req)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Log in and persist the issued token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginUser, SessionError> {
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let body: LoginResponse = response.json().await?;
        self.store.save(&body.token)?;

        Ok(body.user)
    }

    /// Check the stored session against the server.
    ///
    /// Call this before rendering any protected view. Any failure — no
    /// stored token, or a 401/403 from the server — clears the store and
    /// yields `LoginRequired`; the client does not care why verification
    /// failed.
    pub async fn verify_session(&self) -> Result<VerifyResponse, SessionError> {
        let token = self.store.load().ok_or(SessionError::LoginRequired)?;

        let response = self
            .http
            .get(self.url("/api/verify-token"))
            .bearer_auth(&token)
            .send()
            .await?;

        if !response.status().is_success() {
            self.store.clear()?;
            return Err(SessionError::LoginRequired);
        }

        Ok(response.json().await?)
    }

    /// Fetch the community feed
    pub async fn fetch_quotes(&self) -> Result<QuotesResponse, SessionError> {
        let response = self.protected(self.http.get(self.url("/api/quotes"))).await?;

        Ok(response.json().await?)
    }

    /// Submit a new quote
    pub async fn submit_quote(&self, text: &str) -> Result<QuoteResponse, SessionError> {
        let request = self
            .http
            .post(self.url("/api/quotes"))
            .json(&CreateQuoteRequest {
                text: text.to_string(),
            });
        let response = self.protected(request).await?;

        Ok(response.json().await?)
    }

    /// Like a quote
    pub async fn like_quote(&self, quote_id: Uuid) -> Result<QuoteResponse, SessionError> {
        let request = self
            .http
            .post(self.url(&format!("/api/quotes/{}/like", quote_id)));
        let response = self.protected(request).await?;

        Ok(response.json().await?)
    }

    /// Drop the session. Logout is client-local: the server holds no
    /// session state, so discarding the token is all there is.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        Ok(())
    }

    /// Attach the stored token and send. 401 and 403 both collapse into
    /// `LoginRequired` after clearing the store.
    async fn protected(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, SessionError> {
        let token = self.store.load().ok_or(SessionError::LoginRequired)?;

        let response = request.bearer_auth(&token).send().await?;

        match response.status().as_u16() {
            401 | 403 => {
                self.store.clear()?;
                Err(SessionError::LoginRequired)
            }
            _ if !response.status().is_success() => Err(Self::api_error(response).await),
            _ => Ok(response),
        }
    }

    async fn api_error(response: reqwest::Response) -> SessionError {
        let status = response.status().as_u16();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => "Request failed".to_string(),
        };

        SessionError::Api { status, message }
    }
}
