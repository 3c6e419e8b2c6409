//! API client for communicating with the SchoolHub REST backend.
//!
//! Every request goes through [`ApiClient::send`], which attaches the bearer
//! token read from the session store at send time and applies the shared
//! failure policy: a 401 logs the user out and navigates to the login route,
//! everything else is handed back to the caller untouched.

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::SessionStore;
use crate::config::{normalize_base_url, Config};
use crate::models::{LoginForm, Profile, Role, Validate};
use crate::navigation::{Navigator, Route};

use super::{ApiError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Credential exchange endpoint
const LOGIN_PATH: &str = "/api/auth/login";

/// User agent sent with every request
const USER_AGENT: &str = concat!("schoolhub/", env!("CARGO_PKG_VERSION"));

/// Message used when a rejected login carries no body
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Credential exchange response. Some backends nest the profile under
/// `user`, others return it flat next to the token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    token: String,
    role: Role,
    #[serde(default)]
    user: Option<Profile>,
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default, alias = "fullName")]
    name: Option<String>,
}

impl AuthResponse {
    fn into_parts(self, login_email: &str) -> (String, Profile) {
        let profile = match self.user {
            Some(user) => user,
            None => Profile {
                id: self.id.unwrap_or_default(),
                email: self.email.unwrap_or_else(|| login_email.to_string()),
                role: self.role,
                name: self.name,
            },
        };
        (self.token, profile)
    }
}

/// API client for the SchoolHub backend.
/// Clone is cheap - reqwest::Client and the session store are both shared handles.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `base_url` bound to `session`. `navigator` is told
    /// to go to the login route whenever the backend answers 401.
    pub fn new(base_url: &str, session: SessionStore, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        debug!(base_url = %base_url, "API client created");
        Ok(Self {
            client,
            base_url,
            session,
            navigator,
        })
    }

    /// Create a client for the endpoint resolved from `override_url`, the
    /// environment and `config`, in that order.
    pub fn from_config(
        config: &Config,
        override_url: Option<&str>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        Self::new(&config.base_url(override_url)?, session, navigator)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Start a request against a backend path. Send it with [`ApiClient::send`].
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    /// Attach the current bearer token, if any. Read live on every call.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send an authenticated request and apply the failure policy.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = self.authorize(request).build()?;
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = self.client.execute(request).await?;
        self.check_response(response).await
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, url = %url, "Request failed");

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }
        Err(ApiError::from_status(status, &body))
    }

    /// The backend no longer accepts our identity: drop it and go to login.
    fn handle_unauthorized(&self) {
        warn!("Session rejected by backend, logging out");
        self.session.logout();
        self.navigator.navigate(Route::Login);
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let url = response.url().clone();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", url, e))
        })
    }

    pub(super) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    pub(super) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::decode(response).await
    }

    pub(super) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::decode(response).await
    }

    /// Send a request whose response body is not needed
    pub(super) async fn send_no_content(&self, method: Method, path: &str) -> Result<()> {
        self.send(self.request(method, path)).await?;
        Ok(())
    }

    // ===== Authentication =====

    /// Exchange credentials for a token and store the new session.
    ///
    /// Sent without a bearer token. A 401 here means bad credentials, not an
    /// expired session, so it is reported as `InvalidCredentials` and the
    /// logout/redirect policy does not apply.
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile> {
        let form = LoginForm::new(email, password);
        form.validate()?;

        let response = self
            .client
            .post(self.url(LOGIN_PATH))
            .json(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED {
                let message = ApiError::extract_message(&body);
                let message = if message.is_empty() {
                    INVALID_CREDENTIALS_MESSAGE.to_string()
                } else {
                    message
                };
                return Err(ApiError::InvalidCredentials(message));
            }
            return Err(ApiError::from_status(status, &body));
        }

        let auth: AuthResponse = Self::decode(response).await?;
        let (token, profile) = auth.into_parts(&form.email);

        self.session.set_auth(token, profile.clone());
        info!(user_id = profile.id, role = %profile.role, "Logged in");
        Ok(profile)
    }

    /// Forget the current session. No backend call is needed.
    pub fn logout(&self) {
        self.session.logout();
    }
}
