mod session;
mod settings;

pub use session::AuthSession;
pub use settings::{OAuthSettings, DEFAULT_CALLBACK_PATH, DEFAULT_CALLBACK_PORT, DEFAULT_CLIENT_ID};

use chrono::Utc;
use oauth2::{basic::BasicClient, AuthUrl, ClientId, CsrfToken, RedirectUrl, Scope};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use url::Url;

use crate::common::{TokenPair, TokenResponse};
use crate::error::AuthError;
use crate::server::CallbackListener;

pub const DEFAULT_AUTH_BASE: &str = "https://quail.ink";

const AUTH_PATH: &str = "/oauth/authorize";
const TOKEN_PATH: &str = "/oauth/token";
const SCOPES: [&str; 2] = ["user.full", "post.write"];

/// Public OAuth client: no client secret, plain PKCE challenge.
pub struct OAuthClient {
    http_client: Client,
    auth_base: String,
    api_base: String,
    settings: OAuthSettings,
}

impl OAuthClient {
    pub fn new(
        auth_base: impl Into<String>,
        api_base: impl Into<String>,
        settings: OAuthSettings,
    ) -> Result<Self, AuthError> {
        settings.validate().map_err(AuthError::Configuration)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AuthError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            auth_base: auth_base.into().trim_end_matches('/').to_string(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            settings,
        })
    }

    pub fn settings(&self) -> &OAuthSettings {
        &self.settings
    }

    /// Build the URL the user opens to authorize this client.
    pub fn authorization_url(
        &self,
        session: &AuthSession,
        redirect_uri: &str,
    ) -> Result<Url, AuthError> {
        let client = BasicClient::new(ClientId::new(self.settings.client_id.clone()))
            .set_auth_uri(AuthUrl::new(format!("{}{}", self.auth_base, AUTH_PATH))?)
            .set_redirect_uri(RedirectUrl::new(redirect_uri.to_string())?);

        let csrf_token = CsrfToken::new(session.state().to_string());
        let (auth_url, _) = client
            .authorize_url(|| csrf_token)
            .add_scopes(SCOPES.iter().map(|s| Scope::new(s.to_string())))
            .add_extra_param("code_challenge", session.code_challenge().to_string())
            .add_extra_param("code_challenge_method", "plain")
            .url();

        Ok(auth_url)
    }

    /// Run the full authorization-code flow.
    ///
    /// `present` receives the authorization URL once the loopback listener is
    /// ready; the call then blocks until the browser is redirected back (or
    /// the configured timeout elapses) and exchanges the code exactly once.
    pub async fn login<F>(&self, present: F) -> Result<TokenPair, AuthError>
    where
        F: FnOnce(&Url),
    {
        let session = Arc::new(AuthSession::new());

        let listener =
            CallbackListener::bind(self.settings.callback_port, &self.settings.callback_path)
                .await?;
        let redirect_uri = listener.redirect_uri()?;
        let auth_url = self.authorization_url(&session, &redirect_uri)?;

        let span = tracing::info_span!("login", state = %session.state());
        async move {
            tracing::info!(redirect_uri = %redirect_uri, "Initiated login");

            present(&auth_url);

            let code = listener
                .wait_for_code(session.clone(), self.settings.login_timeout())
                .await?;

            self.exchange_code(&code, session.code_verifier(), &redirect_uri)
                .await
        }
        .instrument(span)
        .await
    }

    /// Exchange a refresh token for a renewed pair.
    ///
    /// Fields the server omits come back blank; merge with
    /// [`TokenPair::inherit_missing`] before storing.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        tracing::debug!("Token refresh requested");

        let tokens = self
            .request_token(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.settings.client_id.as_str()),
            ])
            .await?;

        tracing::info!("Token refresh successful");
        Ok(tokens)
    }

    /// Exchange an authorization code for tokens
    pub(crate) async fn exchange_code(
        &self,
        code: &str,
        verifier: &str,
        redirect_uri: &str,
    ) -> Result<TokenPair, AuthError> {
        let tokens = self
            .request_token(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", self.settings.client_id.as_str()),
                ("code_verifier", verifier),
            ])
            .await?;

        tracing::debug!(expiry = ?tokens.expiry, "Successfully exchanged code for tokens");
        Ok(tokens)
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenPair, AuthError> {
        let url = format!("{}{}", self.api_base, TOKEN_PATH);

        let response = self.http_client.post(&url).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = %status, "Token endpoint returned an error");
            return Err(AuthError::BadResponse(format!("({}) {}", status, body)));
        }

        let raw: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::BadResponse(format!("Invalid token response: {}", e)))?;

        raw.into_token_pair(Utc::now())
            .ok_or_else(|| AuthError::BadResponse("No access token in response".to_string()))
    }
}
