// UAA password-grant token provider.
//
// Exchanges a username/password for an access token at the UAA token
// endpoint advertised by `/v2/info`. The token is fetched once and reused
// for the lifetime of the provider.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::Error;
use crate::transport::TransportConfig;

/// The OAuth client the `cf` CLI registers on every foundation.
pub const DEFAULT_CLIENT_ID: &str = "cf";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Deserialize)]
struct UaaErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Password-grant token provider backed by a UAA server.
pub struct UaaTokenProvider {
    http: reqwest::Client,
    token_url: Url,
    client_id: String,
    client_secret: SecretString,
    username: String,
    password: SecretString,
    token: OnceCell<SecretString>,
}

impl UaaTokenProvider {
    /// Build a provider for the given UAA base URL (the `token_endpoint`
    /// from `/v2/info`, without the `/oauth/token` suffix).
    pub fn new(
        uaa_url: &Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(uaa_url, http, username, password)
    }

    /// Build a provider around an existing `reqwest::Client`.
    pub fn with_client(
        uaa_url: &Url,
        http: reqwest::Client,
        username: String,
        password: SecretString,
    ) -> Result<Self, Error> {
        let base = uaa_url.as_str().trim_end_matches('/');
        let token_url = Url::parse(&format!("{base}/oauth/token"))?;
        Ok(Self {
            http,
            token_url,
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            client_secret: SecretString::from(String::new()),
            username,
            password,
            token: OnceCell::new(),
        })
    }

    /// Use a non-default OAuth client.
    pub fn with_oauth_client(mut self, client_id: String, client_secret: SecretString) -> Self {
        self.client_id = client_id;
        self.client_secret = client_secret;
        self
    }

    async fn request_token(&self) -> Result<SecretString, Error> {
        debug!(url = %self.token_url, username = %self.username, "requesting UAA token");

        let form = [
            ("grant_type", "password"),
            ("username", self.username.as_str()),
            ("password", self.password.expose_secret()),
        ];
        let resp = self
            .http
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<UaaErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or_else(|| format!("UAA returned HTTP {status}"));
            return Err(Error::Authentication { message });
        }

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("invalid UAA token response: {e}"),
                body: String::new(),
            })?;

        if let Some(kind) = token.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                return Err(Error::Authentication {
                    message: format!("unsupported token type '{kind}'"),
                });
            }
        }

        Ok(SecretString::from(token.access_token))
    }
}

#[async_trait]
impl TokenProvider for UaaTokenProvider {
    async fn token(&self) -> Result<SecretString, Error> {
        self.token
            .get_or_try_init(|| self.request_token())
            .await
            .cloned()
    }
}
