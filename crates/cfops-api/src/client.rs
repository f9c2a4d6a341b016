// Cloud Controller HTTP client
//
// Wraps `reqwest::Client` with bearer-token injection, URL construction,
// and Cloud Controller error parsing. Endpoint groups (v2 organizations,
// v2 services, v3 resources, ...) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use std::sync::Arc;

use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::TokenProvider;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::v2::types::Info;

// ── Error response shapes ────────────────────────────────────────────

/// v2: `{"code": 130008, "description": "...", "error_code": "CF-..."}`
#[derive(serde::Deserialize)]
struct V2ErrorResponse {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

/// v3: `{"errors": [{"code": 10010, "title": "CF-...", "detail": "..."}]}`
#[derive(serde::Deserialize)]
struct V3ErrorResponse {
    errors: Vec<V3ErrorItem>,
}

#[derive(serde::Deserialize)]
struct V3ErrorItem {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Cloud Controller API (v2 and v3 endpoints).
///
/// Every request carries `Authorization: bearer <token>` obtained from the
/// configured [`TokenProvider`]. Non-2xx responses are surfaced as
/// [`Error::CloudController`] with the platform's own code and description.
pub struct CloudControllerClient {
    http: reqwest::Client,
    api_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl CloudControllerClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API endpoint (e.g. `https://api.sys.example.com`),
    /// a token provider, and transport settings.
    pub fn new(
        api_url: &str,
        tokens: Arc<dyn TokenProvider>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(api_url, http, tokens)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(
        api_url: &str,
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, Error> {
        let api_url = normalize_api_url(api_url)?;
        Ok(Self {
            http,
            api_url,
            tokens,
        })
    }

    /// The Cloud Controller API root.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"v2/organizations"`) onto the API root.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.api_url.join(path)?)
    }

    async fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder, Error> {
        let token = self.tokens.token().await?;
        Ok(builder.bearer_auth(token.expose_secret()))
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.authorized(self.http.get(url)).await?.send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .authorized(self.http.get(url).query(params))
            .await?
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        params: &[(String, String)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .authorized(self.http.post(url).query(params).json(body))
            .await?
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .authorized(self.http.put(url).json(body))
            .await?
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.authorized(self.http.delete(url)).await?.send().await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn delete_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("DELETE {url} params={params:?}");

        let resp = self
            .authorized(self.http.delete(url).query(params))
            .await?
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: parse_error_body(status, raw).to_string(),
            };
        }

        parse_error_body(status, raw)
    }

    // ── Unauthenticated endpoints ────────────────────────────────────

    /// `GET /v2/info`: foundation metadata including the UAA endpoints.
    ///
    /// Sent without a token.
    pub async fn get_info(&self) -> Result<Info, Error> {
        Self::discover_info(self.api_url.as_str(), &self.http).await
    }

    /// `GET /v2/info` before any client exists. Password auth uses this to
    /// find the UAA `token_endpoint` it needs to build a token provider.
    pub async fn discover_info(api_url: &str, http: &reqwest::Client) -> Result<Info, Error> {
        let url = normalize_api_url(api_url)?.join("v2/info")?;
        debug!("GET {url}");

        let resp = http.get(url).send().await?;
        Self::handle_response(resp).await
    }
}

/// Ensure the API root ends with `/` so relative joins keep its path.
fn normalize_api_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

/// Map a non-2xx body onto [`Error::CloudController`], preferring the v3
/// error list, then the v2 shape, then the raw text.
fn parse_error_body(status: reqwest::StatusCode, raw: String) -> Error {
    if let Ok(v3) = serde_json::from_str::<V3ErrorResponse>(&raw) {
        if let Some(first) = v3.errors.into_iter().next() {
            return Error::CloudController {
                status: status.as_u16(),
                code: first.code,
                description: first
                    .detail
                    .or_else(|| first.title.clone())
                    .unwrap_or_else(|| status.to_string()),
                error_code: first.title,
            };
        }
    }

    if let Ok(v2) = serde_json::from_str::<V2ErrorResponse>(&raw) {
        if v2.code.is_some() || v2.description.is_some() {
            return Error::CloudController {
                status: status.as_u16(),
                code: v2.code,
                error_code: v2.error_code,
                description: v2.description.unwrap_or_else(|| status.to_string()),
            };
        }
    }

    Error::CloudController {
        status: status.as_u16(),
        code: None,
        error_code: None,
        description: if raw.is_empty() {
            status.to_string()
        } else {
            raw
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v2_error_body() {
        let raw = r#"{"code":130008,"description":"The route and service instance are already bound.","error_code":"CF-ServiceInstanceAlreadyBoundToSameRoute"}"#;
        let err = parse_error_body(reqwest::StatusCode::BAD_REQUEST, raw.into());

        assert_eq!(err.platform_code(), Some(130_008));
        assert_eq!(
            err.error_code(),
            Some("CF-ServiceInstanceAlreadyBoundToSameRoute")
        );
        assert!(err.to_string().contains("already bound"));
    }

    #[test]
    fn parses_v3_error_body() {
        let raw = r#"{"errors":[{"code":10010,"title":"CF-ResourceNotFound","detail":"App not found"}]}"#;
        let err = parse_error_body(reqwest::StatusCode::NOT_FOUND, raw.into());

        assert!(err.is_not_found());
        assert_eq!(err.platform_code(), Some(10010));
        assert_eq!(err.error_code(), Some("CF-ResourceNotFound"));
    }

    #[test]
    fn normalizes_api_root_with_path() {
        let url = normalize_api_url("https://example.com/cf").map(|u| u.join("v2/info"));
        assert_eq!(
            url.ok().and_then(Result::ok).map(String::from),
            Some("https://example.com/cf/v2/info".to_owned())
        );
    }

    #[test]
    fn falls_back_to_raw_body() {
        let err = parse_error_body(reqwest::StatusCode::BAD_GATEWAY, "upstream down".into());
        match err {
            Error::CloudController {
                status,
                description,
                code,
                ..
            } => {
                assert_eq!(status, 502);
                assert_eq!(description, "upstream down");
                assert_eq!(code, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
