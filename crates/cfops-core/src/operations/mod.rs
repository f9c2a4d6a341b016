// ── Operations facade ──
//
// Entry point for consumers. Each verb runs in a fixed order: targeted
// context, then named dependencies, then the primary request, then (for
// asynchronous platform operations) job polling. Every step waits for the
// previous one; nothing is fetched concurrently and nothing is retried.

mod applications;
mod domains;
mod lookup;
mod organizations;
mod routes;
mod services;
mod spaces;

use std::sync::Arc;

use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use cfops_api::v2::types::JobResource;
use cfops_api::{
    CloudControllerClient, StaticToken, TlsMode, TokenProvider, TransportConfig, UaaTokenProvider,
};

use crate::config::{AuthCredentials, ClientConfig, TlsVerification};
use crate::context::Context;
use crate::error::CoreError;
use crate::job::{self, PollConfig};
use crate::resolve::NameResolution;

pub use applications::Applications;
pub use domains::Domains;
pub use organizations::Organizations;
pub use routes::Routes;
pub use services::Services;
pub use spaces::Spaces;

/// Platform code for "the app is already bound to the service instance".
pub const APP_ALREADY_BOUND: i64 = 90_003;
/// Platform code for "the route and service instance are already bound".
pub const ROUTE_ALREADY_BOUND: i64 = 130_008;

/// Tunables for an [`Operations`] instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationSettings {
    pub poll: PollConfig,
    /// Applied to applications, services, plans, domains, and so on.
    /// The targeted organization and space use the [`Context`]'s own mode.
    pub name_resolution: NameResolution,
}

/// Name-based operations against one Cloud Controller, scoped to one
/// targeted organization and space.
pub struct Operations {
    client: Arc<CloudControllerClient>,
    context: Context,
    settings: OperationSettings,
    cancel: CancellationToken,
}

impl Operations {
    pub fn new(
        client: Arc<CloudControllerClient>,
        context: Context,
        settings: OperationSettings,
    ) -> Self {
        Self {
            client,
            context,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Build the HTTP client and token provider from `config`.
    ///
    /// Password auth first reads `/v2/info` to find UAA. No organization or
    /// space lookup happens here; those wait for the first operation that
    /// needs them.
    pub async fn connect(config: &ClientConfig) -> Result<Self, CoreError> {
        let transport = build_transport(config);
        let http = transport.build_client()?;

        let tokens: Arc<dyn TokenProvider> = match &config.auth {
            AuthCredentials::Token(token) => Arc::new(StaticToken::new(token.clone())),
            AuthCredentials::Password {
                username,
                password,
                client_id,
                client_secret,
            } => {
                let info =
                    CloudControllerClient::discover_info(config.api_url.as_str(), &http).await?;
                let uaa_url = Url::parse(&info.token_endpoint).map_err(|e| CoreError::Config {
                    message: format!("invalid UAA endpoint '{}': {e}", info.token_endpoint),
                })?;
                debug!(uaa = %uaa_url, "discovered UAA");

                let mut uaa = UaaTokenProvider::with_client(
                    &uaa_url,
                    http.clone(),
                    username.clone(),
                    password.clone(),
                )?;
                if let Some(client_id) = client_id {
                    let secret = client_secret
                        .clone()
                        .unwrap_or_else(|| SecretString::from(String::new()));
                    uaa = uaa.with_oauth_client(client_id.clone(), secret);
                }
                Arc::new(uaa)
            }
        };

        let client = Arc::new(CloudControllerClient::with_client(
            config.api_url.as_str(),
            http,
            tokens,
        )?);
        let context = Context::new(
            Arc::clone(&client),
            config.organization.clone(),
            config.space.clone(),
            config.name_resolution,
        );
        let settings = OperationSettings {
            poll: config.poll,
            name_resolution: config.name_resolution,
        };
        Ok(Self::new(client, context, settings))
    }

    /// Replace the token that cancels job polling.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Cancelling this token stops any job polling in progress.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn client(&self) -> &CloudControllerClient {
        &self.client
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn settings(&self) -> &OperationSettings {
        &self.settings
    }

    // ── Sub-facades ──────────────────────────────────────────────────

    pub fn organizations(&self) -> Organizations<'_> {
        Organizations::new(self)
    }

    pub fn spaces(&self) -> Spaces<'_> {
        Spaces::new(self)
    }

    pub fn applications(&self) -> Applications<'_> {
        Applications::new(self)
    }

    pub fn services(&self) -> Services<'_> {
        Services::new(self)
    }

    pub fn routes(&self) -> Routes<'_> {
        Routes::new(self)
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self)
    }

    // ── Shared helpers ───────────────────────────────────────────────

    pub(crate) fn mode(&self) -> NameResolution {
        self.settings.name_resolution
    }

    pub(crate) async fn await_job(&self, job: JobResource) -> Result<JobResource, CoreError> {
        job::wait_for_completion(&self.client, job, &self.settings.poll, &self.cancel).await
    }
}

/// Treat one platform error code as success (`Ok(None)`).
///
/// Only the documented idempotent codes are passed here.
pub(crate) fn tolerate_code<T>(
    result: Result<T, cfops_api::Error>,
    code: i64,
) -> Result<Option<T>, CoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.platform_code() == Some(code) => {
            warn!(code, "{e}; treating as success");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn build_transport(config: &ClientConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform_error(code: i64) -> cfops_api::Error {
        cfops_api::Error::CloudController {
            status: 400,
            code: Some(code),
            error_code: None,
            description: "already bound".into(),
        }
    }

    #[test]
    fn tolerates_only_the_given_code() {
        let ok = tolerate_code::<()>(Err(platform_error(ROUTE_ALREADY_BOUND)), ROUTE_ALREADY_BOUND);
        assert!(matches!(ok, Ok(None)));

        let err = tolerate_code::<()>(Err(platform_error(APP_ALREADY_BOUND)), ROUTE_ALREADY_BOUND);
        assert!(matches!(err, Err(CoreError::Api { code: Some(90_003), .. })));
    }

    #[test]
    fn passes_success_through() {
        assert!(matches!(tolerate_code(Ok(7), APP_ALREADY_BOUND), Ok(Some(7))));
    }
}
