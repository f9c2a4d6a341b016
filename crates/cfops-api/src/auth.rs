use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::Error;

/// Supplies bearer tokens for Cloud Controller requests.
///
/// Called once per request. Implementations decide whether to cache;
/// refresh policy is theirs, never the client's.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self) -> Result<SecretString, Error>;
}

/// A bearer token supplied up front by the caller (e.g. `cf oauth-token`).
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: SecretString,
}

impl StaticToken {
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<SecretString, Error> {
        Ok(self.token.clone())
    }
}
