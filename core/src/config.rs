//! Connection settings for the provider's API.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.dnsimple.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the API lives and how to authenticate against it.
///
/// Either `email` + `token` (account API token) or `domain_token` must be
/// set. Deserializes from any serde format; missing fields take defaults.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub email: Option<String>,
    pub token: Option<String>,
    pub domain_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: None,
            token: None,
            domain_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Account API token authentication against the default endpoint.
    pub fn with_api_token(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Single-domain token authentication against the default endpoint.
    pub fn with_domain_token(token: impl Into<String>) -> Self {
        Self {
            domain_token: Some(token.into()),
            ..Self::default()
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read `DNSIMPLE_API_URL`, `DNSIMPLE_EMAIL`, `DNSIMPLE_TOKEN`,
    /// `DNSIMPLE_DOMAIN_TOKEN` and `DNSIMPLE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("DNSIMPLE_API_URL") {
            config.base_url = url;
        }
        config.email = lookup("DNSIMPLE_EMAIL");
        config.token = lookup("DNSIMPLE_TOKEN");
        config.domain_token = lookup("DNSIMPLE_DOMAIN_TOKEN");
        if let Some(secs) = lookup("DNSIMPLE_TIMEOUT_SECS") {
            config.timeout_secs = secs
                .parse()
                .map_err(|_| Error::Config(format!("DNSIMPLE_TIMEOUT_SECS is not a number: {secs}")))?;
        }
        config.timeout()?;
        config.credentials()?;
        Ok(config)
    }

    /// Whole-request timeout; must be at least one second.
    pub fn timeout(&self) -> Result<Duration> {
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(Duration::from_secs(self.timeout_secs))
    }

    /// The authentication header this configuration selects.
    pub fn credentials(&self) -> Result<Credentials> {
        let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
        match (non_empty(&self.email), non_empty(&self.token), non_empty(&self.domain_token)) {
            (Some(email), Some(token), _) => Ok(Credentials::ApiToken { email, token }),
            (_, _, Some(token)) => Ok(Credentials::DomainToken(token)),
            (None, Some(_), None) => Err(Error::Config("an API token needs an email".to_string())),
            _ => Err(Error::Config(
                "set email and token, or a domain token".to_string(),
            )),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("token", &self.token.as_ref().map(|_| "<REDACTED>"))
            .field("domain_token", &self.domain_token.as_ref().map(|_| "<REDACTED>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Authentication for a request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiToken { email: String, token: String },
    DomainToken(String),
}

impl Credentials {
    /// Header name and value carrying these credentials.
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Credentials::ApiToken { email, token } => ("X-DNSimple-Token", format!("{email}:{token}")),
            Credentials::DomainToken(token) => ("X-DNSimple-Domain-Token", token.clone()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiToken { email, .. } => f
                .debug_struct("ApiToken")
                .field("email", email)
                .field("token", &"<REDACTED>")
                .finish(),
            Credentials::DomainToken(_) => f.debug_tuple("DomainToken").field(&"<REDACTED>").finish(),
        }
    }
}
