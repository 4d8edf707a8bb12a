//! Blocking `HttpClient` backed by ureq.

use std::fmt;

use tracing::trace;
use ureq::Agent;

use crate::config::{ClientConfig, Credentials};
use crate::error::{Result, TransportError};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// Executes record requests against the provider's API.
///
/// 4xx and 5xx responses are returned as data so `RecordClient` can
/// interpret them. No retries.
#[derive(Clone)]
pub struct UreqClient {
    agent: Agent,
    base_url: String,
    credentials: Credentials,
}

impl UreqClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let credentials = config.credentials()?;
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout()?))
            .build()
            .new_agent();
        Ok(Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn prepare<B>(&self, mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
        let (auth_name, auth_value) = self.credentials.header();
        builder = builder
            .header("accept", "application/json")
            .header(auth_name, auth_value);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }
}

impl HttpClient for UreqClient {
    fn send_request(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let url = self.url(&request.path);
        trace!(method = request.method.as_str(), %url, "ureq call");

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => self.prepare(self.agent.get(&url), &request).call(),
            (HttpMethod::Delete, _) => self.prepare(self.agent.delete(&url), &request).call(),
            (HttpMethod::Post, Some(body)) => self.prepare(self.agent.post(&url), &request).send(body.as_bytes()),
            (HttpMethod::Post, None) => self.prepare(self.agent.post(&url), &request).send_empty(),
            (HttpMethod::Put, Some(body)) => self.prepare(self.agent.put(&url), &request).send(body.as_bytes()),
            (HttpMethod::Put, None) => self.prepare(self.agent.put(&url), &request).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

impl fmt::Debug for UreqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}
