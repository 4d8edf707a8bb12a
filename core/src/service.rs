//! Record operations over an injected HTTP collaborator.

use tracing::debug;

use crate::client::RecordClient;
use crate::error::Result;
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::path::DomainRef;
use crate::types::Record;

/// Lists, creates, fetches, updates and deletes the records of a domain.
///
/// Holds nothing but its collaborator; every call issues exactly one
/// request and reports the outcome once, without retrying. It is as safe to
/// share between threads as the collaborator is.
#[derive(Debug, Clone)]
pub struct RecordService<C> {
    http: C,
    client: RecordClient,
}

impl<C: HttpClient> RecordService<C> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            client: RecordClient::new(),
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Records of `domain`, in server order, optionally filtered by name
    /// and type. Empty filters are not sent.
    pub fn list_records(
        &self,
        domain: impl Into<DomainRef>,
        name: &str,
        record_type: &str,
    ) -> Result<Vec<Record>> {
        let request = self
            .client
            .build_list_records(&domain.into(), name, record_type)?;
        let response = self.execute(request)?;
        self.client.parse_list_records(response)
    }

    /// Create `record` under `domain` and return it as stored, with its id,
    /// domain id and timestamps filled in.
    pub fn create_record(&self, domain: impl Into<DomainRef>, record: &Record) -> Result<Record> {
        let request = self.client.build_create_record(&domain.into(), record)?;
        let response = self.execute(request)?;
        self.client.parse_create_record(response)
    }

    pub fn retrieve_record(&self, domain: impl Into<DomainRef>, id: u64) -> Result<Record> {
        let request = self.client.build_retrieve_record(&domain.into(), id)?;
        let response = self.execute(request)?;
        self.client.parse_retrieve_record(response)
    }

    /// Apply the name, content, ttl and priority of `attributes` to `target`.
    /// Anything else set on `attributes` is ignored.
    pub fn update_record(&self, target: &Record, attributes: &Record) -> Result<Record> {
        let request = self.client.build_update_record(target, attributes)?;
        let response = self.execute(request)?;
        self.client.parse_update_record(response)
    }

    pub fn delete_record(&self, target: &Record) -> Result<()> {
        let request = self.client.build_delete_record(target)?;
        let response = self.execute(request)?;
        self.client.parse_delete_record(response)
    }

    /// Point `target` at a new address, keeping its name.
    pub fn update_ip(&self, target: &Record, ip: &str) -> Result<()> {
        let attributes = Record {
            name: target.name.clone(),
            content: ip.to_string(),
            ..Record::default()
        };
        self.update_record(target, &attributes).map(|_| ())
    }

    /// Hand a built request to the collaborator's matching call. Deletes go
    /// through `send_request` unchanged.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = match request.method {
            HttpMethod::Get => self.http.get(&request.path),
            HttpMethod::Post => self.http.post(&request.path, request.body.unwrap_or_default()),
            HttpMethod::Put => self.http.put(&request.path, request.body.unwrap_or_default()),
            HttpMethod::Delete => self.http.send_request(request),
        }?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}
