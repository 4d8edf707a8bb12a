//! Stateless request builder and response parser for the record endpoints.
//!
//! # Design
//! `RecordClient` carries no state. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! the matching `HttpResponse`; `RecordService` glues the two together over
//! an `HttpClient`, and callers doing their own I/O can use the halves
//! directly.
//!
//! Status policy: reads succeed on any 2xx, creates on 200 or 201, updates
//! and deletes on exactly 200. A 404 on a read or an update is `NotFound`, a
//! 400 on an update is `Validation`. Every other status is `Api`, except on
//! delete, where it is `Deletion`. Only a success status is decoded, so a
//! body-less 204 is never mistaken for malformed JSON.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::path::{list_path, record_path, records_path, DomainRef};
use crate::types::{Envelope, Record, RecordUpdate};

/// Builds record requests and parses their responses without any I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordClient;

impl RecordClient {
    pub fn new() -> Self {
        Self
    }

    pub fn build_list_records(&self, domain: &DomainRef, name: &str, record_type: &str) -> Result<HttpRequest> {
        check_domain(domain)?;
        Ok(HttpRequest::new(HttpMethod::Get, list_path(domain, name, record_type)))
    }

    /// The id, domain and timestamps of `record` are the server's to assign
    /// and are never sent.
    pub fn build_create_record(&self, domain: &DomainRef, record: &Record) -> Result<HttpRequest> {
        check_domain(domain)?;
        let body = encode(&Envelope::new(record.without_server_fields()))?;
        Ok(HttpRequest::new(HttpMethod::Post, records_path(domain)).with_json(body))
    }

    pub fn build_retrieve_record(&self, domain: &DomainRef, id: u64) -> Result<HttpRequest> {
        check_domain(domain)?;
        if id == 0 {
            return Err(Error::MissingField("record id"));
        }
        Ok(HttpRequest::new(HttpMethod::Get, record_path(domain, id)))
    }

    /// `target` must come from the server (it needs `id` and `domain_id`).
    /// Only name, content, ttl and priority of `attributes` are sent.
    pub fn build_update_record(&self, target: &Record, attributes: &Record) -> Result<HttpRequest> {
        let path = target_path(target)?;
        let body = encode(&Envelope::new(RecordUpdate::from(attributes)))?;
        Ok(HttpRequest::new(HttpMethod::Put, path).with_json(body))
    }

    pub fn build_delete_record(&self, target: &Record) -> Result<HttpRequest> {
        Ok(HttpRequest::new(HttpMethod::Delete, target_path(target)?))
    }

    pub fn parse_list_records(&self, response: HttpResponse) -> Result<Vec<Record>> {
        check_status(&response)?;
        let wrapped: Vec<Envelope<Record>> = decode(&response.body)?;
        Ok(wrapped.into_iter().map(Envelope::into_inner).collect())
    }

    pub fn parse_create_record(&self, response: HttpResponse) -> Result<Record> {
        if !matches!(response.status, 200 | 201) {
            warn!(status = response.status, "record creation rejected");
            return Err(Error::Api {
                status: response.status,
                body: response.body,
            });
        }
        decode_record(&response.body)
    }

    pub fn parse_retrieve_record(&self, response: HttpResponse) -> Result<Record> {
        check_status(&response)?;
        decode_record(&response.body)
    }

    pub fn parse_update_record(&self, response: HttpResponse) -> Result<Record> {
        if response.status == 400 {
            warn!(body = %response.body, "record update failed validation");
            return Err(Error::Validation { body: response.body });
        }
        check_status(&response)?;
        if response.status != 200 {
            warn!(status = response.status, "record update answered without a record");
            return Err(Error::Api {
                status: response.status,
                body: response.body,
            });
        }
        decode_record(&response.body)
    }

    pub fn parse_delete_record(&self, response: HttpResponse) -> Result<()> {
        if response.status == 200 {
            return Ok(());
        }
        warn!(status = response.status, "record deletion failed");
        Err(Error::Deletion { status: response.status })
    }
}

/// Path of an existing record, taken from its own `domain_id` and `id`.
fn target_path(target: &Record) -> Result<String> {
    if target.id == 0 {
        return Err(Error::MissingField("record id"));
    }
    if target.domain_id == 0 {
        return Err(Error::MissingField("record domain_id"));
    }
    Ok(record_path(&DomainRef::ById(target.domain_id), target.id))
}

fn check_domain(domain: &DomainRef) -> Result<()> {
    if domain.is_valid() {
        Ok(())
    } else {
        Err(Error::MissingField("domain name"))
    }
}

/// Map non-success status codes to the appropriate `Error` variant.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    warn!(status = response.status, "unexpected API status");
    if response.status == 404 {
        return Err(Error::NotFound);
    }
    Err(Error::Api {
        status: response.status,
        body: response.body.clone(),
    })
}

fn encode<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| TransportError::Encode(e).into())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| TransportError::Decode(e).into())
}

fn decode_record(body: &str) -> Result<Record> {
    decode::<Envelope<Record>>(body).map(Envelope::into_inner)
}
