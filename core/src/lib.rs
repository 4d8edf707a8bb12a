//! Synchronous client core for the DNSimple record API.
//!
//! # Overview
//! Lists, creates, fetches, updates and deletes the DNS records of a domain,
//! plus `update_ip` for dynamic DNS. The core maps operations onto requests
//! and responses onto records or typed errors; executing the HTTP exchange
//! is left to an [`HttpClient`].
//!
//! # Design
//! - `RecordClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`.
//! - `RecordService` owns an injected `HttpClient` and runs one
//!   build/send/parse cycle per operation. No caching, no retries.
//! - `UreqClient` is the bundled blocking transport; tests substitute
//!   their own.
//! - Records always travel in the `{"record": ...}` envelope, and updates
//!   go through `RecordUpdate`, which only has the fields the API lets a
//!   client change.
//!
//! ```no_run
//! use dnsimple_core::{Record, RecordService, UreqClient};
//!
//! # fn main() -> dnsimple_core::Result<()> {
//! let records = RecordService::new(UreqClient::from_env()?);
//! for record in records.list_records("example.com", "home", "A")? {
//!     records.update_ip(&record, "203.0.113.5")?;
//! }
//! let created = records.create_record("example.com", &Record::new("www", "CNAME", "example.com"))?;
//! records.delete_record(&created)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod path;
pub mod service;
pub mod transport;
pub mod types;

pub use client::RecordClient;
pub use config::{ClientConfig, Credentials};
pub use error::{Error, Result, TransportError};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use path::DomainRef;
pub use service::RecordService;
pub use transport::UreqClient;
pub use types::{Envelope, Record, RecordUpdate};
