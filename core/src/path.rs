//! Domain references and resource paths.
//!
//! Paths are relative to the API root; the transport joins them with its
//! base URL.

use std::fmt;

use url::form_urlencoded;

/// A domain as the API accepts it in a path segment: numeric id or name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomainRef {
    ById(u64),
    ByName(String),
}

impl DomainRef {
    /// Names must be non-empty; an empty one would collapse the path.
    pub(crate) fn is_valid(&self) -> bool {
        match self {
            DomainRef::ById(_) => true,
            DomainRef::ByName(name) => !name.is_empty(),
        }
    }
}

impl fmt::Display for DomainRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainRef::ById(id) => write!(f, "{id}"),
            DomainRef::ByName(name) => f.write_str(name),
        }
    }
}

impl From<u64> for DomainRef {
    fn from(id: u64) -> Self {
        DomainRef::ById(id)
    }
}

impl From<&str> for DomainRef {
    fn from(name: &str) -> Self {
        DomainRef::ByName(name.to_string())
    }
}

impl From<String> for DomainRef {
    fn from(name: String) -> Self {
        DomainRef::ByName(name)
    }
}

impl From<&DomainRef> for DomainRef {
    fn from(domain: &DomainRef) -> Self {
        domain.clone()
    }
}

/// `domains/{domain}/records`
pub fn records_path(domain: &DomainRef) -> String {
    format!("domains/{domain}/records")
}

/// `domains/{domain}/records/{id}`
pub fn record_path(domain: &DomainRef, id: u64) -> String {
    format!("domains/{domain}/records/{id}")
}

/// Records path with the optional `name` and `type` filters. Empty filters
/// are left out, and with neither present there is no query string at all.
pub fn list_path(domain: &DomainRef, name: &str, record_type: &str) -> String {
    let mut path = records_path(domain);
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !name.is_empty() {
        query.append_pair("name", name);
    }
    if !record_type.is_empty() {
        query.append_pair("type", record_type);
    }
    let query = query.finish();
    if !query.is_empty() {
        path.push('?');
        path.push_str(&query);
    }
    path
}
