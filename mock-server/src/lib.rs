use std::{
    collections::BTreeMap,
    net::{Ipv4Addr, Ipv6Addr},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const TOKEN_HEADER: &str = "x-dnsimple-token";
pub const DOMAIN_TOKEN_HEADER: &str = "x-dnsimple-domain-token";

/// Domain every fresh server starts with.
pub const SEED_DOMAIN_ID: u64 = 1;
pub const SEED_DOMAIN_NAME: &str = "example.com";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: u64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    pub domain_id: u64,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub record_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prio: Option<u32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub record: T,
}

#[derive(Deserialize)]
pub struct CreateRecord {
    #[serde(default)]
    pub name: String,
    pub content: Option<String>,
    pub record_type: Option<String>,
    pub ttl: Option<u32>,
    pub prio: Option<u32>,
}

#[derive(Deserialize)]
pub struct UpdateRecord {
    pub name: Option<String>,
    pub content: Option<String>,
    pub ttl: Option<u32>,
    pub prio: Option<u32>,
}

#[derive(Deserialize)]
pub struct ListFilter {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
}

pub const DEFAULT_TTL: u32 = 3600;

#[derive(Debug)]
pub struct Store {
    domains: Vec<Domain>,
    records: BTreeMap<u64, Record>,
    next_id: u64,
}

impl Store {
    pub fn with_domains(domains: Vec<Domain>) -> Self {
        Self {
            domains,
            records: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Accepts a domain id or a domain name, like the real API.
    fn domain(&self, key: &str) -> Option<&Domain> {
        let id = key.parse::<u64>().ok();
        self.domains
            .iter()
            .find(|d| Some(d.id) == id || d.name == key)
    }
}

pub type Db = Arc<RwLock<Store>>;

/// JSON error body with a status, as the API sends it.
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(serde_json::json!({ "message": self.1 }))).into_response()
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError(StatusCode::NOT_FOUND, format!("{what} not found"))
}

pub fn app() -> Router {
    app_with_domains(vec![Domain {
        id: SEED_DOMAIN_ID,
        name: SEED_DOMAIN_NAME.to_string(),
    }])
}

pub fn app_with_domains(domains: Vec<Domain>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_domains(domains)));
    let api = Router::new()
        .route("/domains/{domain}/records", get(list_records).post(create_record))
        .route(
            "/domains/{domain}/records/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .layer(middleware::from_fn(require_token))
        .with_state(db);
    Router::new().nest("/v1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_token(request: Request, next: Next) -> Result<Response, ApiError> {
    let headers = request.headers();
    if headers.contains_key(TOKEN_HEADER) || headers.contains_key(DOMAIN_TOKEN_HEADER) {
        Ok(next.run(request).await)
    } else {
        Err(ApiError(StatusCode::UNAUTHORIZED, "authentication failed".to_string()))
    }
}

/// Address records must hold an address of their family.
fn validate_content(record_type: &str, content: &str) -> Result<(), ApiError> {
    let valid = match record_type.to_ascii_uppercase().as_str() {
        "A" => content.parse::<Ipv4Addr>().is_ok(),
        "AAAA" => content.parse::<Ipv6Addr>().is_ok(),
        _ => !content.is_empty(),
    };
    if valid {
        Ok(())
    } else {
        Err(ApiError(
            StatusCode::BAD_REQUEST,
            format!("content {content:?} is invalid for a {record_type} record"),
        ))
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

async fn list_records(
    State(db): State<Db>,
    Path(domain): Path<String>,
    Query(filter): Query<ListFilter>,
) -> Result<Json<Vec<Envelope<Record>>>, ApiError> {
    let store = db.read().await;
    let domain = store.domain(&domain).ok_or_else(|| not_found("domain"))?;
    let records = store
        .records
        .values()
        .filter(|r| r.domain_id == domain.id)
        .filter(|r| filter.name.as_deref().map_or(true, |name| r.name == name))
        .filter(|r| {
            filter
                .record_type
                .as_deref()
                .map_or(true, |t| r.record_type.eq_ignore_ascii_case(t))
        })
        .cloned()
        .map(|record| Envelope { record })
        .collect();
    Ok(Json(records))
}

async fn create_record(
    State(db): State<Db>,
    Path(domain): Path<String>,
    Json(input): Json<Envelope<CreateRecord>>,
) -> Result<(StatusCode, Json<Envelope<Record>>), ApiError> {
    let input = input.record;
    let mut store = db.write().await;
    let domain_id = store.domain(&domain).ok_or_else(|| not_found("domain"))?.id;

    let content = input.content.filter(|c| !c.is_empty());
    let record_type = input.record_type.filter(|t| !t.is_empty());
    let (Some(content), Some(record_type)) = (content, record_type) else {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            "content and record_type are required".to_string(),
        ));
    };
    validate_content(&record_type, &content)?;

    let id = store.next_id;
    store.next_id += 1;
    let timestamp = now();
    let record = Record {
        id,
        domain_id,
        name: input.name,
        content,
        ttl: input.ttl.unwrap_or(DEFAULT_TTL),
        record_type: record_type.to_ascii_uppercase(),
        prio: input.prio,
        created_at: timestamp.clone(),
        updated_at: timestamp,
    };
    store.records.insert(id, record.clone());
    info!(id, domain_id, name = %record.name, "record created");
    Ok((StatusCode::CREATED, Json(Envelope { record })))
}

fn find<'a>(store: &'a Store, domain: &str, id: u64) -> Result<&'a Record, ApiError> {
    let domain = store.domain(domain).ok_or_else(|| not_found("domain"))?;
    store
        .records
        .get(&id)
        .filter(|r| r.domain_id == domain.id)
        .ok_or_else(|| not_found("record"))
}

async fn get_record(
    State(db): State<Db>,
    Path((domain, id)): Path<(String, u64)>,
) -> Result<Json<Envelope<Record>>, ApiError> {
    let store = db.read().await;
    let record = find(&store, &domain, id)?.clone();
    Ok(Json(Envelope { record }))
}

async fn update_record(
    State(db): State<Db>,
    Path((domain, id)): Path<(String, u64)>,
    Json(input): Json<Envelope<UpdateRecord>>,
) -> Result<Json<Envelope<Record>>, ApiError> {
    let input = input.record;
    let mut store = db.write().await;
    let existing = find(&store, &domain, id)?;
    if let Some(content) = &input.content {
        validate_content(&existing.record_type, content)?;
    }

    let record = store.records.get_mut(&id).ok_or_else(|| not_found("record"))?;
    if let Some(name) = input.name {
        record.name = name;
    }
    if let Some(content) = input.content {
        record.content = content;
    }
    if let Some(ttl) = input.ttl {
        record.ttl = ttl;
    }
    if let Some(prio) = input.prio {
        record.prio = Some(prio);
    }
    record.updated_at = now();
    info!(id, "record updated");
    Ok(Json(Envelope { record: record.clone() }))
}

async fn delete_record(
    State(db): State<Db>,
    Path((domain, id)): Path<(String, u64)>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    find(&store, &domain, id)?;
    store.records.remove(&id);
    info!(id, "record deleted");
    Ok(StatusCode::OK)
}
