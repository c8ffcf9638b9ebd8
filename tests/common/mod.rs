//! Shared test utilities for the integration tests.
//!
//! Provides `FakeBackend`, an in-process stand-in for the cinema REST API
//! served by axum on an ephemeral port. It keeps records in memory, records
//! every request it receives, and can be told to fail the next request of a
//! given method.

#![allow(dead_code)]

use axum::body::to_bytes;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use cinedk::api::{ApiClient, ApiEvent, Dispatch};
use cinedk::shell::Shell;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Body of a recorded request.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedBody {
    Empty,
    Json(Value),
    /// `(name, value)` in arrival order; file parts carry their file name
    Multipart(Vec<(String, RecordedPart)>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPart {
    Text(String),
    File { file_name: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Percent-decoded resource segment, e.g. `gêneros`
    pub resource: String,
    pub id: Option<i64>,
    pub body: RecordedBody,
}

impl RecordedBody {
    pub fn text_parts(&self, name: &str) -> Vec<String> {
        match self {
            RecordedBody::Multipart(parts) => parts
                .iter()
                .filter(|(n, _)| n == name)
                .filter_map(|(_, p)| match p {
                    RecordedPart::Text(value) => Some(value.clone()),
                    RecordedPart::File { .. } => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Default)]
struct Store {
    records: HashMap<String, Vec<Value>>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    failures: Vec<(Method, u16)>,
}

type Shared = Arc<Mutex<Store>>;

/// In-memory cinema backend.
pub struct FakeBackend {
    pub base_url: String,
    store: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let store: Shared = Arc::new(Mutex::new(Store {
            next_id: 1,
            ..Store::default()
        }));

        let app = Router::new()
            .route("/{resource}/", get(list).post(create))
            .route("/{resource}/{id}/", axum::routing::put(update).delete(remove))
            .with_state(store.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            store,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, None).unwrap()
    }

    /// Insert a record under `resource`; an `id` is assigned when missing.
    pub fn seed(&self, resource: &str, mut record: Value) -> i64 {
        let mut store = self.store.lock().unwrap();
        let id = match record.get("id").and_then(Value::as_i64) {
            Some(id) => id,
            None => {
                let id = store.next_id;
                record["id"] = json!(id);
                id
            }
        };
        store.next_id = store.next_id.max(id + 1);
        store.records.entry(resource.to_string()).or_default().push(record);
        id
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        let store = self.store.lock().unwrap();
        store.records.get(resource).cloned().unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.store.lock().unwrap().requests.clone()
    }

    /// Last request with `method`, if any.
    pub fn last(&self, method: Method) -> Option<RecordedRequest> {
        self.requests().into_iter().rev().find(|r| r.method == method)
    }

    /// Answer the next request with `method` with `status` instead of
    /// handling it.
    pub fn fail_next(&self, method: Method, status: u16) {
        self.store.lock().unwrap().failures.push((method, status));
    }
}

/// Run every dispatch against the backend and feed the outcomes back, until
/// the shell stops asking for more.
pub async fn drive(shell: &mut Shell, client: &ApiClient, mut pending: Vec<Dispatch>) {
    while !pending.is_empty() {
        let mut next = Vec::new();
        for dispatch in pending {
            let event: ApiEvent = client.dispatch(dispatch).await;
            next.extend(shell.apply_event(event));
        }
        pending = next;
    }
}

fn take_failure(store: &mut Store, method: &Method) -> Option<StatusCode> {
    let index = store.failures.iter().position(|(m, _)| m == method)?;
    let (_, status) = store.failures.remove(index);
    StatusCode::from_u16(status).ok()
}

fn record(store: &mut Store, method: Method, resource: &str, id: Option<i64>, body: RecordedBody) {
    store.requests.push(RecordedRequest {
        method,
        resource: resource.to_string(),
        id,
        body,
    });
}

fn failed(status: StatusCode) -> Response {
    (status, Json(json!({"detail": "injected failure"}))).into_response()
}

async fn list(State(store): State<Shared>, Path(resource): Path<String>) -> Response {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::GET, &resource, None, RecordedBody::Empty);
    if let Some(status) = take_failure(&mut store, &Method::GET) {
        return failed(status);
    }
    let records = store.records.get(&resource).cloned().unwrap_or_default();
    Json(Value::Array(records)).into_response()
}

async fn create(State(store): State<Shared>, Path(resource): Path<String>, request: Request) -> Response {
    let body = read_body(request).await;
    let mut store = store.lock().unwrap();
    record(&mut store, Method::POST, &resource, None, body.clone());
    if let Some(status) = take_failure(&mut store, &Method::POST) {
        return failed(status);
    }
    let mut value = stored_value(&body);
    let id = store.next_id;
    store.next_id += 1;
    value.insert("id".to_string(), json!(id));
    let value = Value::Object(value);
    store.records.entry(resource).or_default().push(value.clone());
    (StatusCode::CREATED, Json(value)).into_response()
}

async fn update(
    State(store): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
    request: Request,
) -> Response {
    let body = read_body(request).await;
    let mut store = store.lock().unwrap();
    record(&mut store, Method::PUT, &resource, Some(id), body.clone());
    if let Some(status) = take_failure(&mut store, &Method::PUT) {
        return failed(status);
    }
    let mut value = stored_value(&body);
    value.insert("id".to_string(), json!(id));
    let records = store.records.entry(resource).or_default();
    match records.iter_mut().find(|r| r["id"] == json!(id)) {
        Some(existing) => {
            *existing = Value::Object(value.clone());
            Json(Value::Object(value)).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn remove(State(store): State<Shared>, Path((resource, id)): Path<(String, i64)>) -> Response {
    let mut store = store.lock().unwrap();
    record(&mut store, Method::DELETE, &resource, Some(id), RecordedBody::Empty);
    if let Some(status) = take_failure(&mut store, &Method::DELETE) {
        return failed(status);
    }
    let records = store.records.entry(resource).or_default();
    let before = records.len();
    records.retain(|r| r["id"] != json!(id));
    if records.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

async fn read_body(request: Request) -> RecordedBody {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        let mut parts = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.unwrap().to_vec();
            let part = match file_name {
                Some(file_name) => RecordedPart::File { file_name, bytes },
                None => RecordedPart::Text(String::from_utf8(bytes).unwrap()),
            };
            parts.push((name, part));
        }
        return RecordedBody::Multipart(parts);
    }

    let bytes = to_bytes(request.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        RecordedBody::Empty
    } else {
        RecordedBody::Json(serde_json::from_slice(&bytes).unwrap())
    }
}

/// What the backend keeps for a create/update body. Multipart text parts
/// are typed the way a form parser would: integers and booleans become
/// JSON values, and repeated names become arrays.
fn stored_value(body: &RecordedBody) -> Map<String, Value> {
    match body {
        RecordedBody::Json(Value::Object(map)) => map.clone(),
        RecordedBody::Multipart(parts) => {
            let mut map = Map::new();
            for (name, part) in parts {
                let value = match part {
                    RecordedPart::Text(text) => typed(text),
                    RecordedPart::File { file_name, .. } => json!(format!("/media/{}", file_name)),
                };
                let repeated = parts.iter().filter(|(n, _)| n == name).count() > 1;
                if repeated {
                    map.entry(name.clone())
                        .or_insert_with(|| Value::Array(Vec::new()))
                        .as_array_mut()
                        .unwrap()
                        .push(value);
                } else {
                    map.insert(name.clone(), value);
                }
            }
            map
        }
        _ => Map::new(),
    }
}

fn typed(text: &str) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        json!(n)
    } else if text == "true" || text == "false" {
        json!(text == "true")
    } else {
        json!(text)
    }
}
