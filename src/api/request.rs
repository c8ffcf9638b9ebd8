//! Requests handed to the backend worker and the events it sends back.

use super::fence::Generation;
use super::ApiError;
use crate::model::{EntityKind, Record};
use serde_json::Value;
use std::path::PathBuf;

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: String, value: String },
    File { name: String, path: PathBuf },
}

/// Body of a create or update request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Multipart(Vec<Part>),
}

impl Payload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Payload::Json(value) => Some(value),
            Payload::Multipart(_) => None,
        }
    }

    /// Text parts named `name`, in order.
    pub fn text_parts(&self, name: &str) -> Vec<&str> {
        match self {
            Payload::Multipart(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    Part::Text { name: n, value } if n == name => Some(value.as_str()),
                    _ => None,
                })
                .collect(),
            Payload::Json(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    List { kind: EntityKind },
    Create { kind: EntityKind, payload: Payload },
    Update { kind: EntityKind, id: i64, payload: Payload },
    Delete { kind: EntityKind, id: i64 },
}

impl ApiRequest {
    pub fn operation(&self) -> Operation {
        match self {
            ApiRequest::List { kind } => Operation::List(*kind),
            ApiRequest::Create { kind, .. } => Operation::Create(*kind),
            ApiRequest::Update { kind, id, .. } => Operation::Update(*kind, *id),
            ApiRequest::Delete { kind, id } => Operation::Delete(*kind, *id),
        }
    }
}

/// What a finished request was, without its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List(EntityKind),
    Create(EntityKind),
    Update(EntityKind, i64),
    Delete(EntityKind, i64),
}

impl Operation {
    pub fn kind(self) -> EntityKind {
        match self {
            Operation::List(kind)
            | Operation::Create(kind)
            | Operation::Update(kind, _)
            | Operation::Delete(kind, _) => kind,
        }
    }
}

/// Successful outcome of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Records(Vec<Record>),
    Saved,
    Deleted,
}

/// A request tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub generation: Generation,
    pub request: ApiRequest,
}

/// Outcome of a dispatched request, delivered back to the UI thread.
#[derive(Debug)]
pub struct ApiEvent {
    pub generation: Generation,
    pub operation: Operation,
    pub result: Result<Reply, ApiError>,
}
