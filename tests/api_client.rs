//! `ApiClient` against the in-process fake backend.

mod common;

use axum::http::Method;
use cinedk::api::{ApiError, Part, Payload};
use cinedk::model::{EntityKind, Record};
use common::{FakeBackend, RecordedBody, RecordedPart};
use serde_json::json;
use std::io::Write;

fn comedy() -> serde_json::Value {
    json!({"name": "Comedy", "description": "", "isActive": true, "popularity": "A"})
}

#[tokio::test]
async fn test_list_decodes_records_in_order() {
    let backend = FakeBackend::start().await;
    backend.seed("cinemas", json!({"name": "Roxy", "address": "Rua A", "openingHours": "10h-22h", "contactNumber": "555"}));
    backend.seed("cinemas", json!({"name": "Odeon", "address": "Rua B", "openingHours": "12h-23h", "contactNumber": "556"}));

    let records = backend.client().list(EntityKind::Theater).await.unwrap();
    let names: Vec<String> = records.iter().map(|r| r.card().title).collect();
    assert_eq!(names, vec!["Roxy".to_string(), "Odeon".to_string()]);
    assert!(matches!(records[0], Record::Theater(_)));
}

#[tokio::test]
async fn test_non_ascii_resource_paths_reach_the_backend() {
    let backend = FakeBackend::start().await;
    backend.seed("gêneros", comedy());

    let records = backend.client().list(EntityKind::Gender).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(backend.last(Method::GET).unwrap().resource, "gêneros");
}

#[tokio::test]
async fn test_create_sends_json_body() {
    let backend = FakeBackend::start().await;
    let client = backend.client();

    client
        .create(EntityKind::Gender, &Payload::Json(comedy()))
        .await
        .unwrap();

    let post = backend.last(Method::POST).unwrap();
    assert_eq!(post.resource, "gêneros");
    assert_eq!(post.body, RecordedBody::Json(comedy()));
    assert_eq!(backend.records("gêneros").len(), 1);
}

#[tokio::test]
async fn test_update_and_delete_target_item_urls() {
    let backend = FakeBackend::start().await;
    let id = backend.seed("salas", json!({"number": 1, "type": "2D", "accessibility": false, "capacity": 80}));
    let client = backend.client();

    let body = json!({"number": 1, "type": "IMAX", "accessibility": true, "capacity": 120});
    client
        .update(EntityKind::Room, id, &Payload::Json(body.clone()))
        .await
        .unwrap();
    let put = backend.last(Method::PUT).unwrap();
    assert_eq!(put.id, Some(id));
    assert_eq!(put.body, RecordedBody::Json(body));

    client.delete(EntityKind::Room, id).await.unwrap();
    assert_eq!(backend.last(Method::DELETE).unwrap().id, Some(id));
    assert!(backend.records("salas").is_empty());
}

#[tokio::test]
async fn test_multipart_repeats_ids_and_attaches_file() {
    let backend = FakeBackend::start().await;
    let mut poster = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    poster.write_all(b"\x89PNG fake").unwrap();

    let payload = Payload::Multipart(vec![
        Part::Text { name: "title".into(), value: "Up".into() },
        Part::Text { name: "duration".into(), value: "96".into() },
        Part::Text { name: "genderIds".into(), value: "1".into() },
        Part::Text { name: "genderIds".into(), value: "3".into() },
        Part::File { name: "poster".into(), path: poster.path().to_path_buf() },
    ]);
    backend.client().create(EntityKind::Movie, &payload).await.unwrap();

    let post = backend.last(Method::POST).unwrap();
    assert_eq!(post.resource, "filmes");
    assert_eq!(post.body.text_parts("genderIds"), vec!["1".to_string(), "3".to_string()]);
    let RecordedBody::Multipart(parts) = &post.body else {
        panic!("expected multipart, got {:?}", post.body);
    };
    let file = parts.iter().find(|(name, _)| name == "poster").map(|(_, p)| p.clone());
    match file {
        Some(RecordedPart::File { file_name, bytes }) => {
            assert!(file_name.ends_with(".png"));
            assert_eq!(bytes, b"\x89PNG fake".to_vec());
        }
        other => panic!("expected a poster file part, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_attachment_fails_before_sending() {
    let backend = FakeBackend::start().await;
    let payload = Payload::Multipart(vec![Part::File {
        name: "poster".into(),
        path: "/definitely/not/here.png".into(),
    }]);

    let err = backend.client().create(EntityKind::Movie, &payload).await.unwrap_err();
    assert!(matches!(err, ApiError::Attachment { .. }));
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_error_status_carries_body() {
    let backend = FakeBackend::start().await;
    backend.fail_next(Method::DELETE, 500);

    let err = backend.client().delete(EntityKind::Client, 4).await.unwrap_err();
    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("injected failure"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_list_is_a_decode_error() {
    let backend = FakeBackend::start().await;
    // A genre without its required popularity
    backend.seed("gêneros", json!({"name": "Drama"}));

    let err = backend.client().list(EntityKind::Gender).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = cinedk::ApiClient::new(&format!("http://{}", addr), None).unwrap();
    let err = client.list(EntityKind::Theater).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
