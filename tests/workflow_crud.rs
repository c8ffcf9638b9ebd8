//! Full create/edit/delete workflows: keys go into the `Shell`, its requests
//! run against the fake backend, and the replies come back through the
//! generation fence.

mod common;

use axum::http::Method;
use cinedk::api::{ApiRequest, Payload};
use cinedk::config::MutationPolicy;
use cinedk::keymap::Keymap;
use cinedk::model::EntityKind;
use cinedk::screens::ListPhase;
use cinedk::shell::Shell;
use cinedk::ui::Route;
use cinedk::widgets::ToastVariant;
use common::{drive, FakeBackend, RecordedBody, RecordedPart};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use std::io::Write;

fn shell(policy: MutationPolicy) -> Shell {
    Shell::new(Keymap::default(), policy, "/tmp/cinedk-test/config.toml")
}

fn press(shell: &mut Shell, code: KeyCode) -> Vec<cinedk::api::Dispatch> {
    shell.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
}

fn type_text(shell: &mut Shell, text: &str) {
    for c in text.chars() {
        assert!(press(shell, KeyCode::Char(c)).is_empty());
    }
}

fn save(shell: &mut Shell) -> Vec<cinedk::api::Dispatch> {
    shell
        .handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
        .unwrap()
}

fn titles(shell: &Shell) -> Vec<String> {
    shell.list().records().iter().map(|r| r.card().title).collect()
}

#[tokio::test]
async fn test_create_genre_then_list_shows_it() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let mut shell = shell(MutationPolicy::Confirmed);

    // No lookups for a genre form
    assert!(shell.navigate(Route::Create(EntityKind::Gender)).is_empty());

    type_text(&mut shell, "Comedy");
    press(&mut shell, KeyCode::Tab); // description stays empty
    press(&mut shell, KeyCode::Tab);
    press(&mut shell, KeyCode::Right); // Low -> Medium
    press(&mut shell, KeyCode::Right); // Medium -> High
    press(&mut shell, KeyCode::Tab);
    press(&mut shell, KeyCode::Char(' ')); // active

    let dispatches = save(&mut shell);
    assert_eq!(dispatches.len(), 1);
    assert!(shell.form().is_saving());
    drive(&mut shell, &client, dispatches).await;

    let post = backend.last(Method::POST).unwrap();
    assert_eq!(
        post.body,
        RecordedBody::Json(json!({
            "name": "Comedy",
            "description": "",
            "isActive": true,
            "popularity": "A"
        }))
    );

    assert_eq!(shell.route(), &Route::List(EntityKind::Gender));
    assert_eq!(shell.list().phase(), &ListPhase::Loaded);
    assert_eq!(titles(&shell), vec!["Comedy".to_string()]);
    let toast = shell.toasts().current().unwrap();
    assert_eq!(toast.variant, ToastVariant::Success);
}

#[tokio::test]
async fn test_edit_without_changes_submits_editable_subset() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let id = backend.seed(
        "clientes",
        json!({"name": "Ana", "email": "ana@example.com", "gender": "F", "isActive": true}),
    );
    let mut shell = shell(MutationPolicy::Confirmed);

    let dispatches = shell.navigate(Route::List(EntityKind::Client));
    drive(&mut shell, &client, dispatches).await;
    assert_eq!(titles(&shell), vec!["Ana".to_string()]);

    // Enter opens the selected record in the edit form
    assert!(press(&mut shell, KeyCode::Enter).is_empty());
    assert!(matches!(shell.route(), Route::Edit(_)));

    let dispatches = save(&mut shell);
    match &dispatches[0].request {
        ApiRequest::Update { kind, id: target, payload } => {
            assert_eq!(*kind, EntityKind::Client);
            assert_eq!(*target, id);
            assert_eq!(
                payload,
                &Payload::Json(json!({
                    "name": "Ana",
                    "email": "ana@example.com",
                    "gender": "F",
                    "isActive": true
                }))
            );
        }
        other => panic!("expected an update, got {:?}", other),
    }
    drive(&mut shell, &client, dispatches).await;
    assert_eq!(backend.last(Method::PUT).unwrap().id, Some(id));
    assert_eq!(shell.route(), &Route::List(EntityKind::Client));
}

#[tokio::test]
async fn test_create_movie_sends_multipart_with_genres_and_poster() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    backend.seed("gêneros", json!({"name": "Comedy", "isActive": true, "popularity": "A"}));
    backend.seed("gêneros", json!({"name": "Drama", "isActive": true, "popularity": "M"}));
    let mut poster = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    poster.write_all(b"jpeg bytes").unwrap();
    let mut shell = shell(MutationPolicy::Confirmed);

    // The genre checklist is filled from the genre list
    let dispatches = shell.navigate(Route::Create(EntityKind::Movie));
    assert_eq!(dispatches.len(), 1);
    drive(&mut shell, &client, dispatches).await;

    type_text(&mut shell, "Up");
    press(&mut shell, KeyCode::Tab);
    type_text(&mut shell, "Balloons");
    press(&mut shell, KeyCode::Tab);
    type_text(&mut shell, "96");
    press(&mut shell, KeyCode::Tab);
    press(&mut shell, KeyCode::Char(' ')); // Comedy
    press(&mut shell, KeyCode::Right);
    press(&mut shell, KeyCode::Char(' ')); // Drama
    press(&mut shell, KeyCode::Tab);
    type_text(&mut shell, &poster.path().display().to_string());

    let dispatches = save(&mut shell);
    drive(&mut shell, &client, dispatches).await;

    let post = backend.last(Method::POST).unwrap();
    assert_eq!(post.resource, "filmes");
    assert_eq!(post.body.text_parts("title"), vec!["Up".to_string()]);
    assert_eq!(post.body.text_parts("duration"), vec!["96".to_string()]);
    assert_eq!(post.body.text_parts("genderIds"), vec!["1".to_string(), "2".to_string()]);
    let RecordedBody::Multipart(parts) = &post.body else {
        panic!("expected multipart, got {:?}", post.body);
    };
    match parts.iter().find(|(name, _)| name == "poster").map(|(_, p)| p) {
        Some(RecordedPart::File { file_name, bytes }) => {
            assert!(file_name.ends_with(".jpg"));
            assert_eq!(bytes, b"jpeg bytes");
        }
        other => panic!("expected a poster file part, got {:?}", other),
    }
    assert_eq!(shell.route(), &Route::List(EntityKind::Movie));
    assert_eq!(titles(&shell), vec!["Up".to_string()]);
}

#[tokio::test]
async fn test_confirmed_delete_failure_keeps_the_row() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    backend.seed("salas", json!({"number": 1, "type": "2D", "accessibility": false, "capacity": 80}));
    backend.seed("salas", json!({"number": 2, "type": "3D", "accessibility": true, "capacity": 60}));
    let mut shell = shell(MutationPolicy::Confirmed);

    let dispatches = shell.navigate(Route::List(EntityKind::Room));
    drive(&mut shell, &client, dispatches).await;
    assert_eq!(shell.list().records().len(), 2);

    backend.fail_next(Method::DELETE, 500);
    let dispatches = press(&mut shell, KeyCode::Char('d'));
    drive(&mut shell, &client, dispatches).await;

    assert_eq!(shell.list().records().len(), 2);
    assert_eq!(shell.toasts().current().unwrap().variant, ToastVariant::Error);

    // Without the injected failure the same key removes exactly that row
    let dispatches = press(&mut shell, KeyCode::Char('d'));
    drive(&mut shell, &client, dispatches).await;
    let ids: Vec<i64> = shell.list().records().iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![2]);
    assert_eq!(backend.records("salas").len(), 1);
}

#[tokio::test]
async fn test_optimistic_delete_removes_row_even_on_failure() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    backend.seed("gêneros", json!({"name": "Comedy", "isActive": true, "popularity": "A"}));
    backend.seed("gêneros", json!({"name": "Drama", "isActive": true, "popularity": "M"}));
    let mut shell = shell(MutationPolicy::Optimistic);

    let dispatches = shell.navigate(Route::List(EntityKind::Gender));
    drive(&mut shell, &client, dispatches).await;

    press(&mut shell, KeyCode::Down);
    backend.fail_next(Method::DELETE, 503);
    let dispatches = press(&mut shell, KeyCode::Char('d'));
    drive(&mut shell, &client, dispatches).await;

    assert_eq!(titles(&shell), vec!["Comedy".to_string()]);
    // The backend still has it
    assert_eq!(backend.records("gêneros").len(), 2);
}

#[tokio::test]
async fn test_confirmed_save_failure_stays_on_form() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let mut shell = shell(MutationPolicy::Confirmed);

    shell.navigate(Route::Create(EntityKind::Theater));
    type_text(&mut shell, "Roxy");
    backend.fail_next(Method::POST, 400);
    let dispatches = save(&mut shell);
    drive(&mut shell, &client, dispatches).await;

    assert_eq!(shell.route(), &Route::Create(EntityKind::Theater));
    assert!(!shell.form().is_saving());
    assert_eq!(shell.form().form().field("name").unwrap().display_value(), "Roxy");
    assert_eq!(shell.toasts().current().unwrap().variant, ToastVariant::Error);
}

#[tokio::test]
async fn test_optimistic_save_failure_returns_to_list() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    let mut shell = shell(MutationPolicy::Optimistic);

    shell.navigate(Route::Create(EntityKind::Theater));
    type_text(&mut shell, "Roxy");
    backend.fail_next(Method::POST, 400);
    let dispatches = save(&mut shell);
    drive(&mut shell, &client, dispatches).await;

    assert_eq!(shell.route(), &Route::List(EntityKind::Theater));
    assert!(shell.list().records().is_empty());
}

#[tokio::test]
async fn test_failed_list_shows_error_instead_of_cards() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    backend.seed("cinemas", json!({"name": "Roxy"}));
    let mut shell = shell(MutationPolicy::Confirmed);

    backend.fail_next(Method::GET, 502);
    let dispatches = shell.navigate(Route::List(EntityKind::Theater));
    drive(&mut shell, &client, dispatches).await;

    assert!(shell.list().records().is_empty());
    assert!(matches!(shell.list().phase(), ListPhase::Failed(_)));

    // Refresh recovers
    let dispatches = press(&mut shell, KeyCode::Char('r'));
    drive(&mut shell, &client, dispatches).await;
    assert_eq!(titles(&shell), vec!["Roxy".to_string()]);
}

#[tokio::test]
async fn test_reply_from_an_earlier_visit_is_ignored() {
    let backend = FakeBackend::start().await;
    let client = backend.client();
    backend.seed("cinemas", json!({"name": "Roxy"}));
    let mut shell = shell(MutationPolicy::Confirmed);

    let first = shell.navigate(Route::List(EntityKind::Theater));
    let stale = client.dispatch(first[0].clone()).await;

    backend.seed("cinemas", json!({"name": "Odeon"}));
    let second = press(&mut shell, KeyCode::Char('r'));
    let fresh = client.dispatch(second[0].clone()).await;

    assert!(shell.apply_event(fresh).is_empty());
    assert!(shell.apply_event(stale).is_empty());
    assert_eq!(titles(&shell), vec!["Roxy".to_string(), "Odeon".to_string()]);
}
