//! Domain model: entity descriptors, backend records and their presentation.

pub mod choices;
pub mod entity;
pub mod records;

pub use choices::Choice;
pub use entity::{EntityKind, FieldKind, FieldSpec};
pub use records::{Client, Gender, Movie, Room, Session, SessionTicket, Theater, Ticket};

use crate::utils::date;
use serde_json::{json, Map, Value};

/// Summary shown for one record in a list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub lines: Vec<String>,
}

/// Any record of any entity, as fetched from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Theater(Theater),
    Movie(Movie),
    Gender(Gender),
    Room(Room),
    Client(Client),
    Ticket(Ticket),
    Session(Session),
    SessionTicket(SessionTicket),
}

impl Record {
    /// Decode a collection response for `kind`.
    pub fn decode_list(kind: EntityKind, body: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
        fn wrap<T: serde::de::DeserializeOwned>(
            body: &[u8],
            f: fn(T) -> Record,
        ) -> Result<Vec<Record>, serde_json::Error> {
            Ok(serde_json::from_slice::<Vec<T>>(body)?
                .into_iter()
                .map(f)
                .collect())
        }

        match kind {
            EntityKind::Theater => wrap(body, Record::Theater),
            EntityKind::Movie => wrap(body, Record::Movie),
            EntityKind::Gender => wrap(body, Record::Gender),
            EntityKind::Room => wrap(body, Record::Room),
            EntityKind::Client => wrap(body, Record::Client),
            EntityKind::Ticket => wrap(body, Record::Ticket),
            EntityKind::Session => wrap(body, Record::Session),
            EntityKind::SessionTicket => wrap(body, Record::SessionTicket),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Record::Theater(_) => EntityKind::Theater,
            Record::Movie(_) => EntityKind::Movie,
            Record::Gender(_) => EntityKind::Gender,
            Record::Room(_) => EntityKind::Room,
            Record::Client(_) => EntityKind::Client,
            Record::Ticket(_) => EntityKind::Ticket,
            Record::Session(_) => EntityKind::Session,
            Record::SessionTicket(_) => EntityKind::SessionTicket,
        }
    }

    /// Backend-assigned identifier.
    pub fn id(&self) -> i64 {
        match self {
            Record::Theater(r) => r.id,
            Record::Movie(r) => r.id,
            Record::Gender(r) => r.id,
            Record::Room(r) => r.id,
            Record::Client(r) => r.id,
            Record::Ticket(r) => r.id,
            Record::Session(r) => r.id,
            Record::SessionTicket(r) => r.id,
        }
    }

    /// Label used when this record is an option of a cross-entity picker.
    pub fn option_label(&self) -> String {
        match self {
            Record::Theater(t) => t.name.clone(),
            Record::Movie(m) => m.title.clone(),
            Record::Gender(g) => g.name.clone(),
            Record::Room(r) => r.number.to_string(),
            Record::Client(c) => c.name.clone(),
            Record::Ticket(t) => format!("Code - {}", t.id),
            Record::Session(s) => format!("{} - Room {}", s.movie_detail.title, s.room_detail.number),
            Record::SessionTicket(st) => format!("#{}", st.id),
        }
    }

    pub fn card(&self) -> Card {
        match self {
            Record::Theater(t) => Card {
                title: t.name.clone(),
                lines: vec![
                    t.address.clone(),
                    format!("Opening hours: {}", t.opening_hours),
                    t.contact_number.clone(),
                ],
            },
            Record::Gender(g) => Card {
                title: g.name.clone(),
                lines: vec![
                    g.description.clone(),
                    format!("Popularity: {}", g.popularity.label()),
                    format!("Active: {}", yes_no(g.is_active)),
                ],
            },
            Record::Movie(m) => {
                let genres: Vec<&str> = m.genres.iter().map(|g| g.name.as_str()).collect();
                let mut lines = vec![
                    m.description.clone(),
                    format!("Genres: {}", genres.join(", ")),
                    format!("Duration: {}min", m.duration),
                ];
                if let Some(poster) = m.poster.as_deref().filter(|p| !p.is_empty()) {
                    lines.push(format!("Poster: {}", poster));
                }
                Card {
                    title: m.title.clone(),
                    lines,
                }
            }
            Record::Room(r) => Card {
                title: format!("Room {}", r.number),
                lines: vec![
                    r.room_type.label().to_string(),
                    format!("Accessible: {}", yes_no(r.accessibility)),
                    format!("Total capacity: {}", r.capacity),
                ],
            },
            Record::Client(c) => Card {
                title: c.name.clone(),
                lines: vec![
                    c.email.clone(),
                    format!("Gender: {}", c.gender.label()),
                    format!("Active: {}", yes_no(c.is_active)),
                ],
            },
            Record::Ticket(t) => Card {
                title: format!("Payment - {}", t.status.label()),
                lines: vec![
                    format!("Client: {}", t.client_detail.name),
                    format!("Rating: {}", t.rating.label()),
                    format!("Paid via: {}", t.payment_method.label()),
                    format!("Total: {}", money(t.total_price)),
                ],
            },
            Record::Session(s) => Card {
                title: format!("Room {}", s.room_detail.number),
                lines: vec![
                    format!("Theater: {}", s.theater_detail.name),
                    format!("Movie: {}", s.movie_detail.title),
                    format!("Language: {}", s.language.label()),
                    format!("Price: {}", money(s.price)),
                ],
            },
            Record::SessionTicket(st) => Card {
                title: format!("Session {}", st.session_detail.id),
                lines: vec![
                    format!("Movie: {}", st.session_detail.movie_detail.title),
                    format!("Ticket No. {}", st.ticket_detail.id),
                    format!("Purchased on: {}", date::display_label(st.date_of_purchase)),
                    format!("Admission: {}", st.admission.label()),
                ],
            },
        }
    }

    /// The editable-field subset of this record, keyed like the request body.
    ///
    /// Embedded records collapse to their ids. Attachments are not part of
    /// the subset: a poster is only sent when a new file is picked.
    pub fn editable(&self) -> Map<String, Value> {
        let value = match self {
            Record::Theater(t) => json!({
                "name": t.name,
                "address": t.address,
                "openingHours": t.opening_hours,
                "contactNumber": t.contact_number,
            }),
            Record::Gender(g) => json!({
                "name": g.name,
                "description": g.description,
                "popularity": g.popularity.code(),
                "isActive": g.is_active,
            }),
            Record::Movie(m) => json!({
                "title": m.title,
                "description": m.description,
                "duration": m.duration,
                "genderIds": m.genres.iter().map(|g| g.id).collect::<Vec<_>>(),
            }),
            Record::Room(r) => json!({
                "number": r.number,
                "type": r.room_type.code(),
                "accessibility": r.accessibility,
                "capacity": r.capacity,
            }),
            Record::Client(c) => json!({
                "name": c.name,
                "email": c.email,
                "gender": c.gender.code(),
                "isActive": c.is_active,
            }),
            Record::Ticket(t) => json!({
                "client": t.client_detail.id,
                "rating": t.rating.code(),
                "totalPrice": t.total_price,
                "paymentMethod": t.payment_method.code(),
                "status": t.status.code(),
            }),
            Record::Session(s) => json!({
                "theater": s.theater_detail.id,
                "movie": s.movie_detail.id,
                "room": s.room_detail.id,
                "price": s.price,
                "language": s.language.code(),
            }),
            Record::SessionTicket(st) => json!({
                "ticket": st.ticket_detail.id,
                "session": st.session_detail.id,
                "type": st.admission.code(),
                "dateOfPurchase": date::storage_value(st.date_of_purchase),
            }),
        };

        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn money(amount: f64) -> String {
    format!("R$ {:.2}", amount)
}
