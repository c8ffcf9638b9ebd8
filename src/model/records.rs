//! Records as returned by the backend.
//!
//! Related entities arrive embedded (`clientDetail`, `sessionDetail`, ...)
//! rather than as bare foreign keys; request bodies send only their ids.

use super::choices::{
    AdmissionType, ClientGender, Language, PaymentMethod, Popularity, Rating, RoomType,
    TicketStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theater {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub opening_hours: String,
    #[serde(default)]
    pub contact_number: String,
}

/// A movie genre. The backend calls it "gênero", hence the wire name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gender {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_active: bool,
    pub popularity: Popularity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration: i64,
    /// URL of the uploaded poster, if any.
    #[serde(default)]
    pub poster: Option<String>,
    #[serde(default, rename = "gender")]
    pub genres: Vec<Gender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: i64,
    pub number: i64,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    #[serde(default)]
    pub accessibility: bool,
    pub capacity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub gender: ClientGender,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub client_detail: Client,
    pub rating: Rating,
    #[serde(deserialize_with = "number_or_string")]
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    pub status: TicketStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub theater_detail: Theater,
    pub movie_detail: Movie,
    pub room_detail: Room,
    #[serde(deserialize_with = "number_or_string")]
    pub price: f64,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTicket {
    pub id: i64,
    pub ticket_detail: Ticket,
    pub session_detail: Session,
    #[serde(rename = "type")]
    pub admission: AdmissionType,
    pub date_of_purchase: NaiveDate,
}

/// Decimal columns may be rendered by the backend either as JSON numbers or
/// as decimal strings (`"12.50"`).
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {:?}", s))),
    }
}
