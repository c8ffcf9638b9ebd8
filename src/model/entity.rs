//! Entity kinds and their declarative descriptors.
//!
//! Every CRUD screen in the application is driven by one of these
//! descriptors: the endpoint path segment, the titles shown in the drawer and
//! headers, and the list of editable fields the form renders and submits.

use super::choices::{
    AdmissionType, Choice, ClientGender, Language, PaymentMethod, Popularity, Rating, RoomType,
};
use std::fmt;
use std::str::FromStr;

/// The eight resources exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Theater,
    Movie,
    Gender,
    Room,
    Client,
    Ticket,
    Session,
    SessionTicket,
}

impl EntityKind {
    /// All kinds, in drawer order.
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Theater,
        EntityKind::Movie,
        EntityKind::Gender,
        EntityKind::Room,
        EntityKind::Client,
        EntityKind::Ticket,
        EntityKind::Session,
        EntityKind::SessionTicket,
    ];

    /// Path segment of the collection endpoint (without slashes).
    pub fn path(self) -> &'static str {
        match self {
            EntityKind::Theater => "cinemas",
            EntityKind::Movie => "filmes",
            EntityKind::Gender => "gêneros",
            EntityKind::Room => "salas",
            EntityKind::Client => "clientes",
            EntityKind::Ticket => "ingressos",
            EntityKind::Session => "sessões",
            EntityKind::SessionTicket => "ingressos-da-sessão",
        }
    }

    /// Plural title used by the drawer and list headers.
    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Theater => "Theaters",
            EntityKind::Movie => "Movies",
            EntityKind::Gender => "Genres",
            EntityKind::Room => "Rooms",
            EntityKind::Client => "Clients",
            EntityKind::Ticket => "Tickets",
            EntityKind::Session => "Sessions",
            EntityKind::SessionTicket => "Session tickets",
        }
    }

    /// Singular noun used in form titles and toasts.
    pub fn singular(self) -> &'static str {
        match self {
            EntityKind::Theater => "Theater",
            EntityKind::Movie => "Movie",
            EntityKind::Gender => "Genre",
            EntityKind::Room => "Room",
            EntityKind::Client => "Client",
            EntityKind::Ticket => "Ticket",
            EntityKind::Session => "Session",
            EntityKind::SessionTicket => "Session ticket",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EntityKind::Theater => "🎦",
            EntityKind::Movie => "🎬",
            EntityKind::Gender => "🎭",
            EntityKind::Room => "🚪",
            EntityKind::Client => "👤",
            EntityKind::Ticket => "🎟",
            EntityKind::Session => "🕒",
            EntityKind::SessionTicket => "🧾",
        }
    }

    /// Name accepted on the command line.
    pub fn cli_name(self) -> &'static str {
        match self {
            EntityKind::Theater => "theaters",
            EntityKind::Movie => "movies",
            EntityKind::Gender => "genres",
            EntityKind::Room => "rooms",
            EntityKind::Client => "clients",
            EntityKind::Ticket => "tickets",
            EntityKind::Session => "sessions",
            EntityKind::SessionTicket => "session-tickets",
        }
    }

    /// Editable fields, in form order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            EntityKind::Theater => THEATER_FIELDS,
            EntityKind::Movie => MOVIE_FIELDS,
            EntityKind::Gender => GENDER_FIELDS,
            EntityKind::Room => ROOM_FIELDS,
            EntityKind::Client => CLIENT_FIELDS,
            EntityKind::Ticket => TICKET_FIELDS,
            EntityKind::Session => SESSION_FIELDS,
            EntityKind::SessionTicket => SESSION_TICKET_FIELDS,
        }
    }

    /// Whether saves must be sent as multipart form data.
    pub fn uses_multipart(self) -> bool {
        self.fields()
            .iter()
            .any(|f| matches!(f.kind, FieldKind::Attachment))
    }

    /// Kinds whose full list the form needs to populate its pickers.
    pub fn lookup_sources(self) -> Vec<EntityKind> {
        let mut sources = Vec::new();
        for field in self.fields() {
            let source = match field.kind {
                FieldKind::Reference(source) => source,
                FieldKind::MultiReference { source, .. } => source,
                _ => continue,
            };
            if !sources.contains(&source) {
                sources.push(source);
            }
        }
        sources
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        EntityKind::ALL
            .into_iter()
            .find(|kind| {
                kind.cli_name() == wanted
                    || kind.cli_name().trim_end_matches('s') == wanted
                    || kind.path() == wanted
            })
            .ok_or_else(|| {
                let names: Vec<&str> = EntityKind::ALL.iter().map(|k| k.cli_name()).collect();
                format!("unknown entity '{}' (expected one of: {})", s, names.join(", "))
            })
    }
}

/// How a field is edited and serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, sent as a JSON string.
    Text,
    /// Typed as text, sent as a JSON integer.
    Integer,
    /// Typed as text, sent as a JSON number.
    Decimal,
    /// On/off switch. Create forms start switched off.
    Switch,
    /// One value out of a closed set.
    Choice {
        choices: &'static [Choice],
        default: &'static str,
    },
    /// Id of one record of another entity, chosen from its full list.
    Reference(EntityKind),
    /// Ids of any number of records of another entity. Multipart bodies
    /// repeat `part_name` once per id.
    MultiReference {
        source: EntityKind,
        part_name: &'static str,
    },
    /// Calendar date, stored as `yyyy-mm-dd`.
    Date,
    /// Local file uploaded as a multipart file part.
    Attachment,
}

/// One editable attribute of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Key in the request body and in `Record::editable`.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { key, label, kind }
}

static THEATER_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("address", "Address", FieldKind::Text),
    field("openingHours", "Opening hours", FieldKind::Text),
    field("contactNumber", "Contact number", FieldKind::Text),
];

static GENDER_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("description", "Description", FieldKind::Text),
    field(
        "popularity",
        "Popularity",
        FieldKind::Choice {
            choices: Popularity::CHOICES,
            default: "B",
        },
    ),
    field("isActive", "Active genre", FieldKind::Switch),
];

static MOVIE_FIELDS: &[FieldSpec] = &[
    field("title", "Title", FieldKind::Text),
    field("description", "Description", FieldKind::Text),
    field("duration", "Duration (min)", FieldKind::Integer),
    field(
        "genderIds",
        "Genres",
        FieldKind::MultiReference {
            source: EntityKind::Gender,
            part_name: "genderIds",
        },
    ),
    field("poster", "Poster", FieldKind::Attachment),
];

static ROOM_FIELDS: &[FieldSpec] = &[
    field("number", "Number", FieldKind::Integer),
    field(
        "type",
        "Type",
        FieldKind::Choice {
            choices: RoomType::CHOICES,
            default: "2D",
        },
    ),
    field("accessibility", "Accessible", FieldKind::Switch),
    field("capacity", "Capacity", FieldKind::Integer),
];

static CLIENT_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text),
    field("email", "Email", FieldKind::Text),
    field(
        "gender",
        "Gender",
        FieldKind::Choice {
            choices: ClientGender::CHOICES,
            default: "F",
        },
    ),
    field("isActive", "Active client", FieldKind::Switch),
];

static TICKET_FIELDS: &[FieldSpec] = &[
    field("client", "Client", FieldKind::Reference(EntityKind::Client)),
    field(
        "rating",
        "Rating",
        FieldKind::Choice {
            choices: Rating::CHOICES,
            default: "L",
        },
    ),
    field("totalPrice", "Total price", FieldKind::Decimal),
    field(
        "paymentMethod",
        "Payment method",
        FieldKind::Choice {
            choices: PaymentMethod::CHOICES,
            default: "boleto",
        },
    ),
    field(
        "status",
        "Status",
        FieldKind::Choice {
            choices: super::choices::TicketStatus::CHOICES,
            default: "pendente",
        },
    ),
];

static SESSION_FIELDS: &[FieldSpec] = &[
    field("theater", "Theater", FieldKind::Reference(EntityKind::Theater)),
    field("movie", "Movie", FieldKind::Reference(EntityKind::Movie)),
    field("room", "Room", FieldKind::Reference(EntityKind::Room)),
    field("price", "Price", FieldKind::Decimal),
    field(
        "language",
        "Language",
        FieldKind::Choice {
            choices: Language::CHOICES,
            default: "DUB",
        },
    ),
];

static SESSION_TICKET_FIELDS: &[FieldSpec] = &[
    field("ticket", "Ticket", FieldKind::Reference(EntityKind::Ticket)),
    field("session", "Session", FieldKind::Reference(EntityKind::Session)),
    field(
        "type",
        "Admission",
        FieldKind::Choice {
            choices: AdmissionType::CHOICES,
            default: "inteira",
        },
    ),
    field("dateOfPurchase", "Date of purchase", FieldKind::Date),
];
