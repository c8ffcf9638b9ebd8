use crate::model::{EntityKind, Record};

/// Where the app currently is.
///
/// `Create` and `Edit` are only reached from a list screen and never appear
/// in the drawer. `Edit` owns the record it edits.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Home,
    List(EntityKind),
    Create(EntityKind),
    Edit(Record),
}

impl Route {
    /// Entity the route belongs to, if any.
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Route::Home => None,
            Route::List(kind) | Route::Create(kind) => Some(*kind),
            Route::Edit(record) => Some(record.kind()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Route::Home => "Home".to_string(),
            Route::List(kind) => kind.title().to_string(),
            Route::Create(kind) => format!("New {}", kind.singular()),
            Route::Edit(record) => format!("Edit {} #{}", record.kind().singular(), record.id()),
        }
    }

    /// The list a form returns to.
    pub fn parent(&self) -> Route {
        match self.kind() {
            Some(kind) if !matches!(self, Route::List(_)) => Route::List(kind),
            _ => Route::Home,
        }
    }
}
