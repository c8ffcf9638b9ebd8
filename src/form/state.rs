//! Editable field set behind every create/edit form.

use super::payload;
use super::picker::{CheckList, Picker, PickerOption};
use super::TextInput;
use crate::api::Payload;
use crate::keymap::Action;
use crate::model::{Choice, EntityKind, FieldKind, FieldSpec, Record};
use crate::utils::{date, path::expand_path};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::{json, Map, Value};

/// Current value of one field, in its editing representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Text, integer, decimal and attachment-path fields
    Text(TextInput),
    Switch(bool),
    /// Index into the field's choice table
    Choice(usize),
    Reference(Picker),
    MultiReference(CheckList),
    Date(NaiveDate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub spec: FieldSpec,
    pub input: FieldInput,
    /// Inline validation message from the last save attempt
    pub error: Option<String>,
}

impl FieldState {
    fn blank(spec: FieldSpec) -> Self {
        let input = match spec.kind {
            FieldKind::Text | FieldKind::Integer | FieldKind::Decimal | FieldKind::Attachment => {
                FieldInput::Text(TextInput::new())
            }
            FieldKind::Switch => FieldInput::Switch(false),
            FieldKind::Choice { choices, default } => FieldInput::Choice(choice_index(choices, default)),
            FieldKind::Reference(_) => FieldInput::Reference(Picker::new(None)),
            FieldKind::MultiReference { .. } => FieldInput::MultiReference(CheckList::new(Vec::new())),
            FieldKind::Date => FieldInput::Date(date::today()),
        };
        Self { spec, input, error: None }
    }

    fn seeded(spec: FieldSpec, value: Option<&Value>) -> Self {
        let Some(value) = value else {
            return Self::blank(spec);
        };
        let input = match spec.kind {
            FieldKind::Text => FieldInput::Text(TextInput::with_text(value.as_str().unwrap_or_default())),
            FieldKind::Integer => FieldInput::Text(TextInput::with_text(
                value.as_i64().map(|n| n.to_string()).unwrap_or_default(),
            )),
            FieldKind::Decimal => FieldInput::Text(TextInput::with_text(
                value.as_f64().map(format_decimal).unwrap_or_default(),
            )),
            FieldKind::Switch => FieldInput::Switch(value.as_bool().unwrap_or(false)),
            FieldKind::Choice { choices, default } => {
                FieldInput::Choice(choice_index(choices, value.as_str().unwrap_or(default)))
            }
            FieldKind::Reference(_) => FieldInput::Reference(Picker::new(value.as_i64())),
            FieldKind::MultiReference { .. } => FieldInput::MultiReference(CheckList::new(
                value
                    .as_array()
                    .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
                    .unwrap_or_default(),
            )),
            FieldKind::Date => FieldInput::Date(
                value
                    .as_str()
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
                    .unwrap_or_else(date::today),
            ),
            FieldKind::Attachment => FieldInput::Text(TextInput::new()),
        };
        Self { spec, input, error: None }
    }

    /// Text and numeric fields take printable keys as input.
    pub fn is_textual(&self) -> bool {
        matches!(self.input, FieldInput::Text(_))
    }

    /// Value shown in the field's row.
    pub fn display_value(&self) -> String {
        match (&self.input, self.spec.kind) {
            (FieldInput::Text(input), _) => input.text().to_string(),
            (FieldInput::Switch(on), _) => if *on { "[x] on" } else { "[ ] off" }.to_string(),
            (FieldInput::Choice(index), FieldKind::Choice { choices, .. }) => choices
                .get(*index)
                .map_or_else(String::new, |c| format!("‹ {} ›", c.label)),
            (FieldInput::Reference(picker), _) => picker
                .selected_label()
                .map_or_else(|| "‹ select ›".to_string(), |label| format!("‹ {} ›", label)),
            (FieldInput::MultiReference(list), _) => {
                let names: Vec<String> = list
                    .selected()
                    .iter()
                    .map(|id| {
                        list.options()
                            .iter()
                            .find(|o| o.id == *id)
                            .map_or_else(|| format!("#{}", id), |o| o.label.clone())
                    })
                    .collect();
                if names.is_empty() {
                    "none".to_string()
                } else {
                    names.join(", ")
                }
            }
            (FieldInput::Date(d), _) => date::display_label(*d),
            (FieldInput::Choice(_), _) => String::new(),
        }
    }

    /// Validate and convert to the request-body value. `Ok(None)` means the
    /// field contributes nothing (an empty attachment).
    fn to_value(&self) -> Result<Option<Value>, String> {
        match (&self.input, self.spec.kind) {
            (FieldInput::Text(input), FieldKind::Integer) => input
                .text_trimmed()
                .parse::<i64>()
                .map(|n| Some(json!(n)))
                .map_err(|_| "Enter a whole number".to_string()),
            (FieldInput::Text(input), FieldKind::Decimal) => parse_decimal(input.text_trimmed())
                .map(|n| Some(json!(n)))
                .ok_or_else(|| "Enter a number such as 12.50".to_string()),
            (FieldInput::Text(input), FieldKind::Attachment) => {
                if input.is_empty() {
                    Ok(None)
                } else if expand_path(input.text()).is_file() {
                    Ok(Some(json!(input.text_trimmed())))
                } else {
                    Err("File not found".to_string())
                }
            }
            (FieldInput::Text(input), _) => Ok(Some(json!(input.text()))),
            (FieldInput::Switch(on), _) => Ok(Some(json!(on))),
            (FieldInput::Choice(index), FieldKind::Choice { choices, .. }) => choices
                .get(*index)
                .map(|c| Some(json!(c.code)))
                .ok_or_else(|| "Pick an option".to_string()),
            (FieldInput::Choice(_), _) => Err("Pick an option".to_string()),
            (FieldInput::Reference(picker), _) => picker
                .selected()
                .map(|id| Some(json!(id)))
                .ok_or_else(|| format!("Select a {}", self.spec.label.to_lowercase())),
            (FieldInput::MultiReference(list), _) => Ok(Some(json!(list.selected()))),
            (FieldInput::Date(d), _) => Ok(Some(json!(date::storage_value(*d)))),
        }
    }

    /// Editing keys for text-like fields. `None` when the key is not one.
    fn edit_text(&mut self, key: KeyEvent) -> Option<bool> {
        let FieldInput::Text(input) = &mut self.input else {
            return None;
        };
        let editing = match key.code {
            KeyCode::Char(_) => !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT),
            KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Home
            | KeyCode::End
            | KeyCode::Left
            | KeyCode::Right => true,
            _ => false,
        };
        if !editing {
            return None;
        }
        self.error = None;
        Some(input.handle_key(key.code))
    }

    /// Shift+Left/Right on a date field moves by a month.
    fn shift_month(&mut self, key: KeyEvent) -> bool {
        let FieldInput::Date(d) = &mut self.input else {
            return false;
        };
        if !key.modifiers.contains(KeyModifiers::SHIFT) {
            return false;
        }
        let months = match key.code {
            KeyCode::Right => 1,
            KeyCode::Left => -1,
            _ => return false,
        };
        *d = date::shift_months(*d, months);
        true
    }

    /// Apply a picker/switch/date action to this field.
    fn apply(&mut self, action: Action) -> bool {
        let choice_len = match self.spec.kind {
            FieldKind::Choice { choices, .. } => choices.len(),
            _ => 0,
        };
        let forward = action == Action::MoveRight;
        let handled = match (&mut self.input, action) {
            (
                FieldInput::Switch(on),
                Action::ToggleSelect | Action::Confirm | Action::MoveLeft | Action::MoveRight,
            ) => {
                *on = !*on;
                true
            }
            (FieldInput::Choice(index), Action::MoveLeft | Action::MoveRight) if choice_len > 0 => {
                *index = if forward {
                    (*index + 1) % choice_len
                } else {
                    (*index + choice_len - 1) % choice_len
                };
                true
            }
            (FieldInput::Reference(picker), Action::MoveLeft | Action::MoveRight) => {
                picker.cycle(forward);
                true
            }
            (FieldInput::MultiReference(list), Action::MoveLeft | Action::MoveRight) => {
                list.move_cursor(forward);
                true
            }
            (FieldInput::MultiReference(list), Action::ToggleSelect) => {
                list.toggle_at_cursor();
                true
            }
            (FieldInput::Date(d), Action::MoveLeft | Action::MoveRight) => {
                *d = date::shift_days(*d, if forward { 1 } else { -1 });
                true
            }
            (FieldInput::Date(d), Action::Today) => {
                *d = date::today();
                true
            }
            _ => false,
        };
        if handled {
            self.error = None;
        }
        handled
    }
}

fn choice_index(choices: &[Choice], code: &str) -> usize {
    choices.iter().position(|c| c.code == code).unwrap_or(0)
}

fn format_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

/// Accepts `12.5` as well as the comma form `12,5`.
fn parse_decimal(text: &str) -> Option<f64> {
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// The fields of one entity plus the focus cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    kind: EntityKind,
    fields: Vec<FieldState>,
    focused: usize,
}

impl FormState {
    /// Fresh create-form state: every field at its documented default.
    pub fn blank(kind: EntityKind) -> Self {
        Self {
            kind,
            fields: kind.fields().iter().copied().map(FieldState::blank).collect(),
            focused: 0,
        }
    }

    /// Edit-form state seeded from `record`'s editable subset.
    pub fn seeded(record: &Record) -> Self {
        let kind = record.kind();
        let values = record.editable();
        Self {
            kind,
            fields: kind
                .fields()
                .iter()
                .map(|spec| FieldState::seeded(*spec, values.get(spec.key)))
                .collect(),
            focused: 0,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn fields(&self) -> &[FieldState] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.spec.key == key)
    }

    pub fn field_mut(&mut self, key: &str) -> Option<&mut FieldState> {
        self.fields.iter_mut().find(|f| f.spec.key == key)
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn focused_field(&self) -> Option<&FieldState> {
        self.fields.get(self.focused)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(|f| f.error.is_some())
    }

    /// Fill every picker sourced from `source` with its records.
    pub fn apply_lookup(&mut self, source: EntityKind, records: &[Record]) {
        let options: Vec<PickerOption> = records.iter().map(PickerOption::from_record).collect();
        for field in &mut self.fields {
            match (&mut field.input, field.spec.kind) {
                (FieldInput::Reference(picker), FieldKind::Reference(s)) if s == source => {
                    picker.set_options(options.clone());
                }
                (FieldInput::MultiReference(list), FieldKind::MultiReference { source: s, .. })
                    if s == source =>
                {
                    list.set_options(options.clone());
                }
                _ => {}
            }
        }
    }

    pub fn lookup_failed(&mut self, source: EntityKind, reason: &str) {
        for field in &mut self.fields {
            match (&mut field.input, field.spec.kind) {
                (FieldInput::Reference(picker), FieldKind::Reference(s)) if s == source => {
                    picker.set_failed(reason);
                }
                (FieldInput::MultiReference(list), FieldKind::MultiReference { source: s, .. })
                    if s == source =>
                {
                    list.set_failed(reason);
                }
                _ => {}
            }
        }
    }

    /// Validate every field and collect the request-body values, keyed like
    /// [`Record::editable`]. On failure each invalid field carries an inline
    /// error and the number of invalid fields is returned.
    pub fn values(&mut self) -> Result<Map<String, Value>, usize> {
        let mut values = Map::new();
        let mut invalid = 0;
        for field in &mut self.fields {
            match field.to_value() {
                Ok(value) => {
                    field.error = None;
                    if let Some(value) = value {
                        values.insert(field.spec.key.to_string(), value);
                    }
                }
                Err(message) => {
                    field.error = Some(message);
                    invalid += 1;
                }
            }
        }
        if invalid == 0 {
            Ok(values)
        } else {
            if let Some(first) = self.fields.iter().position(|f| f.error.is_some()) {
                self.focused = first;
            }
            Err(invalid)
        }
    }

    /// Validated request body: JSON, or multipart for entities with a file field.
    pub fn payload(&mut self) -> Result<Payload, usize> {
        let values = self.values()?;
        Ok(payload::build(self.kind, values))
    }

    /// Route a key to the focused field. Returns true if it was consumed.
    pub fn handle_key(&mut self, key: KeyEvent, action: Option<Action>) -> bool {
        let focused = self.focused;
        let Some(field) = self.fields.get_mut(focused) else {
            return false;
        };
        if let Some(consumed) = field.edit_text(key) {
            return consumed;
        }
        if field.shift_month(key) {
            return true;
        }

        match action {
            Some(Action::NextField | Action::MoveDown) => {
                self.focus_next();
                true
            }
            Some(Action::PrevField | Action::MoveUp) => {
                self.focus_prev();
                true
            }
            Some(action) => self.fields[focused].apply(action),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::choices::{ClientGender, Popularity};
    use crate::model::{Client, Gender, Movie, Ticket};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut FormState, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)), None);
        }
    }

    fn ticket() -> Ticket {
        serde_json::from_value(json!({
            "id": 11,
            "clientDetail": {"id": 2, "name": "Ana", "email": "ana@example.com", "gender": "F", "isActive": true},
            "rating": "14",
            "totalPrice": "25.50",
            "paymentMethod": "pix",
            "status": "pago"
        }))
        .unwrap()
    }

    #[test]
    fn test_blank_gender_defaults() {
        let mut form = FormState::blank(EntityKind::Gender);
        let values = form.values().unwrap();
        assert_eq!(values["isActive"], json!(false));
        assert_eq!(values["popularity"], json!("B"));
        assert_eq!(values["name"], json!(""));
    }

    #[test]
    fn test_blank_session_ticket_defaults_to_today_full_price() {
        let form = FormState::blank(EntityKind::SessionTicket);
        assert_eq!(
            form.field("dateOfPurchase").unwrap().input,
            FieldInput::Date(date::today())
        );
        assert_eq!(form.field("type").unwrap().display_value(), "‹ Full price ›");
    }

    #[test]
    fn test_seeded_form_round_trips_editable_subset() {
        let record = Record::Ticket(ticket());
        let mut form = FormState::seeded(&record);
        assert_eq!(form.values().unwrap(), record.editable());
    }

    #[test]
    fn test_seeded_movie_round_trips_genre_ids() {
        let record = Record::Movie(Movie {
            id: 5,
            title: "Up".into(),
            description: "Balloons".into(),
            duration: 96,
            poster: Some("http://localhost:8000/media/up.png".into()),
            genres: vec![Gender {
                id: 2,
                name: "Comedy".into(),
                description: String::new(),
                is_active: true,
                popularity: Popularity::High,
            }],
        });
        let mut form = FormState::seeded(&record);
        assert_eq!(form.values().unwrap(), record.editable());
    }

    #[test]
    fn test_unparsable_number_blocks_with_inline_error() {
        let mut form = FormState::blank(EntityKind::Room);
        type_text(&mut form, "7");
        // capacity is left empty
        assert_eq!(form.values(), Err(1));
        let capacity = form.field("capacity").unwrap();
        assert_eq!(capacity.error.as_deref(), Some("Enter a whole number"));
        assert_eq!(form.focused_field().unwrap().spec.key, "capacity");
    }

    #[test]
    fn test_unselected_reference_blocks_submit() {
        let mut form = FormState::blank(EntityKind::Ticket);
        form.field_mut("totalPrice").unwrap().input = FieldInput::Text(TextInput::with_text("10,5"));
        assert_eq!(form.values(), Err(1));
        assert_eq!(
            form.field("client").unwrap().error.as_deref(),
            Some("Select a client")
        );

        let clients = vec![Record::Client(Client {
            id: 9,
            name: "Bia".into(),
            email: String::new(),
            gender: ClientGender::Female,
            is_active: true,
        })];
        form.apply_lookup(EntityKind::Client, &clients);
        form.handle_key(key(KeyCode::Right), Some(Action::MoveRight));
        let values = form.values().unwrap();
        assert_eq!(values["client"], json!(9));
        assert_eq!(values["totalPrice"], json!(10.5));
    }

    #[test]
    fn test_vim_letters_type_into_text_fields() {
        let mut form = FormState::blank(EntityKind::Theater);
        form.handle_key(key(KeyCode::Char('j')), Some(Action::MoveDown));
        assert_eq!(form.focused(), 0);
        assert_eq!(form.field("name").unwrap().display_value(), "j");
        form.handle_key(key(KeyCode::Tab), Some(Action::NextField));
        assert_eq!(form.focused(), 1);
    }

    #[test]
    fn test_date_moves_by_day_and_month() {
        let mut form = FormState::blank(EntityKind::SessionTicket);
        let start = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        form.field_mut("dateOfPurchase").unwrap().input = FieldInput::Date(start);
        while form.focused_field().unwrap().spec.key != "dateOfPurchase" {
            form.focus_next();
        }
        form.handle_key(key(KeyCode::Right), Some(Action::MoveRight));
        form.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT), None);
        assert_eq!(
            form.field("dateOfPurchase").unwrap().display_value(),
            "08/02/2025"
        );
        form.handle_key(key(KeyCode::Char('t')), Some(Action::Today));
        assert_eq!(
            form.field("dateOfPurchase").unwrap().input,
            FieldInput::Date(date::today())
        );
    }

    #[test]
    fn test_switch_and_choice_keys() {
        let mut form = FormState::blank(EntityKind::Gender);
        form.focus_prev(); // isActive
        form.handle_key(key(KeyCode::Char(' ')), Some(Action::ToggleSelect));
        form.focus_prev(); // popularity
        form.handle_key(key(KeyCode::Left), Some(Action::MoveLeft));
        let values = form.values().unwrap();
        assert_eq!(values["isActive"], json!(true));
        assert_eq!(values["popularity"], json!("A"));
    }
}
