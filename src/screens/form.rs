//! Create and edit form for any entity.

use super::screen_trait::{Screen, ScreenAction, ScreenContext};
use crate::api::{ApiError, ApiRequest, Operation, Reply};
use crate::config::MutationPolicy;
use crate::form::{FieldInput, FieldState, FormState, OptionsState};
use crate::keymap::Action;
use crate::model::{EntityKind, Record};
use crate::styles::theme;
use crate::ui::Route;
use crate::widgets::Toast;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create(EntityKind),
    Edit(Record),
}

impl FormMode {
    pub fn kind(&self) -> EntityKind {
        match self {
            FormMode::Create(kind) => *kind,
            FormMode::Edit(record) => record.kind(),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            FormMode::Create(kind) => Route::Create(*kind),
            FormMode::Edit(record) => Route::Edit(record.clone()),
        }
    }
}

pub struct FormScreen {
    mode: FormMode,
    form: FormState,
    saving: bool,
}

impl FormScreen {
    pub fn new(mode: FormMode) -> Self {
        let form = FormState::blank(mode.kind());
        Self {
            mode,
            form,
            saving: false,
        }
    }

    /// Switch to another create/edit target. Fields are reset or seeded on
    /// the next focus.
    pub fn set_mode(&mut self, mode: FormMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    fn save(&mut self) -> ScreenAction {
        if self.saving {
            return ScreenAction::None;
        }
        let payload = match self.form.payload() {
            Ok(payload) => payload,
            Err(invalid) => {
                return ScreenAction::Toast(Toast::error(format!(
                    "Fix {} field{} before saving",
                    invalid,
                    if invalid == 1 { "" } else { "s" }
                )));
            }
        };
        self.saving = true;
        let kind = self.mode.kind();
        ScreenAction::Request(match &self.mode {
            FormMode::Create(_) => ApiRequest::Create { kind, payload },
            FormMode::Edit(record) => ApiRequest::Update {
                kind,
                id: record.id(),
                payload,
            },
        })
    }

    fn title(&self) -> String {
        let base = self.mode.route().title();
        if self.saving {
            format!(" {} (saving...) ", base)
        } else {
            format!(" {} ", base)
        }
    }

    fn field_lines(field: &FieldState, focused: bool) -> Vec<Line<'static>> {
        let t = theme();
        let label_style = if focused { t.highlight_style() } else { t.muted_style() };
        let marker = if focused { "» " } else { "  " };
        let value_style = if focused { t.emphasis_style() } else { t.text_style() };

        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{}{:<18}", marker, field.spec.label), label_style),
            Span::styled(field.display_value(), value_style),
        ])];

        let options_state = match &field.input {
            FieldInput::Reference(picker) => Some(picker.state()),
            FieldInput::MultiReference(list) => Some(list.state()),
            _ => None,
        };
        match options_state {
            Some(OptionsState::Loading) => {
                lines.push(Line::styled("      loading options...", t.muted_style()));
            }
            Some(OptionsState::Failed(reason)) => {
                lines.push(Line::styled(format!("      options unavailable: {}", reason), t.error_style()));
            }
            _ => {}
        }

        // The focused checkbox list shows every option
        if let (true, FieldInput::MultiReference(list)) = (focused, &field.input) {
            for (i, option) in list.options().iter().enumerate() {
                let check = if list.is_checked(option.id) { "[x]" } else { "[ ]" };
                let style = if i == list.cursor() { t.highlight_style() } else { t.text_style() };
                lines.push(Line::styled(format!("      {} {}", check, option.label), style));
            }
        }

        if let Some(error) = &field.error {
            lines.push(Line::styled(format!("      {}", error), t.error_style()));
        }
        lines
    }
}

impl Screen for FormScreen {
    fn render(&mut self, frame: &mut Frame, area: Rect, _ctx: &ScreenContext) -> Result<()> {
        let t = theme();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(self.title())
            .title_style(t.title_style());

        let focused = self.form.focused();
        let mut lines = Vec::new();
        let mut focused_line = 0usize;
        for (i, field) in self.form.fields().iter().enumerate() {
            if i == focused {
                focused_line = lines.len();
            }
            lines.extend(Self::field_lines(field, i == focused));
            lines.push(Line::from(""));
        }

        // Keep the focused field visible on short terminals
        let visible = area.height.saturating_sub(2) as usize;
        let scroll = focused_line.saturating_sub(visible.saturating_sub(4)) as u16;

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            area,
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
        let Event::Key(key) = event else {
            return Ok(ScreenAction::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(ScreenAction::None);
        }
        let action = ctx.keymap.resolve(&key);
        match action {
            Some(Action::Save) => return Ok(self.save()),
            Some(Action::Cancel) => return Ok(ScreenAction::Back),
            _ => {}
        }
        if !self.saving {
            self.form.handle_key(key, action);
        }
        Ok(ScreenAction::None)
    }

    fn is_input_focused(&self) -> bool {
        true
    }

    fn on_enter(&mut self, _ctx: &ScreenContext) -> Vec<ApiRequest> {
        self.saving = false;
        match &self.mode {
            FormMode::Create(kind) => self.form = FormState::blank(*kind),
            // The record comes from the list's latest fetch, so every focus
            // starts from the server's values
            FormMode::Edit(record) => self.form = FormState::seeded(record),
        }
        self.mode
            .kind()
            .lookup_sources()
            .into_iter()
            .map(|kind| ApiRequest::List { kind })
            .collect()
    }

    fn on_response(
        &mut self,
        operation: Operation,
        result: Result<Reply, ApiError>,
        ctx: &ScreenContext,
    ) -> Vec<ScreenAction> {
        match (operation, result) {
            (Operation::List(source), Ok(Reply::Records(records))) => {
                self.form.apply_lookup(source, &records);
                Vec::new()
            }
            (Operation::List(source), Err(e)) => {
                self.form.lookup_failed(source, &e.to_string());
                vec![ScreenAction::Toast(Toast::error(format!(
                    "Could not load {}",
                    source.title().to_lowercase()
                )))]
            }
            (Operation::Create(kind) | Operation::Update(kind, _), Ok(_)) => {
                self.saving = false;
                info!("{} saved", kind.singular());
                vec![
                    ScreenAction::Toast(Toast::success(format!("{} saved", kind.singular()))),
                    ScreenAction::Back,
                ]
            }
            (Operation::Create(kind) | Operation::Update(kind, _), Err(e)) => {
                self.saving = false;
                match ctx.policy {
                    MutationPolicy::Confirmed => vec![ScreenAction::Toast(Toast::error(format!(
                        "Could not save {}: {}",
                        kind.singular().to_lowercase(),
                        e
                    )))],
                    MutationPolicy::Optimistic => {
                        warn!("Saving {} failed: {}", kind, e);
                        vec![ScreenAction::Back]
                    }
                }
            }
            (operation, _) => {
                warn!("Form ignored a reply to {:?}", operation);
                Vec::new()
            }
        }
    }

    fn footer_hints(&self, ctx: &ScreenContext) -> String {
        ctx.keymap.hints(&[
            ("Save", Action::Save),
            ("Back", Action::Cancel),
            ("Next", Action::NextField),
            ("Prev", Action::PrevField),
            ("Change", Action::MoveRight),
            ("Toggle", Action::ToggleSelect),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Payload;
    use crate::form::TextInput;
    use crate::keymap::Keymap;
    use crate::model::Room;
    use crate::model::choices::RoomType;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use reqwest::StatusCode;
    use serde_json::json;

    fn room() -> Record {
        Record::Room(Room {
            id: 3,
            number: 12,
            room_type: RoomType::Imax,
            accessibility: true,
            capacity: 120,
        })
    }

    fn ctrl_s() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_create_form_resets_on_every_focus() {
        let keymap = Keymap::default();
        let ctx = ScreenContext::new(&keymap, MutationPolicy::Confirmed);
        let mut screen = FormScreen::new(FormMode::Create(EntityKind::Theater));
        screen.on_enter(&ctx);
        screen
            .handle_event(Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)), &ctx)
            .unwrap();
        assert_eq!(screen.form().field("name").unwrap().display_value(), "x");

        screen.on_enter(&ctx);
        assert_eq!(screen.form(), &FormState::blank(EntityKind::Theater));
    }

    #[test]
    fn test_edit_form_reseeds_on_every_focus() {
        let keymap = Keymap::default();
        let ctx = ScreenContext::new(&keymap, MutationPolicy::Confirmed);
        let mut screen = FormScreen::new(FormMode::Edit(room()));
        screen.on_enter(&ctx);
        screen.form_mut().field_mut("capacity").unwrap().input =
            FieldInput::Text(TextInput::with_text("99"));

        // Same record again: discarded edits do not survive
        screen.set_mode(FormMode::Edit(room()));
        screen.on_enter(&ctx);
        assert_eq!(screen.form().field("capacity").unwrap().display_value(), "120");

        let Record::Room(mut other) = room() else { unreachable!() };
        other.id = 4;
        other.capacity = 30;
        screen.set_mode(FormMode::Edit(Record::Room(other)));
        screen.on_enter(&ctx);
        assert_eq!(screen.form().field("capacity").unwrap().display_value(), "30");
    }

    #[test]
    fn test_focus_requests_picker_sources() {
        let keymap = Keymap::default();
        let ctx = ScreenContext::new(&keymap, MutationPolicy::Confirmed);
        let mut screen = FormScreen::new(FormMode::Create(EntityKind::SessionTicket));
        assert_eq!(
            screen.on_enter(&ctx),
            vec![
                ApiRequest::List { kind: EntityKind::Ticket },
                ApiRequest::List { kind: EntityKind::Session },
            ]
        );
    }

    #[test]
    fn test_save_edit_sends_put_with_unchanged_body() {
        let keymap = Keymap::default();
        let ctx = ScreenContext::new(&keymap, MutationPolicy::Confirmed);
        let mut screen = FormScreen::new(FormMode::Edit(room()));
        screen.on_enter(&ctx);
        let action = screen.handle_event(ctrl_s(), &ctx).unwrap();
        assert_eq!(
            action,
            ScreenAction::Request(ApiRequest::Update {
                kind: EntityKind::Room,
                id: 3,
                payload: Payload::Json(json!({
                    "number": 12,
                    "type": "IMAX",
                    "accessibility": true,
                    "capacity": 120
                })),
            })
        );
        assert!(screen.is_saving());
        // a second save while in flight is ignored
        assert_eq!(screen.handle_event(ctrl_s(), &ctx).unwrap(), ScreenAction::None);
    }

    #[test]
    fn test_confirmed_failure_stays_on_form() {
        let keymap = Keymap::default();
        let ctx = ScreenContext::new(&keymap, MutationPolicy::Confirmed);
        let mut screen = FormScreen::new(FormMode::Edit(room()));
        screen.on_enter(&ctx);
        screen.handle_event(ctrl_s(), &ctx).unwrap();
        let actions = screen.on_response(
            Operation::Update(EntityKind::Room, 3),
            Err(ApiError::status(StatusCode::BAD_REQUEST, "{\"number\":[\"taken\"]}")),
            &ctx,
        );
        assert!(!screen.is_saving());
        assert!(matches!(&actions[..], [ScreenAction::Toast(_)]));
    }

    #[test]
    fn test_optimistic_failure_goes_back() {
        let keymap = Keymap::default();
        let ctx = ScreenContext::new(&keymap, MutationPolicy::Optimistic);
        let mut screen = FormScreen::new(FormMode::Edit(room()));
        screen.on_enter(&ctx);
        screen.handle_event(ctrl_s(), &ctx).unwrap();
        let actions = screen.on_response(
            Operation::Update(EntityKind::Room, 3),
            Err(ApiError::status(StatusCode::BAD_REQUEST, "")),
            &ctx,
        );
        assert_eq!(actions, vec![ScreenAction::Back]);
    }

    #[test]
    fn test_invalid_fields_block_save() {
        let keymap = Keymap::default();
        let ctx = ScreenContext::new(&keymap, MutationPolicy::Confirmed);
        let mut screen = FormScreen::new(FormMode::Create(EntityKind::Room));
        screen.on_enter(&ctx);
        let action = screen.handle_event(ctrl_s(), &ctx).unwrap();
        assert!(matches!(action, ScreenAction::Toast(_)));
        assert!(!screen.is_saving());
        assert!(screen.form().has_errors());
    }
}
