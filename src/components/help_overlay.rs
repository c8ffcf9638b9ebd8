//! Help Overlay Component
//!
//! Displays current keybindings when user presses '?' key.

use crate::keymap::Keymap;
use crate::styles::theme;
use crate::utils::center_popup;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Renders the help overlay showing current keybindings
pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, keymap: &Keymap, config_path: &str) -> Result<()> {
        let t = theme();
        let popup_area = center_popup(area, 80, 90);
        frame.render_widget(Clear, popup_area);

        let title = format!(" Keyboard Shortcuts - {} Preset ", keymap.preset.name());
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(t.border_focused_style())
            .style(t.background_style());

        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [bindings_area, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(inner_area);

        frame.render_widget(
            Paragraph::new(Self::binding_lines(keymap))
                .wrap(Wrap { trim: false })
                .alignment(Alignment::Left),
            bindings_area,
        );

        let footer_text = format!(
            "Edit keybindings in: {}\nPress any key to close",
            config_path
        );
        frame.render_widget(
            Paragraph::new(footer_text)
                .style(t.muted_style())
                .alignment(Alignment::Center),
            footer_area,
        );

        Ok(())
    }

    /// Bindings grouped under their category headings.
    fn binding_lines(keymap: &Keymap) -> Vec<Line<'static>> {
        let t = theme();
        let mut bindings = keymap.all_bindings();
        // Stable, so preset order survives inside each category
        bindings.sort_by_key(|b| category_rank(b.action.category()));

        let mut lines = Vec::new();
        let mut current_category = "";
        for binding in &bindings {
            let category = binding.action.category();
            if category != current_category {
                if !current_category.is_empty() {
                    lines.push(Line::from(""));
                }
                lines.push(Line::from(Span::styled(
                    format!("  {} ", category),
                    t.card_title_style().add_modifier(Modifier::BOLD),
                )));
                current_category = category;
            }
            lines.push(Line::from(vec![
                Span::styled(format!("    {:14}", binding.display()), t.emphasis_style()),
                Span::styled(binding.get_description().to_string(), t.text_style()),
            ]));
        }
        lines
    }
}

fn category_rank(category: &str) -> usize {
    ["Navigation", "Selection", "Records", "Forms", "Global"]
        .iter()
        .position(|c| *c == category)
        .unwrap_or(usize::MAX)
}
