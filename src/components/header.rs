use crate::styles::theme;
use crate::widgets::CinedkLogo;
use anyhow::Result;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

/// Height the header needs: the logo plus its border.
pub const HEADER_HEIGHT: u16 = CinedkLogo::height() + 2;

/// Common header component for all screens
pub struct Header;

impl Header {
    /// Render the logo on the left and `description` on the right, inside a
    /// block titled `title`. Returns the height used.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, description: &str) -> Result<u16> {
        let t = theme();
        let header_block = Block::default()
            .borders(Borders::ALL)
            .border_style(t.border_focused_style())
            .title(format!(" {} ", title))
            .title_style(t.title_style())
            .title_alignment(Alignment::Center)
            .padding(Padding::new(1, 1, 0, 0));

        let inner_area = header_block.inner(area);
        frame.render_widget(header_block, area);

        let [logo_area, desc_area] = Layout::horizontal([
            Constraint::Length(CinedkLogo::width() + 2),
            Constraint::Min(0),
        ])
        .areas(inner_area);
        frame.render_widget(CinedkLogo, logo_area);

        // Center description vertically
        let desc_lines = description.lines().count() as u16;
        let top_padding = desc_area.height.saturating_sub(desc_lines) / 2;
        let [_, desc_area] =
            Layout::vertical([Constraint::Length(top_padding), Constraint::Min(0)]).areas(desc_area);

        let description_para = Paragraph::new(description)
            .style(t.text_style())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(description_para, desc_area);

        Ok(area.height)
    }
}
