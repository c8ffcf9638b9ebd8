//! The [`CinedkLogo`] widget renders the cinedk wordmark.
use crate::styles::theme;
use indoc::indoc;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Text;
use ratatui::widgets::Widget;

const WORDMARK: &str = indoc! {"
    ┏━╸╻┏┓╻┏━╸╺┳┓╻┏
    ┃  ┃┃┗┫┣╸  ┃┃┣┻┓
    ┗━╸╹╹ ╹┗━╸╺┻┛╹ ╹
"};

/// A three-line wordmark shown in the header and on the home screen.
///
/// # Examples
///
/// ```rust
/// use cinedk::widgets::CinedkLogo;
///
/// # fn draw(frame: &mut ratatui::Frame) {
/// frame.render_widget(CinedkLogo, frame.area());
/// # }
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CinedkLogo;

impl CinedkLogo {
    /// Width in terminal cells
    pub const fn width() -> u16 {
        16
    }

    pub const fn height() -> u16 {
        3
    }
}

impl Widget for CinedkLogo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Text::raw(WORDMARK)
            .style(theme().title_style())
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_dimensions_match_content() {
        let lines: Vec<&str> = WORDMARK.lines().collect();
        assert_eq!(lines.len() as u16, CinedkLogo::height());
        let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        assert_eq!(max_width, CinedkLogo::width());
    }
}
