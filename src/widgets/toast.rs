//! Toast notification widget.
//!
//! Save, delete and fetch outcomes are reported here: a short message in the
//! bottom-right corner that expires on its own and never takes focus.

use crate::styles::theme;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};
use std::time::{Duration, Instant};

/// How long a toast stays up unless overridden
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

/// Toast notification variant for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    /// A save or delete the backend accepted (green)
    Success,
    /// Neutral notice (primary color)
    Info,
    /// A request the backend refused or never answered (red)
    Error,
}

impl ToastVariant {
    /// Get the icon for this variant
    pub fn icon(&self) -> &'static str {
        match self {
            ToastVariant::Success => "\u{2714}", // ✔
            ToastVariant::Info => "\u{2139}",    // ℹ
            ToastVariant::Error => "\u{2718}",   // ✘
        }
    }

    /// Get the border color for this variant
    pub fn color(&self) -> Color {
        let t = theme();
        match self {
            ToastVariant::Success => t.success,
            ToastVariant::Info => t.primary,
            ToastVariant::Error => t.error,
        }
    }
}

/// Toast notification data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// The message to display
    pub message: String,
    /// The variant (success, info, error)
    pub variant: ToastVariant,
    /// When the toast was created
    pub created_at: Instant,
    /// How long to show the toast
    pub duration: Duration,
}

impl Toast {
    /// Create a toast with the default duration
    pub fn new(message: impl Into<String>, variant: ToastVariant) -> Self {
        Self {
            message: message.into(),
            variant,
            created_at: Instant::now(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Create a success toast
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Success)
    }

    /// Create an info toast
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Info)
    }

    /// Create an error toast
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastVariant::Error)
    }

    /// Override how long the toast stays up
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the toast has outlived its duration
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Renders one toast in the bottom-right corner of the given area.
pub struct ToastWidget<'a> {
    toast: &'a Toast,
}

impl<'a> ToastWidget<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    fn calculate_area(&self, area: Rect) -> Rect {
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = 3u16;
        let x = area.x + area.width.saturating_sub(width + 2);
        // Keep clear of the footer
        let y = area.y + area.height.saturating_sub(height + 3);
        Rect::new(x, y, width, height)
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let toast_area = self.calculate_area(area);
        let t = theme();

        Widget::render(Clear, toast_area, buf);

        let message = format!(" {} {} ", self.toast.variant.icon(), self.toast.message);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.toast.variant.color()))
            .style(t.background_style());

        Paragraph::new(message)
            .block(block)
            .style(t.text_style().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .render(toast_area, buf);
    }
}

/// Holds the one visible toast; a new toast replaces the old one.
#[derive(Debug, Default)]
pub struct ToastManager {
    /// The toast currently on screen, if any
    current: Option<Toast>,
}

impl ToastManager {
    /// Create an empty toast manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, replacing any current one
    pub fn push(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    /// Show a success toast
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Toast::success(message));
    }

    /// Show an info toast
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Toast::info(message));
    }

    /// Show an error toast
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Toast::error(message));
    }

    /// Drop an expired toast; returns whether one is still showing.
    pub fn tick(&mut self) -> bool {
        if self.current.as_ref().is_some_and(Toast::is_expired) {
            self.current = None;
        }
        self.current.is_some()
    }

    /// The toast on screen, if any
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Render the current toast, if any, over `area`
    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        if let Some(toast) = self.current() {
            frame.render_widget(ToastWidget::new(toast), area);
        }
    }

    /// Remove the current toast immediately
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_toast_replaces_previous() {
        let mut toasts = ToastManager::new();
        toasts.info("Loading");
        toasts.error("Failed");
        let current = toasts.current().unwrap();
        assert_eq!(current.message, "Failed");
        assert_eq!(current.variant, ToastVariant::Error);
    }

    #[test]
    fn test_tick_drops_expired_toast() {
        let mut toasts = ToastManager::new();
        toasts.push(Toast::success("Saved").with_duration(Duration::ZERO));
        assert!(!toasts.tick());
        assert!(toasts.current().is_none());

        toasts.success("Saved");
        assert!(toasts.tick());
    }
}
