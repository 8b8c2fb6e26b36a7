use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// Transient corner notification. Expiry is the app's concern; this only
/// draws the current one.
pub struct ToastView<'a> {
    message: &'a str,
    kind: ToastKind,
    theme: &'a Theme,
}

impl<'a> ToastView<'a> {
    pub fn new(message: &'a str, kind: ToastKind, theme: &'a Theme) -> Self {
        Self {
            message,
            kind,
            theme,
        }
    }

    /// Width the toast wants, borders included.
    pub fn desired_width(&self) -> u16 {
        self.message.chars().count() as u16 + 6
    }
}

impl Widget for ToastView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (icon, color) = match self.kind {
            ToastKind::Success => ("+", colors.success()),
            ToastKind::Error => ("!", colors.error()),
            ToastKind::Info => ("i", colors.accent()),
        };

        Clear.render(area, buf);
        let block = Block::bordered()
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(colors.card_bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(self.message, Style::default().fg(colors.fg())),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
