use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::nav::{ORDER, Section};
use crate::ui::theme::Theme;

/// The section tab row. Number keys mirror the labels, so each tab shows
/// its shortcut.
pub struct TabBar<'a> {
    pub current: Section,
    pub theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(current: Section, theme: &'a Theme) -> Self {
        Self { current, theme }
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let mut spans = vec![Span::raw(" ")];

        for (i, section) in ORDER.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, section.title());
            let style = if *section == self.current {
                Style::default()
                    .fg(colors.header_bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_muted()).bg(colors.header_bg())
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::styled(" ", Style::default().bg(colors.header_bg())));
        }

        let bar = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(colors.header_bg()));
        bar.render(area, buf);
    }
}
