use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::content::Card;
use crate::ui::theme::Theme;

/// Rendered height of one card, border included.
pub const CARD_HEIGHT: u16 = 7;

/// One flashcard: front (prompt) or back (answer), with focus shown on the
/// border and the face shown in the title.
pub struct FlipCard<'a> {
    card: &'a Card,
    flipped: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FlipCard<'a> {
    pub fn new(card: &'a Card, flipped: bool, focused: bool, theme: &'a Theme) -> Self {
        Self {
            card,
            flipped,
            focused,
            theme,
        }
    }
}

impl Widget for FlipCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let face = if self.flipped { " back " } else { " front " };
        let border = if self.focused {
            Style::default().fg(colors.border_focused())
        } else {
            Style::default().fg(colors.border())
        };

        let face_bg = if self.flipped {
            colors.accent_dim()
        } else {
            colors.card_bg()
        };
        let block = Block::bordered()
            .title(Span::styled(face, Style::default().fg(colors.text_muted())))
            .border_style(border)
            .style(Style::default().bg(face_bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let text = if self.flipped {
            Paragraph::new(self.card.back.as_str())
                .style(Style::default().fg(colors.fg()))
                .wrap(Wrap { trim: true })
        } else {
            Paragraph::new(Line::from(Span::styled(
                self.card.front.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .wrap(Wrap { trim: true })
        };
        text.render(inner, buf);
    }
}
