use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::practice::timer::{CountdownTimer, Threshold};
use crate::ui::theme::Theme;

/// Countdown readout with start/pause/reset hints. The display color
/// follows the warning thresholds.
pub struct TimerPanel<'a> {
    timer: &'a CountdownTimer,
    theme: &'a Theme,
}

impl<'a> TimerPanel<'a> {
    pub fn new(timer: &'a CountdownTimer, theme: &'a Theme) -> Self {
        Self { timer, theme }
    }
}

impl Widget for TimerPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Timer ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let display_color = match self.timer.threshold() {
            Threshold::Danger => colors.error(),
            Threshold::Warning => colors.warning(),
            Threshold::Normal => colors.fg(),
        };
        let state = if self.timer.is_running() {
            "running"
        } else {
            "paused"
        };

        let lines = vec![
            Line::from(Span::styled(
                self.timer.display(),
                Style::default()
                    .fg(display_color)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{state} | [s] start/pause [r] reset"),
                Style::default().fg(colors.text_muted()),
            )),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
