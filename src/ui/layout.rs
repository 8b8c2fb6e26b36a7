use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A rect centered in `r`, sized as percentages of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Anchor a `width` x `height` box to the bottom-right corner, inset by one
/// cell. Used for the toast overlay.
pub fn bottom_right(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = (r.x + r.width).saturating_sub(width + 1).max(r.x);
    let y = (r.y + r.height).saturating_sub(height + 1).max(r.y);
    Rect {
        x,
        y,
        width,
        height,
    }
}
