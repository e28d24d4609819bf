pub mod dashboard;
pub mod home;
pub mod loading;
pub mod login;
pub mod signup;
pub mod transactions;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// A `width` x `height` box centered in `area`.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
