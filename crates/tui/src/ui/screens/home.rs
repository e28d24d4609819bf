use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    auth::AuthState,
    ui::{components::card::Card, theme::Theme},
};

const FEATURES: [(&str, &str); 3] = [
    ("Analytics", "Income and expenses by month, quarter or year"),
    ("Transactions", "Search, filter and sort every record"),
    ("Export", "Save the current view as CSV"),
];

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(FEATURES.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let greeting = match &state.auth {
        AuthState::LoggedIn(user) => format!("Welcome back, {}", user.name),
        AuthState::Loading | AuthState::LoggedOut => {
            "Track your income and expenses in one place".to_string()
        }
    };
    let hero = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Finboard",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(greeting, Style::default().fg(theme.text_muted))),
    ];
    frame.render_widget(
        Paragraph::new(hero).alignment(Alignment::Center),
        layout[0],
    );

    let features: Vec<Line> = FEATURES
        .iter()
        .map(|(title, text)| {
            Line::from(vec![
                Span::styled(format!("{title:<14}"), Style::default().fg(theme.text)),
                Span::styled(*text, Style::default().fg(theme.dim)),
            ])
        })
        .collect();
    Card::new("Features", &theme).render_with(frame, layout[1], Paragraph::new(features));
}
