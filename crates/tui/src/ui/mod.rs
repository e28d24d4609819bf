pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, InputMode},
    auth::AuthState,
    routes::{Route, View},
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.view() {
        View::Loading => screens::loading::render(frame, area),
        View::Show(Route::Login) => screens::login::render(frame, area, state),
        View::Show(Route::Signup) => screens::signup::render(frame, area, state),
        View::Show(route) => render_shell(frame, area, route, state),
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, route: Route, state: &AppState) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tabs
            Constraint::Min(0),
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], route, state, &theme);
    components::tabs::render_tabs(frame, layout[1], route, &theme);

    match route {
        Route::Dashboard => screens::dashboard::render(frame, layout[2], state),
        Route::Transactions => screens::transactions::render(frame, layout[2], state),
        Route::Home | Route::Login | Route::Signup => {
            screens::home::render(frame, layout[2], state)
        }
    }

    let hints = components::tabs::hint_line(hints_for(route, state), &theme);
    frame.render_widget(Paragraph::new(hints), layout[3]);
}

fn render_info_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    route: Route,
    state: &AppState,
    theme: &Theme,
) {
    let user = match &state.auth {
        AuthState::LoggedIn(user) => format!("{} <{}>", user.name, user.email),
        AuthState::Loading | AuthState::LoggedOut => "guest".to_string(),
    };
    let mut spans = vec![
        Span::styled(" finboard ", Style::default().fg(theme.accent)),
        Span::styled(user, Style::default().fg(theme.text)),
        Span::styled(format!("  {}", state.base_url), Style::default().fg(theme.dim)),
    ];
    if route == Route::Dashboard {
        spans.push(Span::styled(
            format!("  period: {}", state.period.label()),
            Style::default().fg(theme.text_muted),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
        area,
    );
}

fn hints_for(route: Route, state: &AppState) -> &'static [(&'static str, &'static str)] {
    let logged_in = matches!(state.auth, AuthState::LoggedIn(_));
    match route {
        Route::Dashboard => &[
            ("p", "period"),
            ("g", "save chart"),
            ("t", "transactions"),
            ("h", "home"),
            ("o", "logout"),
            ("q", "quit"),
        ],
        Route::Transactions if state.list.input != InputMode::Normal => {
            &[("enter", "apply"), ("esc", "cancel")]
        }
        Route::Transactions => &[
            ("/", "search"),
            ("f", "status"),
            ("k", "type"),
            ("[ ]", "dates"),
            ("1-4", "sort"),
            ("r", "reset"),
            ("e", "export"),
            ("d", "dashboard"),
            ("o", "logout"),
            ("q", "quit"),
        ],
        Route::Home | Route::Login | Route::Signup if logged_in => &[
            ("d", "dashboard"),
            ("t", "transactions"),
            ("o", "logout"),
            ("q", "quit"),
        ],
        Route::Home | Route::Login | Route::Signup => &[
            ("l", "login"),
            ("s", "sign up"),
            ("d", "dashboard"),
            ("q", "quit"),
        ],
    }
}
