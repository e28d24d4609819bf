use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::{components::tabs::hint_line, screens::centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card_area = centered_box(44, 9, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Welcome Back ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;
    render_field(
        frame,
        rows[0],
        "Username or email",
        &login.identifier,
        false,
        login.focus == LoginField::Identifier,
        &theme,
    );
    render_field(
        frame,
        rows[2],
        "Password",
        &login.password,
        true,
        login.focus == LoginField::Password,
        &theme,
    );

    let hints = hint_line(
        &[("tab", "next"), ("enter", "sign in"), ("esc", "back")],
        &theme,
    );
    let hint_area = Rect {
        y: card_area.y + card_area.height,
        height: 1,
        ..card_area
    };
    if hint_area.bottom() <= area.bottom() {
        frame.render_widget(Paragraph::new(hints), hint_area);
    }
}

/// One labelled input row; the value is masked when `secret`.
pub fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    secret: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let shown = if secret {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<18}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{shown}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
