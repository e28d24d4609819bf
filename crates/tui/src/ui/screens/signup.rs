use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, SignupField},
    ui::{
        components::tabs::hint_line,
        screens::{centered_box, login::render_field},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let card_area = centered_box(48, 11, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Create Account ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2); 4])
        .margin(1)
        .split(inner);

    let form = &state.signup;
    let fields = [
        ("Full name", form.name.as_str(), false, SignupField::Name),
        ("Email", form.email.as_str(), false, SignupField::Email),
        ("Password", form.password.as_str(), true, SignupField::Password),
        ("Confirm password", form.confirm.as_str(), true, SignupField::Confirm),
    ];
    for (row, (label, value, secret, field)) in rows.iter().zip(fields) {
        render_field(frame, *row, label, value, secret, form.focus == field, &theme);
    }

    let hints = hint_line(
        &[("tab", "next"), ("enter", "create"), ("esc", "back")],
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
