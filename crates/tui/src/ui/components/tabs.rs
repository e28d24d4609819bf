use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{routes::Route, ui::theme::Theme};

const TABS: [Route; 3] = [Route::Home, Route::Dashboard, Route::Transactions];

/// Renders a horizontal tab bar for the signed-in screens.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, active: Route, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, route) in TABS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }

        let label = route.label();
        if *route == active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Shortcut hints shown in the bottom bar, as `(key, action)` pairs.
pub fn hint_line(hints: &[(&'static str, &'static str)], theme: &Theme) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(theme.dim),
        ));
    }
    Line::from(spans)
}
