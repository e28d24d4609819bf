use engine::{SortOrder, TransactionQuery, TransactionStatus};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, InputMode},
    ui::{
        components::{card::Card, money::styled_transaction_amount},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(filter_line(state, &theme)), layout[0]);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", state.list_summary()),
            Style::default().fg(theme.dim),
        )),
        layout[1],
    );
    render_table(frame, layout[2], state, &theme);
}

fn filter_line(state: &AppState, theme: &Theme) -> Line<'static> {
    let list = &state.list;
    let query = &list.query;
    let label = |text: &'static str| Span::styled(text, Style::default().fg(theme.dim));
    let editing = |mode: InputMode| {
        if list.input == mode {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        }
    };
    let date_value = |mode: InputMode, value: Option<chrono::NaiveDate>| {
        if list.input == mode {
            format!("{}│", list.buffer)
        } else {
            value.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
        }
    };

    let search = if list.input == InputMode::Search {
        format!("{}│", query.search)
    } else if query.search.is_empty() {
        "-".to_string()
    } else {
        query.search.clone()
    };

    Line::from(vec![
        label(" Search "),
        Span::styled(search, editing(InputMode::Search)),
        label("  Status "),
        Span::styled(
            query.status.map_or("all", TransactionStatus::as_str).to_string(),
            Style::default().fg(theme.text),
        ),
        label("  Type "),
        Span::styled(
            query.kind.map_or("all", |kind| kind.as_str()).to_string(),
            Style::default().fg(theme.text),
        ),
        label("  From "),
        Span::styled(date_value(InputMode::From, query.from), editing(InputMode::From)),
        label("  To "),
        Span::styled(date_value(InputMode::To, query.to), editing(InputMode::To)),
    ])
}

/// Column header with an arrow on the active sort column.
fn header_label(query: &TransactionQuery, field: engine::SortField) -> String {
    if query.sort_by != field {
        return field.label().to_string();
    }
    let arrow = match query.sort_order {
        SortOrder::Asc => "▲",
        SortOrder::Desc => "▼",
    };
    format!("{} {arrow}", field.label())
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let visible = state.visible_transactions();
    let card = Card::new("Transactions", theme).focused(true);

    if visible.is_empty() {
        let message = if state.list.query.is_filtered() {
            "No transactions match the current filters"
        } else {
            "No transactions"
        };
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(message, Style::default().fg(theme.dim))),
        );
        return;
    }

    let rows = visible.iter().map(|tx| {
        Row::new(vec![
            Cell::from(tx.name.clone()),
            Cell::from(styled_transaction_amount(tx.amount, tx.kind, theme)),
            Cell::from(tx.display_date()),
            Cell::from(tx.status.as_str()),
            Cell::from(tx.category.clone()),
            Cell::from(tx.user.name.clone()),
        ])
    });

    let query = &state.list.query;
    let header = Row::new(vec![
        format!("1 {}", header_label(query, engine::SortField::Name)),
        format!("2 {}", header_label(query, engine::SortField::Amount)),
        format!("3 {}", header_label(query, engine::SortField::Date)),
        format!("4 {}", header_label(query, engine::SortField::Status)),
        "Category".to_string(),
        "User".to_string(),
    ])
    .style(Style::default().fg(theme.dim));

    let table = Table::new(
        rows,
        [
            Constraint::Min(18),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(18),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(state.list.selected.min(visible.len() - 1)));

    let inner = card.inner(area);
    card.render_frame(frame, area);
    frame.render_stateful_widget(table, inner, &mut table_state);
}

#[cfg(test)]
mod tests {
    use engine::SortField;

    use super::*;

    #[test]
    fn active_sort_column_has_an_arrow() {
        let mut query = TransactionQuery::default();
        assert_eq!(header_label(&query, SortField::Date), "Date ▼");
        assert_eq!(header_label(&query, SortField::Name), "Name");

        query.toggle_sort(SortField::Date);
        assert_eq!(header_label(&query, SortField::Date), "Date ▲");
    }
}
