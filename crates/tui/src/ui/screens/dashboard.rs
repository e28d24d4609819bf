use engine::{
    DashboardStats, RECENT_LIMIT, SeriesTotals, Transaction, financial_series,
    recent_transactions,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            charts::render_financial_chart,
            money::{styled_total, styled_transaction_amount},
        },
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(1),
            Constraint::Length(RECENT_LIMIT as u16 + 3),
        ])
        .split(area);

    render_stats(frame, layout[0], &state.transactions, &theme);

    let series = financial_series(&state.transactions, state.period);
    render_financial_chart(frame, layout[1], &series, state.period, &theme);

    let totals = SeriesTotals::of(&series);
    let line = Line::from(vec![
        Span::styled(" Total Income ", Style::default().fg(theme.dim)),
        styled_total(totals.income, &theme),
        Span::styled("   Total Expenses ", Style::default().fg(theme.dim)),
        Span::styled(
            totals.expenses.to_string(),
            Style::default()
                .fg(theme.negative)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Net ", Style::default().fg(theme.dim)),
        styled_total(totals.net, &theme),
    ]);
    frame.render_widget(Paragraph::new(line), layout[2]);

    render_recent(
        frame,
        layout[3],
        &recent_transactions(&state.transactions, RECENT_LIMIT),
        &theme,
    );
}

fn render_stats(frame: &mut Frame<'_>, area: Rect, transactions: &[Transaction], theme: &Theme) {
    let stats = DashboardStats::from_transactions(transactions);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let balance_color = if stats.total_balance.is_negative() {
        theme.negative
    } else {
        theme.text
    };
    StatCard::new("Total Balance", stats.total_balance.to_string(), theme)
        .color(balance_color)
        .render(frame, cols[0]);
    StatCard::new("Total Income", stats.total_income.to_string(), theme)
        .color(theme.positive)
        .subtitle("completed only")
        .render(frame, cols[1]);
    StatCard::new("Total Expenses", stats.total_expenses.to_string(), theme)
        .color(theme.negative)
        .subtitle("completed only")
        .render(frame, cols[2]);
    StatCard::new(
        "Transactions",
        stats.total_transactions.to_string(),
        theme,
    )
    .render(frame, cols[3]);
}

fn render_recent(frame: &mut Frame<'_>, area: Rect, recent: &[Transaction], theme: &Theme) {
    let rows = recent.iter().map(|tx| {
        Row::new(vec![
            Cell::from(tx.name.clone()),
            Cell::from(tx.display_date()),
            Cell::from(styled_transaction_amount(tx.amount, tx.kind, theme)),
            Cell::from(tx.status.as_str()),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(["Name", "Date", "Amount", "Status"]).style(Style::default().fg(theme.dim)),
    );

    Card::new("Recent Transactions", theme).render_with(frame, area, table);
}
