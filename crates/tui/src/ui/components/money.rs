use engine::{Money, TransactionKind};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Signed amount of a transaction: `+$12.00` for income, `-$12.00` for
/// expenses.
#[must_use]
pub fn transaction_amount(amount: Money, kind: TransactionKind) -> String {
    match kind {
        TransactionKind::Income => format!("+{amount}"),
        TransactionKind::Expense => format!("-{amount}"),
    }
}

#[must_use]
pub fn styled_transaction_amount(
    amount: Money,
    kind: TransactionKind,
    theme: &Theme,
) -> Span<'static> {
    let color = match kind {
        TransactionKind::Income => theme.positive,
        TransactionKind::Expense => theme.negative,
    };
    Span::styled(transaction_amount(amount, kind), Style::default().fg(color))
}

/// Bold amount coloured by its sign, used for totals.
#[must_use]
pub fn styled_total(amount: Money, theme: &Theme) -> Span<'static> {
    let color = if amount.is_negative() {
        theme.negative
    } else {
        theme.positive
    };
    Span::styled(
        amount.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
