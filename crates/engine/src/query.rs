//! Filtering and sorting of the transaction list.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Transaction, TransactionKind, TransactionStatus};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Amount,
    #[default]
    Date,
    Status,
}

impl SortField {
    pub const ALL: [SortField; 4] = [Self::Name, Self::Amount, Self::Date, Self::Status];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Amount => "Amount",
            Self::Date => "Date",
            Self::Status => "Status",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Search, filters and sort applied to the transaction list.
///
/// Every filter is optional; the default query keeps everything and sorts
/// newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionQuery {
    pub search: String,
    pub status: Option<TransactionStatus>,
    pub kind: Option<TransactionKind>,
    /// Inclusive.
    pub from: Option<NaiveDate>,
    /// Inclusive.
    pub to: Option<NaiveDate>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl TransactionQuery {
    /// Clicking the current sort column flips the order, any other column
    /// starts ascending.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_by == field {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_by = field;
            self.sort_order = SortOrder::Asc;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.search.trim().is_empty()
            || self.status.is_some()
            || self.kind.is_some()
            || self.from.is_some()
            || self.to.is_some()
    }

    #[must_use]
    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() {
            let hit = tx.name.to_lowercase().contains(&needle)
                || tx
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
                || tx.user.name.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        self.status.is_none_or(|status| tx.status == status)
            && self.kind.is_none_or(|kind| tx.kind == kind)
            && self.from.is_none_or(|from| tx.date >= from)
            && self.to.is_none_or(|to| tx.date <= to)
    }

    /// Filters then sorts. The sort is stable, so ties keep input order.
    #[must_use]
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut rows: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = compare(self.sort_by, a, b);
            match self.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        rows
    }
}

fn compare(field: SortField, a: &Transaction, b: &Transaction) -> Ordering {
    match field {
        SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Date => a.date.cmp(&b.date),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// Counts shown above the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSummary {
    pub shown: usize,
    pub total: usize,
    pub income: usize,
    pub expenses: usize,
}

impl ListSummary {
    #[must_use]
    pub fn new(shown: &[Transaction], total: usize) -> Self {
        let income = shown
            .iter()
            .filter(|tx| tx.kind == TransactionKind::Income)
            .count();
        Self {
            shown: shown.len(),
            total,
            income,
            expenses: shown.len() - income,
        }
    }
}

impl std::fmt::Display for ListSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Showing {} of {} transactions ({} income, {} expenses)",
            self.shown, self.total, self.income, self.expenses
        )
    }
}
