//! Transaction primitives and the normalizer.
//!
//! Raw records come from the bundled dataset with a source vocabulary
//! (`Revenue`/`Expense`, `Paid`/`Pending`/`Failed`). [`normalize`] maps each
//! of them to a canonical [`Transaction`] with display fields filled in.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{EngineError, Money, ResultEngine, User, users::seed_user};

/// Source category that marks a record as income.
pub const REVENUE_CATEGORY: &str = "Revenue";

const BUNDLED_DATASET: &str = include_str!("../data/transactions.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("invalid transaction kind: {other}")),
        }
    }
}

/// Settlement status. Only `Completed` counts toward totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }

    /// Maps the source vocabulary. Unknown values count as completed.
    fn from_source(value: &str) -> Self {
        match value {
            "Pending" => Self::Pending,
            "Failed" => Self::Failed,
            _ => Self::Completed,
        }
    }
}

impl TryFrom<&str> for TransactionStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "failed" => Ok(Self::Failed),
            other => Err(format!("invalid transaction status: {other}")),
        }
    }
}

/// Record ids are numbers in the dataset but strings everywhere else.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A record as stored in the bundled JSON file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawTransaction {
    pub id: RawId,
    pub user_id: String,
    pub category: String,
    pub amount: f64,
    pub status: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
}

/// Accepts RFC 3339 timestamps (`2024-01-15T08:34:12Z`) and plain dates.
fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_date(&value).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {value}")))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    pub kind: TransactionKind,
    pub category: String,
    pub description: Option<String>,
    pub user: User,
}

impl Transaction {
    /// Human readable date, e.g. `Jan 5, 2024`.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }
}

fn category_label(category: &str) -> &str {
    match category {
        "Revenue" => "Business Revenue",
        "Expense" => "Business Expense",
        other => other,
    }
}

/// Picks a display name from the (kind, amount bracket) table.
fn transaction_name(kind: TransactionKind, amount: Money) -> &'static str {
    let units = amount.units();
    match kind {
        TransactionKind::Income if units >= 3000.0 => "Large Contract Payment",
        TransactionKind::Income if units >= 2000.0 => "Project Milestone",
        TransactionKind::Income if units >= 1000.0 => "Service Payment",
        TransactionKind::Income => "Consultation Fee",
        TransactionKind::Expense if units >= 3000.0 => "Major Equipment Purchase",
        TransactionKind::Expense if units >= 2000.0 => "Office Lease Payment",
        TransactionKind::Expense if units >= 1000.0 => "Software Licensing",
        TransactionKind::Expense => "Office Supplies",
    }
}

fn transaction_description(label: &str, kind: TransactionKind) -> String {
    match kind {
        TransactionKind::Income => format!("{label} - Payment received for services rendered"),
        TransactionKind::Expense => format!("{label} - Business operational expense"),
    }
}

impl From<&RawTransaction> for Transaction {
    fn from(raw: &RawTransaction) -> Self {
        let kind = if raw.category == REVENUE_CATEGORY {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let amount = Money::from_units(raw.amount);
        let label = category_label(&raw.category);

        Self {
            id: raw.id.to_string(),
            name: transaction_name(kind, amount).to_string(),
            amount,
            date: raw.date,
            status: TransactionStatus::from_source(&raw.status),
            kind,
            category: label.to_string(),
            description: Some(transaction_description(label, kind)),
            user: seed_user(&raw.user_id),
        }
    }
}

/// Builds one canonical transaction per raw record, preserving order.
#[must_use]
pub fn normalize(raw: &[RawTransaction]) -> Vec<Transaction> {
    raw.iter().map(Transaction::from).collect()
}

/// Parses a JSON array of raw records.
pub fn parse_dataset(json: &str) -> ResultEngine<Vec<RawTransaction>> {
    serde_json::from_str(json).map_err(EngineError::from)
}

/// Parses and normalizes the dataset compiled into the crate.
pub fn bundled_transactions() -> ResultEngine<Vec<Transaction>> {
    let raw = parse_dataset(BUNDLED_DATASET)?;
    Ok(normalize(&raw))
}
