//! Dashboard aggregates: headline statistics and time-bucketed series.

use std::{collections::BTreeMap, fmt};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{Money, Transaction, TransactionKind};

/// Headline numbers of the dashboard.
///
/// Income and expenses only count completed transactions, while
/// `total_transactions` counts every record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_transactions: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, expenses) = transactions
            .iter()
            .filter(|tx| tx.is_completed())
            .fold((Money::ZERO, Money::ZERO), |(income, expenses), tx| {
                match tx.kind {
                    TransactionKind::Income => (income + tx.amount, expenses),
                    TransactionKind::Expense => (income, expenses + tx.amount),
                }
            });

        Self {
            total_balance: income - expenses,
            total_income: income,
            total_expenses: expenses,
            total_transactions: transactions.len(),
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Self::Monthly, Self::Quarterly, Self::Yearly];

    /// How many of the most recent buckets a series keeps.
    #[must_use]
    pub const fn window(self) -> usize {
        match self {
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Yearly => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    /// Cycles Monthly -> Quarterly -> Yearly -> Monthly.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Monthly => Self::Quarterly,
            Self::Quarterly => Self::Yearly,
            Self::Yearly => Self::Monthly,
        }
    }
}

/// Bucket identifier compared as `(year, period)` numbers.
///
/// `period` is the month (1-12) for monthly buckets, the quarter (1-4) for
/// quarterly buckets and 0 for yearly buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    pub year: i32,
    pub period: u32,
    pub granularity: Granularity,
}

/// Quarter of a 1-based month.
#[must_use]
pub const fn quarter_of(month: u32) -> u32 {
    month.div_ceil(3)
}

impl BucketKey {
    #[must_use]
    pub fn for_date(date: chrono::NaiveDate, granularity: Granularity) -> Self {
        let period = match granularity {
            Granularity::Monthly => date.month(),
            Granularity::Quarterly => quarter_of(date.month()),
            Granularity::Yearly => 0,
        };
        Self {
            year: date.year(),
            period,
            granularity,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            Granularity::Monthly => write!(f, "{}-{:02}", self.year, self.period),
            Granularity::Quarterly => write!(f, "{}-Q{}", self.year, self.period),
            Granularity::Yearly => write!(f, "{}", self.year),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPoint {
    pub key: BucketKey,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

/// Groups completed transactions into buckets and keeps the most recent
/// [`Granularity::window`] of them, oldest first.
#[must_use]
pub fn financial_series(
    transactions: &[Transaction],
    granularity: Granularity,
) -> Vec<FinancialPoint> {
    let mut buckets: BTreeMap<BucketKey, (Money, Money)> = BTreeMap::new();

    for tx in transactions.iter().filter(|tx| tx.is_completed()) {
        let entry = buckets
            .entry(BucketKey::for_date(tx.date, granularity))
            .or_insert((Money::ZERO, Money::ZERO));
        match tx.kind {
            TransactionKind::Income => entry.0 += tx.amount,
            TransactionKind::Expense => entry.1 += tx.amount,
        }
    }

    let skip = buckets.len().saturating_sub(granularity.window());
    buckets
        .into_iter()
        .skip(skip)
        .map(|(key, (income, expenses))| FinancialPoint {
            key,
            income,
            expenses,
            net: income - expenses,
        })
        .collect()
}

/// Sums shown under the chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesTotals {
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

impl SeriesTotals {
    #[must_use]
    pub fn of(series: &[FinancialPoint]) -> Self {
        series.iter().fold(Self::default(), |acc, point| Self {
            income: acc.income + point.income,
            expenses: acc.expenses + point.expenses,
            net: acc.net + point.net,
        })
    }
}

/// The `limit` newest transactions, newest first.
#[must_use]
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{TransactionStatus, users::seed_user};

    fn tx(
        id: &str,
        kind: TransactionKind,
        status: TransactionStatus,
        cents: i64,
        date: (i32, u32, u32),
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            name: String::new(),
            amount: Money::new(cents),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            status,
            kind,
            category: String::new(),
            description: None,
            user: seed_user("user_001"),
        }
    }

    use TransactionKind::{Expense, Income};
    use TransactionStatus::{Completed, Failed, Pending};

    #[test]
    fn stats_only_count_completed_amounts() {
        let txs = vec![
            tx("1", Income, Completed, 100_000, (2024, 1, 1)),
            tx("2", Expense, Completed, 40_000, (2024, 1, 2)),
            tx("3", Income, Pending, 50_000, (2024, 1, 3)),
        ];
        let stats = DashboardStats::from_transactions(&txs);

        assert_eq!(stats.total_income, Money::new(100_000));
        assert_eq!(stats.total_expenses, Money::new(40_000));
        assert_eq!(stats.total_balance, Money::new(60_000));
        assert_eq!(stats.total_transactions, 3);
    }

    #[test]
    fn stats_of_empty_input_are_zero() {
        assert_eq!(DashboardStats::from_transactions(&[]), DashboardStats::default());
    }

    #[test]
    fn balance_can_go_negative() {
        let txs = vec![
            tx("1", Income, Completed, 1_000, (2024, 1, 1)),
            tx("2", Expense, Completed, 5_000, (2024, 1, 2)),
            tx("3", Expense, Failed, 9_000, (2024, 1, 3)),
        ];
        let stats = DashboardStats::from_transactions(&txs);
        assert_eq!(stats.total_balance, Money::new(-4_000));
        assert_eq!(stats.total_transactions, 3);
    }

    #[test]
    fn quarter_of_month() {
        for month in 1..=3 {
            assert_eq!(quarter_of(month), 1);
        }
        for month in 4..=6 {
            assert_eq!(quarter_of(month), 2);
        }
        for month in 7..=9 {
            assert_eq!(quarter_of(month), 3);
        }
        for month in 10..=12 {
            assert_eq!(quarter_of(month), 4);
        }
    }

    #[test]
    fn bucket_keys_render_like_the_dashboard() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(BucketKey::for_date(date, Granularity::Monthly).to_string(), "2024-03");
        assert_eq!(BucketKey::for_date(date, Granularity::Quarterly).to_string(), "2024-Q1");
        assert_eq!(BucketKey::for_date(date, Granularity::Yearly).to_string(), "2024");
    }

    #[test]
    fn bucket_keys_order_numerically() {
        let key = |y, m| {
            BucketKey::for_date(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), Granularity::Monthly)
        };
        assert!(key(2023, 12) < key(2024, 1));
        assert!(key(2024, 2) < key(2024, 10));
        assert!(key(999, 5) < key(2024, 1));
    }

    #[test]
    fn monthly_series_groups_and_skips_incomplete() {
        let txs = vec![
            tx("1", Income, Completed, 1_000, (2024, 2, 1)),
            tx("2", Income, Completed, 500, (2024, 2, 20)),
            tx("3", Expense, Completed, 300, (2024, 2, 21)),
            tx("4", Expense, Pending, 9_999, (2024, 2, 22)),
            tx("5", Expense, Completed, 200, (2024, 1, 5)),
        ];
        let series = financial_series(&txs, Granularity::Monthly);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].key.to_string(), "2024-01");
        assert_eq!(series[0].income, Money::ZERO);
        assert_eq!(series[0].expenses, Money::new(200));
        assert_eq!(series[0].net, Money::new(-200));
        assert_eq!(series[1].key.to_string(), "2024-02");
        assert_eq!(series[1].income, Money::new(1_500));
        assert_eq!(series[1].expenses, Money::new(300));
        assert_eq!(series[1].net, Money::new(1_200));
    }

    #[test]
    fn monthly_series_keeps_last_twelve_buckets() {
        let mut txs = Vec::new();
        for i in 0..15u32 {
            let (year, month) = if i < 12 { (2023, i + 1) } else { (2024, i - 11) };
            txs.push(tx(&i.to_string(), Income, Completed, 100, (year, month, 1)));
        }
        let series = financial_series(&txs, Granularity::Monthly);

        assert_eq!(series.len(), 12);
        assert_eq!(series[0].key.to_string(), "2023-04");
        assert_eq!(series[11].key.to_string(), "2024-03");
    }

    #[test]
    fn windowed_income_matches_completed_income_inside_window() {
        let txs = bundled();
        for granularity in Granularity::ALL {
            let series = financial_series(&txs, granularity);
            assert!(series.len() <= granularity.window());
            let Some(first) = series.first().map(|p| p.key) else {
                continue;
            };

            let expected: Money = txs
                .iter()
                .filter(|tx| tx.is_completed() && tx.kind == Income)
                .filter(|tx| BucketKey::for_date(tx.date, granularity) >= first)
                .map(|tx| tx.amount)
                .sum();
            let bucketed: Money = series.iter().map(|p| p.income).sum();
            assert_eq!(bucketed, expected, "{granularity:?}");
        }
    }

    #[test]
    fn quarterly_and_yearly_windows() {
        let mut txs = Vec::new();
        for year in 2019..=2024 {
            for month in [2, 5, 8, 11] {
                txs.push(tx("x", Expense, Completed, 100, (year, month, 3)));
            }
        }
        let quarters = financial_series(&txs, Granularity::Quarterly);
        assert_eq!(
            quarters.iter().map(|p| p.key.to_string()).collect::<Vec<_>>(),
            vec!["2024-Q1", "2024-Q2", "2024-Q3", "2024-Q4"]
        );

        let years = financial_series(&txs, Granularity::Yearly);
        assert_eq!(
            years.iter().map(|p| p.key.to_string()).collect::<Vec<_>>(),
            vec!["2022", "2023", "2024"]
        );
        assert_eq!(years[2].expenses, Money::new(400));
    }

    #[test]
    fn totals_sum_the_series() {
        let txs = vec![
            tx("1", Income, Completed, 1_000, (2024, 1, 1)),
            tx("2", Expense, Completed, 400, (2024, 2, 1)),
        ];
        let totals = SeriesTotals::of(&financial_series(&txs, Granularity::Monthly));
        assert_eq!(totals.income, Money::new(1_000));
        assert_eq!(totals.expenses, Money::new(400));
        assert_eq!(totals.net, Money::new(600));
    }

    #[test]
    fn recent_transactions_are_newest_first() {
        let txs = vec![
            tx("old", Income, Completed, 1, (2023, 1, 1)),
            tx("new", Income, Pending, 1, (2024, 6, 1)),
            tx("mid", Expense, Failed, 1, (2024, 1, 1)),
        ];
        let recent = recent_transactions(&txs, 2);
        assert_eq!(
            recent.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["new", "mid"]
        );
    }

    fn bundled() -> Vec<Transaction> {
        crate::bundled_transactions().unwrap()
    }
}
