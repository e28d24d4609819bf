use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Login {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Register {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    /// Successful login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Token {
        pub token: String,
    }

    /// Successful registration. The token has the same shape as the login one.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Registered {
        pub message: String,
        pub token: String,
    }

    /// Body of every non-2xx response.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorMessage {
        pub message: String,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Period {
        #[default]
        Monthly,
        Quarterly,
        Yearly,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DashboardQuery {
        pub period: Option<Period>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ChartQuery {
        pub period: Option<Period>,
        /// Pixel height of the SVG canvas, defaults to 300.
        pub height: Option<u32>,
    }

    /// Amounts are integer cents.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Stats {
        pub total_balance_minor: i64,
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub total_transactions: usize,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinancialPoint {
        /// `2024-03`, `2024-Q1` or `2024`.
        pub key: String,
        pub income_minor: i64,
        pub expenses_minor: i64,
        pub net_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SeriesTotals {
        pub income_minor: i64,
        pub expenses_minor: i64,
        pub net_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub name: String,
        /// Display date, e.g. `Jan 5, 2024`.
        pub date: String,
        pub amount_minor: i64,
        pub kind: String,
        pub status: String,
        pub category: String,
        pub user: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Dashboard {
        pub period: Period,
        pub stats: Stats,
        pub series: Vec<FinancialPoint>,
        pub totals: SeriesTotals,
        pub recent: Vec<TransactionView>,
    }
}
