use sea_orm::DatabaseConnection;

pub use auth::{AuthConfig, Claims, normalize_identifier};
pub use chart::{ChartLayout, render_svg};
pub use error::EngineError;
pub use export::{export_csv, export_file_name};
pub use money::{Money, format_compact};
pub use query::{ListSummary, SortField, SortOrder, TransactionQuery};
pub use stats::{
    BucketKey, DashboardStats, FinancialPoint, Granularity, SeriesTotals, financial_series,
    recent_transactions,
};
pub use transactions::{
    RawTransaction, Transaction, TransactionKind, TransactionStatus, bundled_transactions,
    normalize, parse_dataset,
};
pub use users::User;

pub mod accounts;
pub mod auth;
pub mod chart;
mod error;
pub mod export;
mod money;
pub mod query;
pub mod stats;
mod transactions;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;

/// How many transactions the dashboard lists as recent activity.
pub const RECENT_LIMIT: usize = 10;

/// Holds the normalized dataset and the account store.
///
/// Transactions are read-only after [`EngineBuilder::build`]; every
/// dashboard figure is derived from them on demand.
#[derive(Debug)]
pub struct Engine {
    transactions: Vec<Transaction>,
    database: DatabaseConnection,
    auth: AuthConfig,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::from_transactions(&self.transactions)
    }

    pub fn series(&self, granularity: Granularity) -> Vec<FinancialPoint> {
        financial_series(&self.transactions, granularity)
    }

    pub fn recent(&self) -> Vec<Transaction> {
        recent_transactions(&self.transactions, RECENT_LIMIT)
    }

    pub fn chart_svg(&self, granularity: Granularity, height: f64) -> String {
        render_svg(&self.series(granularity), granularity, height)
    }

    pub fn export_csv(&self) -> ResultEngine<Vec<u8>> {
        export_csv(&self.transactions)
    }

    /// Checks `username`/`password` and returns a fresh token.
    pub async fn login(&self, username: &str, password: &str) -> ResultEngine<String> {
        auth::login(&self.database, &self.auth, username, password).await
    }

    /// Creates an account and returns a token for it.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<String> {
        auth::register(&self.database, &self.auth, username, email, password).await
    }

    pub fn verify_token(&self, token: &str) -> ResultEngine<Claims> {
        self.auth.verify_token(token)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    auth: AuthConfig,
    transactions: Option<Vec<Transaction>>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    pub fn auth(mut self, auth: AuthConfig) -> EngineBuilder {
        self.auth = auth;
        self
    }

    /// Replace the bundled dataset.
    pub fn transactions(mut self, transactions: Vec<Transaction>) -> EngineBuilder {
        self.transactions = Some(transactions);
        self
    }

    /// Construct `Engine`
    ///
    /// Fails when the bundled dataset cannot be parsed.
    pub async fn build(self) -> ResultEngine<Engine> {
        let transactions = match self.transactions {
            Some(transactions) => transactions,
            None => bundled_transactions()?,
        };
        tracing::info!(count = transactions.len(), "transactions loaded");

        Ok(Engine {
            transactions,
            database: self.database,
            auth: self.auth,
        })
    }
}
