//! Protected dashboard endpoints. All figures come from the bundled dataset.

use api_types::dashboard::{
    ChartQuery, Dashboard, DashboardQuery, FinancialPoint, Period, SeriesTotals, Stats,
    TransactionView,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use engine::{Claims, Granularity, Transaction};

use crate::{ServerError, server::ServerState};

const DEFAULT_CHART_HEIGHT: u32 = 300;
const MIN_CHART_HEIGHT: u32 = 120;
const MAX_CHART_HEIGHT: u32 = 2000;

fn granularity(period: Period) -> Granularity {
    match period {
        Period::Monthly => Granularity::Monthly,
        Period::Quarterly => Granularity::Quarterly,
        Period::Yearly => Granularity::Yearly,
    }
}

fn point_view(point: &engine::FinancialPoint) -> FinancialPoint {
    FinancialPoint {
        key: point.key.to_string(),
        income_minor: point.income.cents(),
        expenses_minor: point.expenses.cents(),
        net_minor: point.net.cents(),
    }
}

fn transaction_view(tx: &Transaction) -> TransactionView {
    TransactionView {
        id: tx.id.clone(),
        name: tx.name.clone(),
        date: tx.display_date(),
        amount_minor: tx.amount.cents(),
        kind: tx.kind.as_str().to_string(),
        status: tx.status.as_str().to_string(),
        category: tx.category.clone(),
        user: tx.user.name.clone(),
    }
}

/// Headline stats, the bucketed series and recent activity.
pub async fn get(
    Extension(claims): Extension<Claims>,
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> Json<Dashboard> {
    let period = query.period.unwrap_or_default();
    tracing::debug!(user = %claims.user_id, ?period, "dashboard requested");

    let engine = &state.engine;
    let stats = engine.stats();
    let series = engine.series(granularity(period));
    let totals = engine::SeriesTotals::of(&series);

    Json(Dashboard {
        period,
        stats: Stats {
            total_balance_minor: stats.total_balance.cents(),
            total_income_minor: stats.total_income.cents(),
            total_expenses_minor: stats.total_expenses.cents(),
            total_transactions: stats.total_transactions,
        },
        series: series.iter().map(point_view).collect(),
        totals: SeriesTotals {
            income_minor: totals.income.cents(),
            expenses_minor: totals.expenses.cents(),
            net_minor: totals.net.cents(),
        },
        recent: engine.recent().iter().map(transaction_view).collect(),
    })
}

/// The income/expense chart as an SVG document.
pub async fn chart(
    State(state): State<ServerState>,
    Query(query): Query<ChartQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let height = query.height.unwrap_or(DEFAULT_CHART_HEIGHT);
    if !(MIN_CHART_HEIGHT..=MAX_CHART_HEIGHT).contains(&height) {
        return Err(ServerError::Generic(format!(
            "height must be between {MIN_CHART_HEIGHT} and {MAX_CHART_HEIGHT}"
        )));
    }

    let svg = state.engine.chart_svg(
        granularity(query.period.unwrap_or_default()),
        f64::from(height),
    );
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Every transaction as a CSV attachment.
pub async fn export(
    Extension(claims): Extension<Claims>,
    State(state): State<ServerState>,
) -> Result<impl IntoResponse, ServerError> {
    let body = state.engine.export_csv()?;
    let file_name = engine::export_file_name(chrono::Utc::now().date_naive());
    tracing::info!(user = %claims.user_id, file = %file_name, "transactions exported");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}
