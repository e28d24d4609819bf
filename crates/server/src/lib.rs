use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use api_types::auth::ErrorMessage;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod auth;
mod dashboard;
mod server;

pub mod types {
    pub mod auth {
        pub use api_types::auth::{ErrorMessage, Login, Register, Registered, Token};
    }

    pub mod dashboard {
        pub use api_types::dashboard::{
            ChartQuery, Dashboard, DashboardQuery, FinancialPoint, Period, SeriesTotals, Stats,
            TransactionView,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// Request body that is not the expected JSON. Keeps axum's status.
    Body(JsonRejection),
    Generic(String),
}

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidCredentials | EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Dataset(_)
        | EngineError::Csv(_)
        | EngineError::Hash(_)
        | EngineError::Token(_)
        | EngineError::Task(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::InvalidCredentials => "Invalid credentials".to_string(),
        EngineError::ExistingKey(key) => {
            tracing::debug!("registration conflict on {key}");
            "Username or Email already exists".to_string()
        }
        EngineError::Unauthorized(reason) => {
            tracing::debug!("rejected bearer token: {reason}");
            "Unauthorized".to_string()
        }
        internal => {
            tracing::error!("internal error: {internal}");
            INTERNAL_MESSAGE.to_string()
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Body(rejection) => (rejection.status(), rejection.body_text()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorMessage { message })).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Body(value)
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
