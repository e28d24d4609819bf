//! Login and registration endpoints.

use api_types::auth::{Login, Register, Registered, Token};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

/// Exchange username and password for a bearer token.
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<Login>, JsonRejection>,
) -> Result<Json<Token>, ServerError> {
    let Json(payload) = payload?;
    let token = state
        .engine
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(Token { token }))
}

/// Create an account and log it in straight away.
pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<Register>, JsonRejection>,
) -> Result<(StatusCode, Json<Registered>), ServerError> {
    let Json(payload) = payload?;
    let token = state
        .engine
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Registered {
            message: "User registered successfully".to_string(),
            token,
        }),
    ))
}
