use std::fmt;

use api_types::{
    auth::{ErrorMessage, Login, Register, Registered, Token},
    dashboard::{ChartQuery, Period},
};
use engine::Granularity;
use reqwest::{Response, Url, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    auth::AuthApi,
    error::{AppError, Result},
};

#[derive(Debug)]
pub enum ClientError {
    Unauthorized,
    Conflict(String),
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unauthorized => f.write_str("unauthorized"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::Validation(message) => write!(f, "validation failed: {message}"),
            Self::Server(message) => write!(f, "server error: {message}"),
            Self::Transport(err) => write!(f, "server unreachable: {err}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|err| AppError::BaseUrl(err.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    async fn post<B, R>(&self, path: &str, payload: &B) -> std::result::Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let res = self
            .http
            .post(self.endpoint(path)?)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<R>().await.map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }
}

async fn error_for(res: Response) -> ClientError {
    let status = res.status();
    let body = res
        .json::<ErrorMessage>()
        .await
        .map(|err| err.message)
        .unwrap_or_else(|_| "unknown error".to_string());

    match status.as_u16() {
        401 => ClientError::Unauthorized,
        409 => ClientError::Conflict(body),
        422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    }
}

/// Protected backend calls; `bearer` is the full `Authorization` value.
pub trait DashboardApi {
    async fn chart_svg(
        &self,
        bearer: &str,
        granularity: Granularity,
    ) -> std::result::Result<String, ClientError>;
}

fn period(granularity: Granularity) -> Period {
    match granularity {
        Granularity::Monthly => Period::Monthly,
        Granularity::Quarterly => Period::Quarterly,
        Granularity::Yearly => Period::Yearly,
    }
}

impl DashboardApi for Client {
    async fn chart_svg(
        &self,
        bearer: &str,
        granularity: Granularity,
    ) -> std::result::Result<String, ClientError> {
        let query = ChartQuery {
            period: Some(period(granularity)),
            height: None,
        };
        let res = self
            .http
            .get(self.endpoint("api/dashboard/chart.svg")?)
            .header(AUTHORIZATION, bearer)
            .query(&query)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.text().await.map_err(ClientError::Transport);
        }
        Err(error_for(res).await)
    }
}

impl AuthApi for Client {
    async fn login(&self, username: &str, password: &str) -> std::result::Result<String, ClientError> {
        let payload = Login {
            username: username.to_string(),
            password: password.to_string(),
        };
        let Token { token } = self.post("api/auth/login", &payload).await?;
        Ok(token)
    }

    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> std::result::Result<String, ClientError> {
        let payload = Register {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let Registered { token, .. } = self.post("api/auth/register", &payload).await?;
        Ok(token)
    }
}
