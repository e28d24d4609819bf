//! Password accounts and bearer tokens.
//!
//! Passwords are hashed with bcrypt on the blocking pool. Tokens are HS256
//! JWTs carrying the account id as `userId`.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ActiveValue, DatabaseConnection, SqlErr, prelude::*};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::{EngineError, ResultEngine, accounts};

pub const DEFAULT_JWT_SECRET: &str = "default_secret";
/// Tokens expire one hour after issue.
pub const TOKEN_TTL_SECS: i64 = 3600;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Secrets and cost parameters of the auth service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

/// JWT payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

impl AuthConfig {
    pub fn issue_token(&self, user_id: &str) -> ResultEngine<String> {
        self.issue_token_at(user_id, Utc::now().timestamp())
    }

    /// Signs a token as if issued at `now` (unix seconds).
    pub fn issue_token_at(&self, user_id: &str, now: i64) -> ResultEngine<String> {
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;
        Ok(token)
    }

    /// Checks signature and expiry.
    pub fn verify_token(&self, token: &str) -> ResultEngine<Claims> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|err| EngineError::Unauthorized(err.to_string()))?;
        Ok(data.claims)
    }
}

/// Trims and NFC-normalizes a username or email so visually identical
/// inputs map to the same account.
#[must_use]
pub fn normalize_identifier(value: &str) -> String {
    value.trim().nfc().collect()
}

async fn hash_password(password: String, cost: u32) -> ResultEngine<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|err| EngineError::Task(err.to_string()))?
        .map_err(EngineError::from)
}

async fn verify_password(password: String, hash: String) -> ResultEngine<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|err| EngineError::Task(err.to_string()))?
        .map_err(EngineError::from)
}

pub(crate) async fn login(
    db: &DatabaseConnection,
    config: &AuthConfig,
    username: &str,
    password: &str,
) -> ResultEngine<String> {
    let username = normalize_identifier(username);
    let account = accounts::Entity::find()
        .filter(accounts::Column::Username.eq(username.as_str()))
        .one(db)
        .await?;

    let Some(accounts::Model {
        id,
        password_hash: Some(hash),
        ..
    }) = account
    else {
        tracing::debug!("login rejected: unknown account or no password");
        return Err(EngineError::InvalidCredentials);
    };

    if !verify_password(password.to_string(), hash).await? {
        tracing::debug!("login rejected: password mismatch");
        return Err(EngineError::InvalidCredentials);
    }

    config.issue_token(&id)
}

/// Inserts a new account and returns a token for it.
///
/// No lookup happens first: the unique indexes decide conflicts, so two
/// concurrent registrations of the same name cannot both succeed.
pub(crate) async fn register(
    db: &DatabaseConnection,
    config: &AuthConfig,
    username: &str,
    email: &str,
    password: &str,
) -> ResultEngine<String> {
    let username = normalize_identifier(username);
    let email = normalize_identifier(email);
    let hash = hash_password(password.to_string(), config.bcrypt_cost).await?;
    let id = Uuid::new_v4().to_string();

    let account = accounts::ActiveModel {
        id: ActiveValue::Set(id.clone()),
        username: ActiveValue::Set(username.clone()),
        email: ActiveValue::Set(email.clone()),
        password_hash: ActiveValue::Set(Some(hash)),
    };

    if let Err(err) = accounts::Entity::insert(account).exec(db).await {
        return Err(match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                let key = if detail.contains("email") {
                    email
                } else {
                    username
                };
                EngineError::ExistingKey(key)
            }
            _ => EngineError::from(err),
        });
    }

    tracing::info!(account = %id, "account registered");
    config.issue_token(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_user_id_and_one_hour_ttl() {
        let config = AuthConfig::default();
        let token = config.issue_token("abc").unwrap();
        let claims = config.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, "abc");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let config = AuthConfig::default();
        let issued = Utc::now().timestamp() - 2 * TOKEN_TTL_SECS;
        let token = config.issue_token_at("abc", issued).unwrap();

        assert!(matches!(
            config.verify_token(&token),
            Err(EngineError::Unauthorized(_))
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_unauthorized() {
        let other = AuthConfig {
            jwt_secret: "another".to_string(),
            ..AuthConfig::default()
        };
        let token = other.issue_token("abc").unwrap();

        assert!(matches!(
            AuthConfig::default().verify_token(&token),
            Err(EngineError::Unauthorized(_))
        ));
        assert!(matches!(
            AuthConfig::default().verify_token("not-a-token"),
            Err(EngineError::Unauthorized(_))
        ));
    }

    #[test]
    fn claims_use_camel_case_user_id() {
        let claims = Claims {
            user_id: "42".to_string(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], "42");
    }

    #[test]
    fn identifiers_are_trimmed_and_composed() {
        assert_eq!(normalize_identifier("  alice "), "alice");
        // "e" followed by a combining acute accent becomes a single "é".
        assert_eq!(normalize_identifier("jose\u{301}"), "jos\u{e9}");
    }
}
