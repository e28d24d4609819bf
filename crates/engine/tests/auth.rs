use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{AuthConfig, Engine, EngineError};
use migration::MigratorTrait;

fn fast_auth() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test_secret".to_string(),
        bcrypt_cost: 4,
        ..AuthConfig::default()
    }
}

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .auth(fast_auth())
        .build()
        .await
        .unwrap();
    (engine, db)
}

#[tokio::test]
async fn register_then_login_returns_tokens_for_the_same_account() {
    let (engine, _db) = engine_with_db().await;

    let registered = engine
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();
    let logged_in = engine.login("alice", "secret1").await.unwrap();

    let first = engine.verify_token(&registered).unwrap();
    let second = engine.verify_token(&logged_in).unwrap();
    assert_eq!(first.user_id, second.user_id);
    assert_eq!(second.exp - second.iat, 3600);
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let (engine, _db) = engine_with_db().await;
    engine
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(
        engine.login("alice", "wrong").await,
        Err(EngineError::InvalidCredentials)
    );
    assert_eq!(
        engine.login("bob", "secret1").await,
        Err(EngineError::InvalidCredentials)
    );
}

#[tokio::test]
async fn account_without_password_cannot_log_in() {
    let (engine, db) = engine_with_db().await;
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO accounts (id, username, email, password_hash) VALUES (?, ?, ?, NULL)",
        vec!["legacy-1".into(), "legacy".into(), "legacy@example.com".into()],
    ))
    .await
    .unwrap();

    assert_eq!(
        engine.login("legacy", "").await,
        Err(EngineError::InvalidCredentials)
    );
}

#[tokio::test]
async fn duplicate_username_or_email_conflicts() {
    let (engine, _db) = engine_with_db().await;
    engine
        .register("alice", "alice@example.com", "secret1")
        .await
        .unwrap();

    assert_eq!(
        engine
            .register("alice", "other@example.com", "secret2")
            .await,
        Err(EngineError::ExistingKey("alice".to_string()))
    );
    assert_eq!(
        engine.register("alicia", "alice@example.com", "secret2").await,
        Err(EngineError::ExistingKey("alice@example.com".to_string()))
    );

    // The original password still works.
    assert!(engine.login("alice", "secret1").await.is_ok());
}

#[tokio::test]
async fn usernames_are_normalized_before_lookup() {
    let (engine, _db) = engine_with_db().await;
    engine
        .register(" jose\u{301} ", "jose@example.com", "secret1")
        .await
        .unwrap();

    assert!(engine.login("jos\u{e9}", "secret1").await.is_ok());
}

#[tokio::test]
async fn tokens_from_another_secret_are_rejected() {
    let (engine, _db) = engine_with_db().await;
    let foreign = AuthConfig::default().issue_token("someone").unwrap();

    assert!(matches!(
        engine.verify_token(&foreign),
        Err(EngineError::Unauthorized(_))
    ));
}

#[tokio::test]
async fn bundled_dataset_backs_the_dashboard() {
    let (engine, _db) = engine_with_db().await;

    let stats = engine.stats();
    assert_eq!(stats.total_transactions, engine.transactions().len());
    assert_eq!(
        stats.total_balance,
        stats.total_income - stats.total_expenses
    );
    assert!(engine.recent().len() <= engine::RECENT_LIMIT);
    assert!(engine.chart_svg(engine::Granularity::Yearly, 300.0).contains("Year "));
    assert!(!engine.export_csv().unwrap().is_empty());
}

#[tokio::test]
async fn datastore_failure_is_not_reported_as_bad_credentials() {
    // No migrations, so the users table does not exist.
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let engine = Engine::builder()
        .database(db)
        .auth(fast_auth())
        .build()
        .await
        .unwrap();

    assert!(matches!(
        engine.login("alice", "secret1").await,
        Err(EngineError::Database(_))
    ));
    assert!(matches!(
        engine.register("alice", "alice@example.com", "secret1").await,
        Err(EngineError::Database(_))
    ));
}
