#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the `SeaORM` credential store.
//!
//! These tests run the real migrations against an in-memory `SQLite`
//! database and exercise the store through the `UserStore` trait.

use std::time::Duration;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, QueryFilter, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use secrecy::SecretString;
use users::infra::storage::entity;
use users::{DatabaseConfig, Migrator, SeaOrmUserStore, StoreError, UserStore, connect, upgrade_db};

async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

async fn insert_user(db: &DatabaseConnection, username: &str, password: &str) -> i32 {
    let model = entity::ActiveModel {
        id: ActiveValue::NotSet,
        username: ActiveValue::Set(username.to_owned()),
        password: ActiveValue::Set(password.to_owned()),
    }
    .insert(db)
    .await
    .unwrap();
    model.id
}

fn store(db: DatabaseConnection) -> SeaOrmUserStore {
    SeaOrmUserStore::new(db, Duration::from_secs(5))
}

#[tokio::test]
async fn get_user_returns_identity_without_password() {
    let db = inmem_db().await;
    let id = insert_user(&db, "alice", "secret").await;

    let user = store(db).get_user("alice").await.unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn get_user_unknown_is_not_found() {
    let db = inmem_db().await;

    let err = store(db).get_user("nobody").await.unwrap_err();
    assert_eq!(err, StoreError::NotFound);
}

#[tokio::test]
async fn username_lookup_is_case_sensitive() {
    let db = inmem_db().await;
    insert_user(&db, "alice", "secret").await;

    let err = store(db).get_user("Alice").await.unwrap_err();
    assert_eq!(err, StoreError::NotFound);
}

#[tokio::test]
async fn check_password_accepts_exact_match() {
    let db = inmem_db().await;
    insert_user(&db, "alice", "secret").await;

    store(db)
        .check_user_password("alice", "secret")
        .await
        .unwrap();
}

#[tokio::test]
async fn check_password_rejects_mismatch() {
    let db = inmem_db().await;
    insert_user(&db, "alice", "other").await;
    let store = store(db);

    assert_eq!(
        store.check_user_password("alice", "secret").await,
        Err(StoreError::Unauthenticated)
    );
    // prefix of the stored value is not a match
    assert_eq!(
        store.check_user_password("alice", "othe").await,
        Err(StoreError::Unauthenticated)
    );
    assert_eq!(
        store.check_user_password("alice", "").await,
        Err(StoreError::Unauthenticated)
    );
}

#[tokio::test]
async fn check_password_unknown_user_is_not_found() {
    let db = inmem_db().await;

    let err = store(db)
        .check_user_password("ghost", "secret")
        .await
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound);
}

#[tokio::test]
async fn seed_migration_provides_demo_user() {
    let db = inmem_db().await;
    let store = store(db);

    store.check_user_password("test", "test").await.unwrap();
    assert_eq!(store.get_user("test").await.unwrap().username, "test");
}

async fn user_row(db: &DatabaseConnection, username: &str) -> entity::Model {
    entity::Entity::find()
        .filter(entity::Column::Username.eq(username))
        .one(db)
        .await
        .unwrap()
        .expect("user row exists")
}

#[tokio::test]
async fn checks_are_read_only() {
    let db = inmem_db().await;
    insert_user(&db, "alice", "secret").await;
    let before = user_row(&db, "alice").await;
    let store = store(db.clone());

    let _ = store.check_user_password("alice", "wrong").await;
    store.check_user_password("alice", "secret").await.unwrap();
    store.get_user("alice").await.unwrap();

    assert_eq!(user_row(&db, "alice").await, before);
    assert_eq!(entity::Entity::find().all(&db).await.unwrap().len(), 2);
}

#[tokio::test]
async fn exhausted_pool_is_a_deadline() {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1)
        .min_connections(1)
        .acquire_timeout(Duration::from_millis(100))
        .sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    // holds the only pooled connection
    let txn = db.begin().await.unwrap();

    let err = store(db.clone()).get_user("test").await.unwrap_err();
    assert_eq!(err, StoreError::DeadlineExceeded);
    assert!(err.is_cancellation());

    txn.rollback().await.unwrap();
}

#[tokio::test]
async fn connect_builds_pool_from_config() {
    let cfg = DatabaseConfig {
        dsn: SecretString::from("sqlite::memory:"),
        max_connections: 1,
        ..DatabaseConfig::default()
    };

    let db = connect(&cfg).await.unwrap();
    upgrade_db(&db).await.unwrap();

    store(db).get_user("test").await.unwrap();
}

#[tokio::test]
#[tracing_test::traced_test]
async fn upgrade_db_reports_up_to_date_on_second_run() {
    let db = inmem_db().await;

    upgrade_db(&db).await.unwrap();

    assert!(logs_contain("database is up to date"));
}

#[tokio::test]
async fn upgrade_db_applies_pending_migrations() {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.unwrap();

    upgrade_db(&db).await.unwrap();

    assert!(Migrator::get_pending_migrations(&db).await.unwrap().is_empty());
    store(db).get_user("test").await.unwrap();
}
