use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnAcquireErr, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QuerySelect,
};
use subtle::ConstantTimeEq;
use tracing::debug;
use users_sdk::{StoreError, User, UserStore};

use super::entity::{Column, Entity as UserEntity};

/// `SeaORM`-backed implementation of [`UserStore`].
///
/// Shares one pooled connection across concurrent requests. Every call is a
/// single `SELECT` bounded by `query_timeout`.
#[derive(Clone)]
pub struct SeaOrmUserStore {
    db: DatabaseConnection,
    query_timeout: Duration,
}

impl SeaOrmUserStore {
    #[must_use]
    pub fn new(db: DatabaseConnection, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }
}

/// Map driver errors to store errors.
fn db_err(e: DbErr) -> StoreError {
    match e {
        DbErr::RecordNotFound(_) => StoreError::NotFound,
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => StoreError::DeadlineExceeded,
        other => StoreError::internal(other.to_string()),
    }
}

/// Run one store round trip under `timeout`.
///
/// An elapsed deadline drops the in-flight query and surfaces as
/// [`StoreError::DeadlineExceeded`].
pub(crate) async fn with_deadline<T, F>(timeout: Duration, fut: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, DbErr>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res.map_err(db_err),
        Err(_) => Err(StoreError::DeadlineExceeded),
    }
}

#[async_trait]
impl UserStore for SeaOrmUserStore {
    async fn get_user(&self, username: &str) -> Result<User, StoreError> {
        let row = with_deadline(
            self.query_timeout,
            UserEntity::find()
                .select_only()
                .column(Column::Id)
                .column(Column::Username)
                .filter(Column::Username.eq(username))
                .into_tuple::<(i32, String)>()
                .one(&self.db),
        )
        .await?;

        let (id, username) = row.ok_or(StoreError::NotFound)?;
        Ok(User { id, username })
    }

    async fn check_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        let stored = with_deadline(
            self.query_timeout,
            UserEntity::find()
                .select_only()
                .column(Column::Password)
                .filter(Column::Username.eq(username))
                .into_tuple::<String>()
                .one(&self.db),
        )
        .await?
        .ok_or(StoreError::NotFound)?;

        if bool::from(stored.as_bytes().ct_eq(password.as_bytes())) {
            Ok(())
        } else {
            debug!(username, "password mismatch");
            Err(StoreError::Unauthenticated)
        }
    }
}
