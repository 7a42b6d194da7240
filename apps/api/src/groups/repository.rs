use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::groups::models::AccountGroups;

/// Persistence seam for the account-group store.
/// Swapped for an in-memory fake in tests.
#[async_trait]
pub trait GroupsRepository: Send + Sync {
    async fn fetch(&self, email: &str) -> Result<Option<AccountGroups>>;
    async fn upsert(&self, aggregate: &AccountGroups) -> Result<()>;
}

/// Postgres-backed repository: one JSONB document per client email.
pub struct PgGroupsRepository {
    pool: PgPool,
}

impl PgGroupsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupsRepository for PgGroupsRepository {
    async fn fetch(&self, email: &str) -> Result<Option<AccountGroups>> {
        let row: Option<(sqlx::types::Json<AccountGroups>,)> =
            sqlx::query_as("SELECT data FROM account_groups WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(json,)| json.0))
    }

    async fn upsert(&self, aggregate: &AccountGroups) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO account_groups (email, data, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (email) DO UPDATE SET data = $2, updated_at = NOW()
            "#,
        )
        .bind(&aggregate.email)
        .bind(sqlx::types::Json(aggregate))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// In-memory repository for store tests.
#[cfg(test)]
pub struct InMemoryGroupsRepository {
    inner: std::sync::Mutex<std::collections::HashMap<String, AccountGroups>>,
}

#[cfg(test)]
impl InMemoryGroupsRepository {
    pub fn new() -> Self {
        Self {
            inner: std::sync::Mutex::new(std::collections::HashMap::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl GroupsRepository for InMemoryGroupsRepository {
    async fn fetch(&self, email: &str) -> Result<Option<AccountGroups>> {
        Ok(self.inner.lock().unwrap().get(email).cloned())
    }

    async fn upsert(&self, aggregate: &AccountGroups) -> Result<()> {
        self.inner
            .lock()
            .unwrap()
            .insert(aggregate.email.clone(), aggregate.clone());
        Ok(())
    }
}
