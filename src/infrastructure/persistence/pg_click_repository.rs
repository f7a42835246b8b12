//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

/// PostgreSQL repository for click records.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record(&self, click: NewClick) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO clicks (short_url_id, ip, referrer, user_agent) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(click.short_url_id)
        .bind(&click.ip)
        .bind(&click.referrer)
        .bind(&click.user_agent)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn count_by_key(&self, key: &str) -> Result<Option<i64>, AppError> {
        // Distinguishes an unknown key (None) from a key with zero clicks.
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT COUNT(c.id) \
             FROM short_urls s \
             LEFT JOIN clicks c ON c.short_url_id = s.id \
             WHERE s.key = $1 \
             GROUP BY s.id",
        )
        .bind(key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|(count,)| count))
    }
}
