//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, OwnedShortUrl, SafetyVerdict, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

const SELECT_COLUMNS: &str = "id, key, target_url, created_at, ip, sponsor, owner, branded, \
     branded_valid, safe, threat_type, platform_type, threat_entry_type, threat_info, qr_svg";

/// PostgreSQL repository for short URLs.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    key: String,
    target_url: String,
    created_at: DateTime<Utc>,
    ip: Option<String>,
    sponsor: Option<String>,
    owner: Option<String>,
    branded: bool,
    branded_valid: Option<bool>,
    safe: Option<bool>,
    threat_type: Option<String>,
    platform_type: Option<String>,
    threat_entry_type: Option<String>,
    threat_info: Option<String>,
    qr_svg: Option<String>,
}

#[derive(sqlx::FromRow)]
struct OwnedShortUrlRow {
    #[sqlx(flatten)]
    short_url: ShortUrlRow,
    total_clicks: i64,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        // A NULL `safe` column means the verdict is still pending.
        let safety = row.safe.map(|safe| SafetyVerdict {
            safe,
            threat_type: row.threat_type,
            platform_type: row.platform_type,
            threat_entry_type: row.threat_entry_type,
            threat_info: row.threat_info,
        });

        ShortUrl {
            id: row.id,
            key: row.key,
            target_url: row.target_url,
            created_at: row.created_at,
            ip: row.ip,
            sponsor: row.sponsor,
            owner: row.owner,
            branded: row.branded,
            branded_valid: row.branded_valid,
            safety,
            qr_svg: row.qr_svg,
        }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn create(&self, new: NewShortUrl) -> Result<ShortUrl, AppError> {
        let sql = format!(
            "INSERT INTO short_urls (key, target_url, ip, sponsor, owner, branded) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {SELECT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ShortUrlRow>(&sql)
            .bind(&new.key)
            .bind(&new.target_url)
            .bind(&new.ip)
            .bind(&new.sponsor)
            .bind(&new.owner)
            .bind(new.branded)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_key(&self, key: &str) -> Result<Option<ShortUrl>, AppError> {
        let sql = format!("SELECT {SELECT_COLUMNS} FROM short_urls WHERE key = $1");

        let row = sqlx::query_as::<_, ShortUrlRow>(&sql)
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<OwnedShortUrl>, AppError> {
        let sql = format!(
            "SELECT s.id, s.key, s.target_url, s.created_at, s.ip, s.sponsor, s.owner, \
                    s.branded, s.branded_valid, s.safe, s.threat_type, s.platform_type, \
                    s.threat_entry_type, s.threat_info, s.qr_svg, \
                    COUNT(c.id) AS total_clicks \
             FROM short_urls s \
             LEFT JOIN clicks c ON c.short_url_id = s.id \
             WHERE s.owner = $1 \
             GROUP BY s.id \
             ORDER BY s.created_at DESC"
        );

        let rows = sqlx::query_as::<_, OwnedShortUrlRow>(&sql)
            .bind(owner)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| OwnedShortUrl {
                short_url: r.short_url.into(),
                total_clicks: r.total_clicks,
            })
            .collect())
    }

    async fn update_safety(&self, key: &str, verdict: &SafetyVerdict) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE short_urls \
             SET safe = $2, threat_type = $3, platform_type = $4, \
                 threat_entry_type = $5, threat_info = $6 \
             WHERE key = $1",
        )
        .bind(key)
        .bind(verdict.safe)
        .bind(&verdict.threat_type)
        .bind(&verdict.platform_type)
        .bind(&verdict.threat_entry_type)
        .bind(&verdict.threat_info)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_branded_valid(&self, key: &str, valid: bool) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE short_urls SET branded_valid = $2 WHERE key = $1")
            .bind(key)
            .bind(valid)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn store_qr(&self, key: &str, qr_svg: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE short_urls SET qr_svg = $2 WHERE key = $1")
            .bind(key)
            .bind(qr_svg)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, id: i64, owner: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE id = $1 AND owner = $2")
            .bind(id)
            .bind(owner)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
