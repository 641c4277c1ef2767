//! Store collaborator for news items.
//!
//! Thin parameterized SQL over the `news_items` table. Every mutation is
//! ownership-scoped: touching a row owned by someone else looks exactly
//! like the row not existing.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};
use tracing::{debug, info};

use crate::normalize;
use crate::types::{FeedItem, NewNewsItem, NewsItemPatch, PortalError, Result};

pub struct NewsManager {
    db: Pool<Postgres>,
}

impl NewsManager {
    pub async fn new(database_url: &str) -> Result<Self> {
        let db = PgPool::connect(database_url).await?;
        Ok(Self { db })
    }

    pub fn with_pool(db: Pool<Postgres>) -> Self {
        Self { db }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.db
    }

    /// All items owned by the caller, newest first. The feed filter re-sorts
    /// client-side regardless of this ordering.
    pub async fn my_news(&self, user_id: i64) -> Result<Vec<FeedItem>> {
        let rows = sqlx::query(
            "SELECT * FROM news_items WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        debug!("Fetched {} news items for user {}", rows.len(), user_id);
        Ok(rows.iter().map(item_from_row).collect())
    }

    /// The aggregated feed: every item joined with its author's identity.
    pub async fn all_news(&self) -> Result<Vec<FeedItem>> {
        let rows = sqlx::query(
            r#"
            SELECT n.*, u.name AS author_name, u.email AS author_email
            FROM news_items n
            JOIN users u ON n.user_id = u.id
            ORDER BY n.created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        debug!("Fetched {} news items for the aggregated feed", rows.len());
        Ok(rows.iter().map(item_from_row).collect())
    }

    pub async fn create(&self, user_id: i64, item: NewNewsItem) -> Result<FeedItem> {
        if item.title.trim().is_empty() || item.content.trim().is_empty() {
            return Err(PortalError::InvalidInput(
                "Title and content are required".to_string(),
            ));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO news_items (user_id, title, content, hashtags, image_urls, external_links)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&item.title)
        .bind(&item.content)
        .bind(normalize::to_json_column(item.hashtags.as_ref()))
        .bind(normalize::to_json_column(item.image_urls.as_ref()))
        .bind(normalize::to_json_column(item.external_links.as_ref()))
        .fetch_one(&self.db)
        .await?;

        let created = item_from_row(&row);
        info!("User {} created news item {}", user_id, created.id);
        Ok(created)
    }

    /// Partial update. Only the provided fields change; an empty patch is
    /// rejected up front.
    pub async fn update(&self, user_id: i64, id: i64, patch: NewsItemPatch) -> Result<FeedItem> {
        if patch.is_empty() {
            return Err(PortalError::InvalidInput(
                "No valid fields to update".to_string(),
            ));
        }

        let mut columns: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();
        if let Some(title) = patch.title {
            columns.push("title");
            values.push(title);
        }
        if let Some(content) = patch.content {
            columns.push("content");
            values.push(content);
        }
        if let Some(tags) = patch.hashtags {
            columns.push("hashtags");
            values.push(serde_json::to_string(&tags)?);
        }
        if let Some(urls) = patch.image_urls {
            columns.push("image_urls");
            values.push(serde_json::to_string(&urls)?);
        }
        if let Some(links) = patch.external_links {
            columns.push("external_links");
            values.push(serde_json::to_string(&links)?);
        }

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ${}", col, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE news_items SET {}, updated_at = NOW() WHERE id = ${} AND user_id = ${} RETURNING *",
            assignments,
            columns.len() + 1,
            columns.len() + 2,
        );

        let mut query = sqlx::query(&sql);
        for value in &values {
            query = query.bind(value);
        }
        let row = query
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        match row {
            Some(row) => {
                info!("User {} updated news item {}", user_id, id);
                Ok(item_from_row(&row))
            }
            None => Err(PortalError::ItemNotFound { id }),
        }
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM news_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PortalError::ItemNotFound { id });
        }
        info!("User {} deleted news item {}", user_id, id);
        Ok(())
    }

    /// Items from the last `days` days joined with author identity; feeds
    /// the newsletter renderer.
    pub async fn recent(&self, days: i32) -> Result<Vec<FeedItem>> {
        let rows = sqlx::query(
            r#"
            SELECT n.*, u.name AS author_name, u.email AS author_email
            FROM news_items n
            JOIN users u ON n.user_id = u.id
            WHERE n.created_at >= NOW() - make_interval(days => $1)
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(days)
        .fetch_all(&self.db)
        .await?;

        debug!("Fetched {} news items from the last {} days", rows.len(), days);
        Ok(rows.iter().map(item_from_row).collect())
    }
}

/// Decode a `news_items` row (optionally joined with author identity) into
/// the normalized shape. Columns absent from the query, like the author
/// join fields, simply come out as `None`.
pub(crate) fn item_from_row(row: &PgRow) -> FeedItem {
    FeedItem {
        id: row.try_get("id").unwrap_or_default(),
        user_id: row.try_get("user_id").unwrap_or_default(),
        title: row.try_get("title").unwrap_or(None),
        content: row.try_get("content").unwrap_or(None),
        hashtags: normalize::string_array_from_text(
            row.try_get::<Option<String>, _>("hashtags")
                .unwrap_or(None)
                .as_deref(),
        ),
        image_urls: normalize::string_array_from_text(
            row.try_get::<Option<String>, _>("image_urls")
                .unwrap_or(None)
                .as_deref(),
        ),
        external_links: normalize::string_array_from_text(
            row.try_get::<Option<String>, _>("external_links")
                .unwrap_or(None)
                .as_deref(),
        ),
        author_name: row.try_get("author_name").unwrap_or(None),
        author_email: row.try_get("author_email").unwrap_or(None),
        created_at: row
            .try_get::<Option<DateTime<Utc>>, _>("created_at")
            .unwrap_or(None),
        updated_at: row
            .try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .unwrap_or(None),
    }
}
