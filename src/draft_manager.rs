//! Store collaborator for drafts.
//!
//! Drafts may be empty until published. Publishing validates the content
//! precondition, then creates the public news item and removes the draft in
//! one transaction so a concurrent reader never sees neither or both.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Pool, Postgres, Row};
use tracing::{debug, info};

use crate::news_manager::item_from_row;
use crate::normalize;
use crate::types::{Draft, DraftPatch, FeedItem, NewDraft, PortalError, Result};

pub struct DraftManager {
    db: Pool<Postgres>,
}

impl DraftManager {
    pub async fn new(database_url: &str) -> Result<Self> {
        let db = PgPool::connect(database_url).await?;
        Ok(Self { db })
    }

    pub fn with_pool(db: Pool<Postgres>) -> Self {
        Self { db }
    }

    /// The caller's drafts, most recently touched first.
    pub async fn my_drafts(&self, user_id: i64) -> Result<Vec<Draft>> {
        let rows = sqlx::query(
            "SELECT * FROM drafts WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        debug!("Fetched {} drafts for user {}", rows.len(), user_id);
        Ok(rows.iter().map(draft_from_row).collect())
    }

    pub async fn create(&self, user_id: i64, draft: NewDraft) -> Result<Draft> {
        let row = sqlx::query(
            r#"
            INSERT INTO drafts (user_id, title, content, hashtags, image_urls, external_links)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&draft.title)
        .bind(draft.content.as_deref().unwrap_or(""))
        .bind(normalize::to_json_column(draft.hashtags.as_ref()))
        .bind(normalize::to_json_column(draft.image_urls.as_ref()))
        .bind(normalize::to_json_column(draft.external_links.as_ref()))
        .fetch_one(&self.db)
        .await?;

        let created = draft_from_row(&row);
        info!("User {} created draft {}", user_id, created.id);
        Ok(created)
    }

    /// Partial update. Unlike news items, an empty patch is not an error:
    /// the current row comes back unchanged.
    pub async fn update(&self, user_id: i64, id: i64, patch: DraftPatch) -> Result<Draft> {
        if patch.is_empty() {
            let row = sqlx::query("SELECT * FROM drafts WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?;
            return match row {
                Some(row) => Ok(draft_from_row(&row)),
                None => Err(PortalError::DraftNotFound { id }),
            };
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
            "UPDATE drafts SET {}, updated_at = NOW() WHERE id = ${} AND user_id = ${} RETURNING *",
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
                info!("User {} updated draft {}", user_id, id);
                Ok(draft_from_row(&row))
            }
            None => Err(PortalError::DraftNotFound { id }),
        }
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM drafts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PortalError::DraftNotFound { id });
        }
        info!("User {} deleted draft {}", user_id, id);
        Ok(())
    }

    /// Promote a draft to a public news item. Fails `DraftNotFound` for a
    /// missing or foreign draft, `EmptyDraft` when the trimmed title or
    /// content is empty. Insert and delete commit together.
    pub async fn publish(&self, user_id: i64, id: i64) -> Result<FeedItem> {
        let mut tx = self.db.begin().await?;

        let row = sqlx::query("SELECT * FROM drafts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        let draft = match row {
            Some(row) => draft_from_row(&row),
            None => return Err(PortalError::DraftNotFound { id }),
        };

        let title = draft.title.as_deref().unwrap_or("");
        let content = draft.content.as_deref().unwrap_or("");
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(PortalError::EmptyDraft { id });
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO news_items (user_id, title, content, hashtags, image_urls, external_links)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(serde_json::to_string(&draft.hashtags)?)
        .bind(serde_json::to_string(&draft.image_urls)?)
        .bind(serde_json::to_string(&draft.external_links)?)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM drafts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let item = item_from_row(&inserted);
        info!("User {} published draft {} as news item {}", user_id, id, item.id);
        Ok(item)
    }
}

fn draft_from_row(row: &PgRow) -> Draft {
    Draft {
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
        created_at: row
            .try_get::<Option<DateTime<Utc>>, _>("created_at")
            .unwrap_or(None),
        updated_at: row
            .try_get::<Option<DateTime<Utc>>, _>("updated_at")
            .unwrap_or(None),
    }
}
