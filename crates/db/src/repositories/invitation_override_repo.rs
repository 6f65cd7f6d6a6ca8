//! Repository for the `invitation_overrides` table.
//!
//! One row per owner. A save replaces every column in a single upsert, so
//! the last writer wins.

use sqlx::PgPool;
use vowpage_core::content::ListKind;
use vowpage_core::invitation::ScalarField;

use crate::models::invitation_override::{InvitationOverrideRow, OverrideColumns};

/// Column list for the `invitation_overrides` table.
const COLUMNS: &str = "id, owner_key, \
    groom_name, bride_name, groom_parents, bride_parents, \
    wedding_date, wedding_time, venue_name, venue_address, map_url, \
    greeting, closing_message, primary_color, accent_color, \
    cover_image_url, video_url, music_url, music_title, \
    events, story, gallery, donations, lyrics, \
    created_at, updated_at";

/// Provides data access for invitation overrides.
pub struct InvitationOverrideRepo;

impl InvitationOverrideRepo {
    /// Find the override row for an owner.
    pub async fn find_by_owner(
        pool: &PgPool,
        owner_key: &str,
    ) -> Result<Option<InvitationOverrideRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invitation_overrides WHERE owner_key = $1");
        sqlx::query_as::<_, InvitationOverrideRow>(&query)
            .bind(owner_key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the owner's override.
    pub async fn upsert(
        pool: &PgPool,
        owner_key: &str,
        columns: &OverrideColumns,
    ) -> Result<InvitationOverrideRow, sqlx::Error> {
        let query = upsert_sql();
        let mut q = sqlx::query_as::<_, InvitationOverrideRow>(&query).bind(owner_key);
        for value in &columns.scalars {
            q = q.bind(value.as_deref());
        }
        for value in &columns.lists {
            q = q.bind(value.clone());
        }
        q.fetch_one(pool).await
    }

    /// Delete the owner's override, reverting the invitation to the template.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, owner_key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invitation_overrides WHERE owner_key = $1")
            .bind(owner_key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Column names written by an upsert, in bind order after `owner_key`.
fn write_columns() -> Vec<&'static str> {
    ScalarField::ALL
        .iter()
        .map(|f| f.as_str())
        .chain(ListKind::ALL.iter().map(|k| k.as_str()))
        .collect()
}

fn upsert_sql() -> String {
    let names = write_columns();
    let placeholders: Vec<String> = (2..=names.len() + 1).map(|i| format!("${i}")).collect();
    let updates: Vec<String> = names
        .iter()
        .map(|name| format!("{name} = EXCLUDED.{name}"))
        .collect();

    format!(
        "INSERT INTO invitation_overrides (owner_key, {}) \
         VALUES ($1, {}) \
         ON CONFLICT (owner_key) \
         DO UPDATE SET {}, updated_at = NOW() \
         RETURNING {COLUMNS}",
        names.join(", "),
        placeholders.join(", "),
        updates.join(", "),
    )
}
