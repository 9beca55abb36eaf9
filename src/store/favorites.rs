//! SQLite-backed favorites storage
//!
//! A single table maps a six-digit hex string (primary key) to its
//! insertion timestamp. Rows are stored in insertion order; the display
//! layer re-sorts by hue.

use crate::color::HexColor;
use crate::{PickerError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::path::Path;
use std::str::FromStr;

/// A persisted favorite color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteColor {
    pub hex: HexColor,
    pub created_at: DateTime<Utc>,
}

/// Persistent store for favorite colors
pub struct FavoriteStore {
    pool: SqlitePool,
}

impl FavoriteStore {
    /// Open or create a favorites database at the given path
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let url = format!("sqlite:{}?mode=rwc", path.as_ref().display());
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| PickerError::storage("parsing database path", e))?
            .create_if_missing(true);

        Self::connect(SqlitePoolOptions::new().max_connections(5), options).await
    }

    /// Open an in-memory database, for tests and ephemeral sessions
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| PickerError::storage("configuring in-memory database", e))?;

        // A single connection: each in-memory connection is its own
        // database, so the pool must never open a second one.
        Self::connect(SqlitePoolOptions::new().max_connections(1), options).await
    }

    async fn connect(
        pool_options: SqlitePoolOptions,
        options: SqliteConnectOptions,
    ) -> Result<Self> {
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| PickerError::storage("opening favorites database", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS colors (
                hex TEXT PRIMARY KEY,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| PickerError::storage("creating colors table", e))?;

        Ok(Self { pool })
    }

    /// Insert a color, replacing any existing row for the same hex
    pub async fn insert(&self, color: HexColor) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO colors (hex, created_at) VALUES (?, ?)")
            .bind(color.to_string())
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| PickerError::storage("inserting favorite", e))?;
        Ok(())
    }

    /// Delete a color; deleting an absent color is a no-op
    pub async fn remove(&self, color: HexColor) -> Result<()> {
        sqlx::query("DELETE FROM colors WHERE hex = ?")
            .bind(color.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| PickerError::storage("removing favorite", e))?;
        Ok(())
    }

    /// Whether a color is currently saved
    pub async fn contains(&self, color: HexColor) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT 1 FROM colors WHERE hex = ?")
            .bind(color.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PickerError::storage("querying favorite", e))?;
        Ok(row.is_some())
    }

    /// All saved colors in insertion order
    pub async fn all(&self) -> Result<Vec<FavoriteColor>> {
        let rows = sqlx::query_as::<_, FavoriteRow>(
            "SELECT hex, created_at FROM colors ORDER BY created_at ASC, hex ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PickerError::storage("listing favorites", e))?;

        rows.into_iter().map(FavoriteColor::try_from).collect()
    }
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    hex: String,
    created_at: String,
}

impl TryFrom<FavoriteRow> for FavoriteColor {
    type Error = PickerError;

    fn try_from(row: FavoriteRow) -> Result<FavoriteColor> {
        let hex = HexColor::parse(&row.hex)
            .map_err(|_| PickerError::storage_data(format!("stored hex {:?} is invalid", row.hex)))?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map_err(|e| PickerError::storage_data(format!("stored timestamp: {e}")))?
            .with_timezone(&Utc);
        Ok(FavoriteColor { hex, created_at })
    }
}

/// Order favorites by hue angle for display, red first
pub fn sort_by_hue(favorites: &mut [FavoriteColor]) {
    favorites.sort_by(|a, b| a.hex.hue_degrees().total_cmp(&b.hex.hue_degrees()));
}
