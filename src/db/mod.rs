//! Database module
//!
//! All four tables live in one SQLite file. Every statement binds its
//! parameters; caller input never reaches the query text itself. Insert
//! success is judged by the store's explicit affected-row report, and a
//! failed query surfaces as an error rather than a zero count.

mod schema;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::config::DatabaseConfig;
use crate::error::ApiError;
use crate::events::{GpsFix, SmsMessage};

#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&format!("sqlite:{}?mode=rwc", config.url))
            .await?;
        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        // Enable WAL mode for better concurrency
        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&self.pool)
            .await?;
        sqlx::query("PRAGMA synchronous=NORMAL")
            .execute(&self.pool)
            .await?;

        sqlx::query(schema::CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(schema::CREATE_GPS_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(schema::CREATE_VIEWS_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(schema::CREATE_SMS_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(schema::CREATE_INDEX_VIEWS_KEY_TIME)
            .execute(&self.pool)
            .await?;
        sqlx::query(schema::CREATE_INDEX_VIEWS_BASE)
            .execute(&self.pool)
            .await?;
        sqlx::query(schema::CREATE_INDEX_USERS_NAME)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Count credential rows matching the pair exactly. Authorization
    /// requires exactly one row; the caller never learns which half of
    /// the pair failed to match.
    pub async fn credential_count(
        &self,
        username: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM Users WHERE Username = ? AND Password = ?")
                .bind(username)
                .bind(password)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    pub async fn insert_gps(&self, fix: &GpsFix) -> Result<(), ApiError> {
        let result = sqlx::query(
            "INSERT INTO GPS (Username, Latitude, Longitude, Time, SPD) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&fix.username)
        .bind(&fix.latitude)
        .bind(&fix.longitude)
        .bind(&fix.timestamp)
        .bind(&fix.speed)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() != 1 {
            return Err(ApiError::InsertUnconfirmed);
        }
        Ok(())
    }

    pub async fn insert_sms(&self, message: &SmsMessage) -> Result<(), ApiError> {
        let result = sqlx::query(
            "INSERT INTO sms (from_number, text, sentStamp, receiveStamp, sim) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&message.from)
        .bind(&message.text)
        .bind(&message.sent_stamp)
        .bind(&message.receive_stamp)
        .bind(&message.sim)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() != 1 {
            return Err(ApiError::InsertUnconfirmed);
        }
        Ok(())
    }

    pub async fn insert_view(
        &self,
        site_base: &str,
        path: &str,
        time: i64,
    ) -> Result<(), ApiError> {
        let result = sqlx::query("INSERT INTO views (BaseURL, Path, Time) VALUES (?, ?, ?)")
            .bind(site_base)
            .bind(path)
            .bind(time)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() != 1 {
            return Err(ApiError::InsertUnconfirmed);
        }
        Ok(())
    }

    /// All views of one page, no time bound.
    pub async fn count_views(&self, site_base: &str, path: &str) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM views WHERE BaseURL = ? AND Path = ?")
                .bind(site_base)
                .bind(path)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }

    /// All views across an entire site, any path.
    pub async fn count_site_views(&self, site_base: &str) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM views WHERE BaseURL = ?")
            .bind(site_base)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Views of one page newer than the cutoff (seconds since epoch).
    pub async fn count_views_since(
        &self,
        site_base: &str,
        path: &str,
        cutoff: i64,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM views WHERE BaseURL = ? AND Path = ? AND Time > ?",
        )
        .bind(site_base)
        .bind(path)
        .bind(cutoff)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    /// Administrative insert; credentials are created out-of-band and are
    /// read-only to the request path.
    pub async fn insert_user(&self, username: &str, password: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO Users (Username, Password) VALUES (?, ?)")
            .bind(username)
            .bind(password)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count_sms(&self) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sms")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    pub async fn count_gps(&self, username: &str) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM GPS WHERE Username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}
