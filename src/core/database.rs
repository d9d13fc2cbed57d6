// src/core/database.rs
//! SQLite-backed store: swipes, the job catalogue and profiles

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::path::Path;

use crate::app_log;
use crate::core::backend::StoreBackend;
use crate::core::FsOps;
use crate::error::{StoreError, StoreResult};
use crate::types::{Job, JobId, JoinedJob, Profile, SuperlikedRow, Swipe, UserId};

// Millisecond precision keeps superlikes issued in the same second ordered.
const NOW_SQL: &str = "(strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))";

// ===== Core Database Connection Management =====

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create new database connection with automatic setup
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            FsOps::ensure_dir_exists(parent).await?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        app_log!(
            info,
            "Database connection established: {}",
            database_path.display()
        );

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Private in-memory database; a single connection so every query sees the same data.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory database")?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS jobs (
                id TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                imported_at TEXT NOT NULL DEFAULT {now}
            );
            "#,
            now = NOW_SQL
        ))
        .execute(&self.pool)
        .await?;

        // No foreign key to jobs: offers can disappear while swipes stay.
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS swipes (
                user_id TEXT NOT NULL,
                job_id TEXT NOT NULL,
                direction TEXT NOT NULL CHECK (direction IN ('like', 'dislike')),
                is_superlike BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TEXT NOT NULL DEFAULT {now},
                PRIMARY KEY (user_id, job_id)
            );
            "#,
            now = NOW_SQL
        ))
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_swipes_user_superlike ON swipes(user_id, is_superlike, created_at);",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT {now}
            );
            "#,
            now = NOW_SQL
        ))
        .execute(&self.pool)
        .await?;

        app_log!(info, "Database migrations completed");
        Ok(())
    }

    /// Import or refresh job offers in the catalogue
    pub async fn upsert_jobs(&self, jobs: &[Job]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        for job in jobs {
            let payload = serde_json::to_string(job)
                .with_context(|| format!("Failed to serialize job {}", job.id))?;

            sqlx::query(
                r#"
                INSERT INTO jobs (id, payload) VALUES (?, ?)
                ON CONFLICT (id) DO UPDATE SET payload = excluded.payload
                "#,
            )
            .bind(job.id.as_str())
            .bind(payload)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to import job {}", job.id))?;
        }

        tx.commit().await?;
        app_log!(info, "Imported {} jobs into catalogue", jobs.len());
        Ok(jobs.len())
    }
}

#[derive(sqlx::FromRow)]
struct SuperlikeRecord {
    job_id: String,
    created_at: DateTime<Utc>,
    job_payload: Option<String>,
}

impl From<SuperlikeRecord> for SuperlikedRow {
    fn from(record: SuperlikeRecord) -> Self {
        Self {
            job_id: JobId::new(record.job_id),
            created_at: record.created_at,
            job: JoinedJob::from_payload(record.job_payload.as_deref()),
        }
    }
}

#[async_trait]
impl StoreBackend for Database {
    async fn upsert_swipe(&self, swipe: &Swipe) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO swipes (user_id, job_id, direction, is_superlike)
            VALUES (?, ?, ?, ?)
            ON CONFLICT (user_id, job_id) DO UPDATE SET
                direction = excluded.direction,
                is_superlike = excluded.is_superlike
            "#,
        )
        .bind(swipe.user_id().as_str())
        .bind(swipe.job_id().as_str())
        .bind(swipe.direction().as_str())
        .bind(swipe.is_superlike())
        .execute(&self.pool)
        .await
        .map_err(StoreError::write)?;

        Ok(())
    }

    async fn select_superliked(&self, user_id: &UserId) -> StoreResult<Vec<SuperlikedRow>> {
        let records = sqlx::query_as::<_, SuperlikeRecord>(
            r#"
            SELECT s.job_id, s.created_at, j.payload AS job_payload
            FROM swipes s
            LEFT JOIN jobs j ON j.id = s.job_id
            WHERE s.user_id = ? AND s.is_superlike = TRUE AND s.direction = 'like'
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::read)?;

        Ok(records.into_iter().map(SuperlikedRow::from).collect())
    }

    async fn select_jobs(&self, ids: &[JobId]) -> StoreResult<Vec<Job>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new("SELECT payload FROM jobs WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str().to_string());
        }
        separated.push_unseparated(")");

        let payloads = builder
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::read)?;

        Ok(payloads
            .iter()
            .filter_map(|payload| {
                let job = Job::from_payload(payload);
                if job.is_none() {
                    app_log!(warn, "Skipping malformed job payload in catalogue");
                }
                job
            })
            .collect())
    }

    async fn select_profile(&self, user_id: &UserId) -> StoreResult<Option<Profile>> {
        let data: Option<String> =
            sqlx::query_scalar("SELECT data FROM profiles WHERE user_id = ?")
                .bind(user_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::read)?;

        data.map(|raw| serde_json::from_str(&raw).map_err(StoreError::read))
            .transpose()
    }

    async fn upsert_profile(&self, user_id: &UserId, profile: &Profile) -> StoreResult<()> {
        let data = serde_json::to_string(profile).map_err(StoreError::write)?;

        sqlx::query(&format!(
            r#"
            INSERT INTO profiles (user_id, data) VALUES (?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                data = excluded.data,
                updated_at = {now}
            "#,
            now = NOW_SQL
        ))
        .bind(user_id.as_str())
        .bind(data)
        .execute(&self.pool)
        .await
        .map_err(StoreError::write)?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::read)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    async fn seeded_db() -> Database {
        let db = Database::in_memory().await.unwrap();
        db.upsert_jobs(&[
            Job::new("j1").with_field("title", "Data engineer"),
            Job::new("j2").with_field("title", "SRE"),
        ])
        .await
        .unwrap();
        db
    }

    async fn swipe_count(db: &Database, user: &str, job: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM swipes WHERE user_id = ? AND job_id = ?")
            .bind(user)
            .bind(job)
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_upsert_keeps_one_row_and_created_at() {
        let db = seeded_db().await;
        let like = Swipe::new("u1".into(), "j1".into(), Direction::Like, false).unwrap();
        db.upsert_swipe(&like).await.unwrap();

        let first: String =
            sqlx::query_scalar("SELECT created_at FROM swipes WHERE user_id = 'u1'")
                .fetch_one(db.pool())
                .await
                .unwrap();

        let superlike = Swipe::superlike("u1".into(), "j1".into());
        db.upsert_swipe(&superlike).await.unwrap();
        db.upsert_swipe(&superlike).await.unwrap();

        let (direction, is_superlike, created_at): (String, bool, String) = sqlx::query_as(
            "SELECT direction, is_superlike, created_at FROM swipes WHERE user_id = 'u1'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();

        assert_eq!(swipe_count(&db, "u1", "j1").await, 1);
        assert_eq!(direction, "like");
        assert!(is_superlike);
        assert_eq!(created_at, first);
    }

    #[tokio::test]
    async fn test_select_superliked_joins_and_orders() {
        let db = seeded_db().await;
        sqlx::query(
            r#"
            INSERT INTO swipes (user_id, job_id, direction, is_superlike, created_at) VALUES
                ('u1', 'j1', 'like', TRUE, '2025-03-01T10:00:00.000Z'),
                ('u1', 'j2', 'like', TRUE, '2025-03-01T10:05:00.000Z'),
                ('u1', 'gone', 'like', TRUE, '2025-03-01T10:02:00.000Z'),
                ('u1', 'j3', 'like', FALSE, '2025-03-01T10:09:00.000Z'),
                ('u1', 'j4', 'dislike', FALSE, '2025-03-01T10:09:00.000Z'),
                ('u2', 'j1', 'like', TRUE, '2025-03-01T10:09:00.000Z')
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let rows = db.select_superliked(&"u1".into()).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(ids, vec!["j2", "gone", "j1"]);

        assert!(matches!(&rows[0].job, JoinedJob::Found(job) if job.field("title").is_some()));
        assert_eq!(rows[1].job, JoinedJob::Missing);
    }

    #[tokio::test]
    async fn test_select_jobs_returns_only_known_ids() {
        let db = seeded_db().await;
        let jobs = db
            .select_jobs(&["j2".into(), "missing".into()])
            .await
            .unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id.as_str(), "j2");
        assert!(db.select_jobs(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_catalogue_payload_is_skipped() {
        let db = seeded_db().await;
        sqlx::query("INSERT INTO jobs (id, payload) VALUES ('bad', '[1, 2]')")
            .execute(db.pool())
            .await
            .unwrap();

        let jobs = db.select_jobs(&["bad".into(), "j1".into()]).await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id.as_str(), "j1");
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let db = Database::in_memory().await.unwrap();
        let user: UserId = "u1".into();
        assert!(db.select_profile(&user).await.unwrap().is_none());

        let mut profile = Profile::default();
        profile.add_hard_skill("Rust");
        db.upsert_profile(&user, &profile).await.unwrap();
        profile.add_interest("voile");
        db.upsert_profile(&user, &profile).await.unwrap();

        assert_eq!(db.select_profile(&user).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_ping() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.ping().await.is_ok());
    }
}
