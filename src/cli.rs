// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::app_log;
use crate::core::{ConfigManager, Database, FsOps, StoreConfig};
use crate::profiles::ProfileService;
use crate::swipes::SwipeStore;
use crate::types::{Direction, Job, JobId, UserId};
use crate::web::{start_web_server, AppState};

#[derive(Parser)]
#[command(name = "jobswipe")]
#[command(about = "Job offer swipes, superlikes and candidate profiles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API (default)
    Serve,
    /// Connect to the configured store and run migrations
    Init,
    /// Import job offers from a JSON array file (SQLite store only)
    ImportJobs { json_file: PathBuf },
    /// Record a like or dislike
    Swipe {
        user_id: String,
        job_id: String,
        #[arg(value_parser = ["like", "dislike"])]
        direction: String,
    },
    /// Superlike a job for a user
    Superlike { user_id: String, job_id: String },
    /// List a user's superliked jobs, newest first
    Superliked { user_id: String },
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let backend = config.connect_store().await?;
            let state = AppState {
                swipes: SwipeStore::new(backend.clone()),
                profiles: ProfileService::new(backend),
            };
            start_web_server(state, config.environment.port).await?;
        }

        Command::Init => {
            swipe_store(&config).await?.ping().await?;
            println!("✅ Store ready ({} environment)", config.environment_name);
        }

        Command::ImportJobs { json_file } => import_jobs(&json_file, &config).await?,

        Command::Swipe {
            user_id,
            job_id,
            direction,
        } => {
            let direction: Direction = direction.parse()?;
            swipe_store(&config)
                .await?
                .record_swipe(&UserId::new(user_id), &JobId::new(job_id), direction)
                .await?;
            println!("✅ Recorded {}", direction);
        }

        Command::Superlike { user_id, job_id } => {
            swipe_store(&config)
                .await?
                .record_superlike(&UserId::new(user_id), &JobId::new(job_id.clone()))
                .await?;
            println!("✅ Superliked job {}", job_id);
        }

        Command::Superliked { user_id } => {
            let jobs = swipe_store(&config)
                .await?
                .list_superliked_jobs(&UserId::new(user_id))
                .await?;
            if jobs.is_empty() {
                println!("No superliked jobs.");
            }
            for job in jobs {
                let title = job
                    .field("title")
                    .and_then(Value::as_str)
                    .unwrap_or("(untitled)");
                println!("{:<38} {}", job.id, title);
            }
        }
    }

    Ok(())
}

async fn swipe_store(config: &ConfigManager) -> Result<SwipeStore> {
    Ok(SwipeStore::new(config.connect_store().await?))
}

async fn import_jobs(json_file: &Path, config: &ConfigManager) -> Result<()> {
    let database_path = match &config.environment.store {
        StoreConfig::Sqlite { database_path } => database_path,
        StoreConfig::Rest { .. } => {
            anyhow::bail!("import-jobs needs the SQLite store; the REST catalogue is managed remotely")
        }
    };

    let content = FsOps::read_file_safe(json_file).await?;
    let jobs = jobs_from_json(&content)?;

    let db = Database::new(database_path).await?;
    let count = db.upsert_jobs(&jobs).await?;

    app_log!(info, "Imported {} jobs from {}", count, json_file.display());
    println!("✅ Imported {} jobs", count);
    Ok(())
}

/// Parse a JSON array of job objects. Numeric ids keep their digits as a
/// string; entries without an `id` (or with `null`) get a fresh one.
pub fn jobs_from_json(content: &str) -> Result<Vec<Job>> {
    let entries: Vec<Value> =
        serde_json::from_str(content).context("Jobs file must be a JSON array")?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let Value::Object(mut fields) = entry else {
                anyhow::bail!("Entry {} is not a JSON object", index);
            };
            let id = match fields.remove("id") {
                Some(Value::String(id)) => id,
                Some(Value::Number(n)) => n.to_string(),
                None | Some(Value::Null) => Uuid::new_v4().to_string(),
                Some(other) => anyhow::bail!("Entry {} has an unusable id: {}", index, other),
            };
            fields.insert("id".to_string(), Value::String(id));
            Job::from_value(Value::Object(fields))
                .with_context(|| format!("Entry {} is not a valid job", index))
        })
        .collect()
}
