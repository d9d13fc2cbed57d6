// src/swipes.rs
//! Swipe persistence and superlike retrieval

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::app_log;
use crate::core::StoreBackend;
use crate::error::StoreResult;
use crate::types::{Direction, Job, JobId, JoinedJob, SuperlikedRow, Swipe, UserId};

#[derive(Clone)]
pub struct SwipeStore {
    backend: Arc<dyn StoreBackend>,
}

impl SwipeStore {
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Mark `job_id` as superliked by `user_id`, creating or overwriting the swipe.
    ///
    /// One upsert, no retry. Repeating the call leaves the same row behind.
    pub async fn record_superlike(&self, user_id: &UserId, job_id: &JobId) -> StoreResult<()> {
        let swipe = Swipe::superlike(user_id.clone(), job_id.clone());
        self.write(&swipe).await?;

        app_log!(
            info,
            "Successfully superliked job {} for user {}",
            job_id,
            user_id
        );
        Ok(())
    }

    /// Record a plain like or dislike. Overwrites any earlier judgment,
    /// superlike included.
    pub async fn record_swipe(
        &self,
        user_id: &UserId,
        job_id: &JobId,
        direction: Direction,
    ) -> StoreResult<()> {
        let swipe = Swipe::new(user_id.clone(), job_id.clone(), direction, false)?;
        self.write(&swipe).await?;

        app_log!(
            info,
            "Recorded {} on job {} for user {}",
            direction,
            job_id,
            user_id
        );
        Ok(())
    }

    /// One cheap round trip to the backing store
    pub async fn ping(&self) -> StoreResult<()> {
        self.backend.ping().await
    }

    async fn write(&self, swipe: &Swipe) -> StoreResult<()> {
        self.backend.upsert_swipe(swipe).await.map_err(|e| {
            app_log!(
                error,
                "Error saving swipe on job {} for user {}: {}",
                swipe.job_id(),
                swipe.user_id(),
                e
            );
            e
        })
    }

    /// Jobs superliked by `user_id`, most recent superlike first.
    ///
    /// Rows whose inline job did not come back are recovered with a single
    /// bulk lookup; jobs that cannot be recovered at all are left out.
    pub async fn list_superliked_jobs(&self, user_id: &UserId) -> StoreResult<Vec<Job>> {
        let mut rows = self.backend.select_superliked(user_id).await.map_err(|e| {
            app_log!(error, "Error fetching superliked swipes for {}: {}", user_id, e);
            e
        })?;

        if rows.is_empty() {
            app_log!(debug, "No superliked swipes found for {}", user_id);
            return Ok(Vec::new());
        }

        // Stable: equal timestamps keep the order the store returned.
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let (mut resolved, missing) = partition_rows(&mut rows);

        if !missing.is_empty() {
            app_log!(
                debug,
                "Recovering {} superliked jobs without inline payload",
                missing.len()
            );
            let recovered = self.backend.select_jobs(&missing).await.map_err(|e| {
                app_log!(error, "Error fetching missing jobs for {}: {}", user_id, e);
                e
            })?;
            merge_recovered(&mut resolved, &missing, recovered);
        }

        let jobs = project(&rows, resolved);
        app_log!(
            info,
            "Loaded {} superliked jobs for user {}",
            jobs.len(),
            user_id
        );
        Ok(jobs)
    }
}

/// Split rows into jobs already at hand, keyed by the row's job id, and
/// the ids that still need a lookup.
fn partition_rows(rows: &mut [SuperlikedRow]) -> (HashMap<JobId, Job>, Vec<JobId>) {
    let mut resolved = HashMap::with_capacity(rows.len());
    let mut missing = Vec::new();
    let mut seen = HashSet::new();

    for row in rows.iter_mut() {
        match std::mem::take(&mut row.job) {
            JoinedJob::Found(job) => {
                resolved.insert(row.job_id.clone(), job);
            }
            JoinedJob::Missing => {
                if seen.insert(row.job_id.clone()) {
                    missing.push(row.job_id.clone());
                }
            }
        }
    }

    (resolved, missing)
}

/// Only jobs that were actually asked for are merged in.
fn merge_recovered(resolved: &mut HashMap<JobId, Job>, missing: &[JobId], recovered: Vec<Job>) {
    let wanted: HashSet<&JobId> = missing.iter().collect();
    for job in recovered {
        if wanted.contains(&job.id) {
            resolved.entry(job.id.clone()).or_insert(job);
        }
    }
}

/// Walk the rows in order, emitting each resolvable job exactly once.
fn project(rows: &[SuperlikedRow], mut resolved: HashMap<JobId, Job>) -> Vec<Job> {
    rows.iter()
        .filter_map(|row| resolved.remove(&row.job_id))
        .collect()
}
