// src/core/backend.rs
//! Remote procedures the stores rely on

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Job, JobId, Profile, SuperlikedRow, Swipe, UserId};

/// A relational backing store reachable through single round trips.
///
/// Each method is exactly one request; retries, batching decisions and
/// reshaping belong to the callers.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Insert-or-update on `swipes`, conflict key `(user_id, job_id)`.
    /// `created_at` is set on insert and left alone on update.
    async fn upsert_swipe(&self, swipe: &Swipe) -> StoreResult<()>;

    /// Superliked likes of `user_id`, joined with `jobs`, newest first.
    async fn select_superliked(&self, user_id: &UserId) -> StoreResult<Vec<SuperlikedRow>>;

    /// Bulk lookup on `jobs` by id. Unknown ids are simply absent.
    async fn select_jobs(&self, ids: &[JobId]) -> StoreResult<Vec<Job>>;

    async fn select_profile(&self, user_id: &UserId) -> StoreResult<Option<Profile>>;

    /// Insert-or-update on `profiles`, conflict key `user_id`.
    async fn upsert_profile(&self, user_id: &UserId, profile: &Profile) -> StoreResult<()>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> StoreResult<()>;
}
