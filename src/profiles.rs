// src/profiles.rs
use std::sync::Arc;

use crate::app_log;
use crate::core::StoreBackend;
use crate::error::StoreResult;
use crate::types::{Profile, ProfileUpdate, UserId};

#[derive(Clone)]
pub struct ProfileService {
    backend: Arc<dyn StoreBackend>,
}

impl ProfileService {
    pub fn new(backend: Arc<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Stored profile, or an empty one for users who never saved anything
    pub async fn get(&self, user_id: &UserId) -> StoreResult<Profile> {
        Ok(self
            .backend
            .select_profile(user_id)
            .await?
            .unwrap_or_default())
    }

    /// Apply a partial update and persist the result
    pub async fn update(&self, user_id: &UserId, update: ProfileUpdate) -> StoreResult<Profile> {
        let mut profile = self.get(user_id).await?;
        profile.apply(update);

        self.backend
            .upsert_profile(user_id, &profile)
            .await
            .map_err(|e| {
                app_log!(error, "Error saving profile for {}: {}", user_id, e);
                e
            })?;

        app_log!(info, "Updated profile for user {}", user_id);
        Ok(profile)
    }
}
