// src/types/swipe.rs
//! Swipe rows and the shapes read back from the `swipes` table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{StoreError, StoreResult};
use crate::types::job::Job;

macro_rules! opaque_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(UserId);
opaque_id!(JobId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Like,
    Dislike,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Like => "like",
            Direction::Dislike => "dislike",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Direction::Like),
            "dislike" => Ok(Direction::Dislike),
            other => Err(StoreError::InvalidSwipe(format!(
                "unknown direction '{}'",
                other
            ))),
        }
    }
}

/// One user's judgment on one job offer. Written as a whole row; the
/// store owns `created_at`, so it never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swipe {
    user_id: UserId,
    job_id: JobId,
    direction: Direction,
    is_superlike: bool,
}

impl Swipe {
    /// A superlike is only meaningful on top of a like.
    pub fn new(
        user_id: UserId,
        job_id: JobId,
        direction: Direction,
        is_superlike: bool,
    ) -> StoreResult<Self> {
        if is_superlike && direction != Direction::Like {
            return Err(StoreError::InvalidSwipe(format!(
                "job {} cannot be superliked with direction '{}'",
                job_id, direction
            )));
        }

        Ok(Self {
            user_id,
            job_id,
            direction,
            is_superlike,
        })
    }

    pub fn superlike(user_id: UserId, job_id: JobId) -> Self {
        Self {
            user_id,
            job_id,
            direction: Direction::Like,
            is_superlike: true,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_superlike(&self) -> bool {
        self.is_superlike
    }
}

/// Inline job returned by the `swipes -> jobs` join.
///
/// The backend may hand back an object, an array, `null`, or nothing at
/// all. That shape is settled here, once, so callers only ever match on
/// two cases.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JoinedJob {
    Found(Job),
    #[default]
    Missing,
}

impl JoinedJob {
    pub fn from_value(value: Value) -> Self {
        match Job::from_value(value) {
            Some(job) => JoinedJob::Found(job),
            None => JoinedJob::Missing,
        }
    }

    pub fn from_payload(payload: Option<&str>) -> Self {
        match payload.and_then(Job::from_payload) {
            Some(job) => JoinedJob::Found(job),
            None => JoinedJob::Missing,
        }
    }
}

impl<'de> Deserialize<'de> for JoinedJob {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.map(JoinedJob::from_value).unwrap_or_default())
    }
}

/// A superliked swipe as read back from the store, with its joined job.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuperlikedRow {
    pub job_id: JobId,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "jobs", default)]
    pub job: JoinedJob,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dislike_cannot_be_superliked() {
        let result = Swipe::new("u1".into(), "j1".into(), Direction::Dislike, true);
        assert!(matches!(result, Err(StoreError::InvalidSwipe(_))));

        let swipe = Swipe::new("u1".into(), "j1".into(), Direction::Dislike, false).unwrap();
        assert_eq!(swipe.direction(), Direction::Dislike);
        assert!(!swipe.is_superlike());
    }

    #[test]
    fn test_superlike_always_likes() {
        let swipe = Swipe::superlike("u1".into(), "j1".into());
        assert_eq!(swipe.direction(), Direction::Like);
        assert!(swipe.is_superlike());
    }

    #[test]
    fn test_swipe_serializes_without_created_at() {
        let swipe = Swipe::superlike("u1".into(), "j1".into());
        assert_eq!(
            serde_json::to_value(&swipe).unwrap(),
            json!({
                "user_id": "u1",
                "job_id": "j1",
                "direction": "like",
                "is_superlike": true
            })
        );
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("like".parse::<Direction>().unwrap(), Direction::Like);
        assert_eq!("dislike".parse::<Direction>().unwrap(), Direction::Dislike);
        assert!("superlike".parse::<Direction>().is_err());
    }

    #[test]
    fn test_joined_job_shapes() {
        let rows: Vec<SuperlikedRow> = serde_json::from_value(json!([
            { "job_id": "j1", "created_at": "2025-03-01T10:05:00+00:00", "jobs": { "id": "j1", "title": "Dev" } },
            { "job_id": "j2", "created_at": "2025-03-01T10:04:00+00:00", "jobs": [{ "id": "j2" }] },
            { "job_id": "j3", "created_at": "2025-03-01T10:03:00+00:00", "jobs": null },
            { "job_id": "j4", "created_at": "2025-03-01T10:02:00+00:00" }
        ]))
        .unwrap();

        assert!(matches!(&rows[0].job, JoinedJob::Found(job) if job.id.as_str() == "j1"));
        assert_eq!(rows[1].job, JoinedJob::Missing);
        assert_eq!(rows[2].job, JoinedJob::Missing);
        assert_eq!(rows[3].job, JoinedJob::Missing);
    }
}
