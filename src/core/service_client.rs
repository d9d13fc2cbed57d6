// src/core/service_client.rs
//! HTTP client for the managed backend's PostgREST interface

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::app_log;
use crate::core::backend::StoreBackend;
use crate::error::{StoreError, StoreResult};
use crate::types::{Job, JobId, Profile, SuperlikedRow, Swipe, UserId};

const REST_PREFIX: &str = "/rest/v1";
const SWIPES_TABLE: &str = "swipes";
const JOBS_TABLE: &str = "jobs";
const PROFILES_TABLE: &str = "profiles";

const SWIPE_CONFLICT_KEY: &str = "user_id,job_id";
const PROFILE_CONFLICT_KEY: &str = "user_id";
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";
const SUPERLIKED_SELECT: &str = "job_id,created_at,jobs(*)";

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: String,
}

#[derive(Serialize)]
struct ProfileRowRef<'a> {
    user_id: &'a UserId,
    #[serde(flatten)]
    profile: &'a Profile,
}

#[derive(Deserialize)]
struct ProfileRow {
    #[serde(flatten)]
    profile: Profile,
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client with configuration
    pub fn new(base_url: &str, api_key: &str, timeout_seconds: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("API key is not a valid header value")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}{}/{}", self.base_url, REST_PREFIX, table)
    }

    fn upsert(&self, table: &str, conflict_key: &str) -> RequestBuilder {
        self.client
            .post(self.table_url(table))
            .query(&[("on_conflict", conflict_key)])
            .header("Prefer", UPSERT_PREFERENCE)
    }

    async fn send(request: RequestBuilder, wrap: fn(String) -> StoreError) -> StoreResult<Response> {
        let response = request.send().await.map_err(|e| wrap(e.to_string()))?;

        let status = response.status();
        app_log!(trace, "Store response status: {}", status);

        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            app_log!(error, "Store error response ({}): {}", status, error_text);
            Err(wrap(backend_message(&error_text)))
        }
    }
}

/// The backend's own diagnostic when the body carries one, else the raw text.
fn backend_message(body: &str) -> String {
    serde_json::from_str::<BackendErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| body.to_string())
}

fn superliked_query(user_id: &UserId) -> Vec<(&'static str, String)> {
    vec![
        ("select", SUPERLIKED_SELECT.to_string()),
        ("user_id", format!("eq.{}", user_id)),
        ("is_superlike", "eq.true".to_string()),
        ("direction", "eq.like".to_string()),
        ("order", "created_at.desc".to_string()),
    ]
}

/// PostgREST `in` filter; values are quoted so commas and parentheses stay inside.
fn in_filter(ids: &[JobId]) -> String {
    let quoted: Vec<String> = ids
        .iter()
        .map(|id| format!("\"{}\"", id.as_str().replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

#[async_trait]
impl StoreBackend for ServiceClient {
    async fn upsert_swipe(&self, swipe: &Swipe) -> StoreResult<()> {
        let request = self
            .upsert(SWIPES_TABLE, SWIPE_CONFLICT_KEY)
            .json(&[swipe]);

        Self::send(request, StoreError::Write).await?;
        Ok(())
    }

    async fn select_superliked(&self, user_id: &UserId) -> StoreResult<Vec<SuperlikedRow>> {
        let request = self
            .client
            .get(self.table_url(SWIPES_TABLE))
            .query(&superliked_query(user_id));

        Self::send(request, StoreError::Read)
            .await?
            .json::<Vec<SuperlikedRow>>()
            .await
            .map_err(StoreError::read)
    }

    async fn select_jobs(&self, ids: &[JobId]) -> StoreResult<Vec<Job>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let request = self
            .client
            .get(self.table_url(JOBS_TABLE))
            .query(&[("select", "*".to_string()), ("id", in_filter(ids))]);

        let rows = Self::send(request, StoreError::Read)
            .await?
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(StoreError::read)?;

        Ok(rows.into_iter().filter_map(Job::from_value).collect())
    }

    async fn select_profile(&self, user_id: &UserId) -> StoreResult<Option<Profile>> {
        let request = self
            .client
            .get(self.table_url(PROFILES_TABLE))
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
            ]);

        let rows = Self::send(request, StoreError::Read)
            .await?
            .json::<Vec<ProfileRow>>()
            .await
            .map_err(StoreError::read)?;

        Ok(rows.into_iter().next().map(|row| row.profile))
    }

    async fn upsert_profile(&self, user_id: &UserId, profile: &Profile) -> StoreResult<()> {
        let request = self
            .upsert(PROFILES_TABLE, PROFILE_CONFLICT_KEY)
            .json(&[ProfileRowRef { user_id, profile }]);

        Self::send(request, StoreError::Write).await?;
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        let request = self
            .client
            .get(self.table_url(JOBS_TABLE))
            .query(&[("select", "id"), ("limit", "1")]);

        Self::send(request, StoreError::Read).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_prefers_error_body() {
        let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"swipes_pkey\""}"#;
        assert_eq!(
            backend_message(body),
            "duplicate key value violates unique constraint \"swipes_pkey\""
        );
        assert_eq!(backend_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_in_filter_quotes_ids() {
        let ids: Vec<JobId> = vec!["a1".into(), "b,2".into(), "c\"3".into()];
        assert_eq!(in_filter(&ids), r#"in.("a1","b,2","c\"3")"#);
    }

    #[test]
    fn test_superliked_query_filters_and_orders() {
        let query = superliked_query(&"u1".into());
        assert!(query.contains(&("select", "job_id,created_at,jobs(*)".to_string())));
        assert!(query.contains(&("user_id", "eq.u1".to_string())));
        assert!(query.contains(&("is_superlike", "eq.true".to_string())));
        assert!(query.contains(&("direction", "eq.like".to_string())));
        assert!(query.contains(&("order", "created_at.desc".to_string())));
    }

    #[test]
    fn test_profile_row_carries_user_id() {
        let user: UserId = "u1".into();
        let mut profile = Profile::default();
        profile.add_interest("photo");

        let value = serde_json::to_value(ProfileRowRef {
            user_id: &user,
            profile: &profile,
        })
        .unwrap();
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["interests"][0], "photo");

        let row: ProfileRow = serde_json::from_value(value).unwrap();
        assert_eq!(row.profile, profile);
    }

    #[test]
    fn test_client_normalizes_base_url() {
        let client = ServiceClient::new("https://store.example.com/", "key", 30).unwrap();
        assert_eq!(
            client.table_url(SWIPES_TABLE),
            "https://store.example.com/rest/v1/swipes"
        );
    }
}
