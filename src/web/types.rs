// src/web/types.rs

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::profiles::ProfileService;
use crate::swipes::SwipeStore;
use crate::types::{Direction, JobId, UserId};

pub struct AppState {
    pub swipes: SwipeStore,
    pub profiles: ProfileService,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SwipeRequest {
    pub user_id: UserId,
    pub job_id: JobId,
    pub direction: Direction,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SuperlikeRequest {
    pub user_id: UserId,
    pub job_id: JobId,
}

// STANDARD RESPONSE TYPES

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

// Request types with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

// Helper trait for extracting conversation_id
pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

pub type ApiError = (Status, Json<StandardErrorResponse>);

// Helper functions to create standard responses
impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }

    /// Translate a store failure, keeping the backend's message as the error text
    pub fn from_store_error(
        err: &StoreError,
        failure_code: &str,
        conversation_id: Option<String>,
    ) -> ApiError {
        let (status, code, suggestions) = match err {
            StoreError::InvalidSwipe(_) => (
                Status::BadRequest,
                "INVALID_SWIPE",
                vec!["Only a like can be superliked".to_string()],
            ),
            StoreError::Write(_) | StoreError::Read(_) => (
                Status::BadGateway,
                failure_code,
                vec!["Try again in a few moments".to_string()],
            ),
        };

        (
            status,
            Json(Self::new(
                err.message().to_string(),
                code.to_string(),
                suggestions,
                conversation_id,
            )),
        )
    }
}
