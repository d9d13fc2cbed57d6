// src/web/handlers/swipe_handlers.rs
use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::types::{Job, UserId};
use crate::web::types::{
    ActionResponse, ApiError, AppState, DataResponse, StandardErrorResponse, StandardRequest,
    SuperlikeRequest, SwipeRequest, WithConversationId,
};

pub async fn record_swipe_handler(
    request: Json<StandardRequest<SwipeRequest>>,
    state: &State<AppState>,
) -> Result<Json<ActionResponse>, ApiError> {
    let conversation_id = request.conversation_id();
    let SwipeRequest {
        user_id,
        job_id,
        direction,
    } = &request.data;

    match state.swipes.record_swipe(user_id, job_id, *direction).await {
        Ok(()) => Ok(Json(ActionResponse::success(
            format!("Recorded {} on job {}", direction, job_id),
            "swiped".to_string(),
            conversation_id,
        ))),
        Err(e) => Err(StandardErrorResponse::from_store_error(
            &e,
            "SWIPE_WRITE_ERROR",
            conversation_id,
        )),
    }
}

pub async fn record_superlike_handler(
    request: Json<StandardRequest<SuperlikeRequest>>,
    state: &State<AppState>,
) -> Result<Json<ActionResponse>, ApiError> {
    let conversation_id = request.conversation_id();
    let SuperlikeRequest { user_id, job_id } = &request.data;

    match state.swipes.record_superlike(user_id, job_id).await {
        Ok(()) => Ok(Json(ActionResponse::success(
            format!("Job {} superliked", job_id),
            "superliked".to_string(),
            conversation_id,
        ))),
        Err(e) => Err(StandardErrorResponse::from_store_error(
            &e,
            "SWIPE_WRITE_ERROR",
            conversation_id,
        )),
    }
}

pub async fn list_superliked_handler(
    user_id: String,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Vec<Job>>>, ApiError> {
    let user_id = UserId::new(user_id);

    match state.swipes.list_superliked_jobs(&user_id).await {
        Ok(jobs) => {
            app_log!(debug, "Returning {} superliked jobs for {}", jobs.len(), user_id);
            Ok(Json(DataResponse::success(
                format!("{} superliked jobs", jobs.len()),
                jobs,
                None,
            )))
        }
        Err(e) => Err(StandardErrorResponse::from_store_error(
            &e,
            "SWIPE_READ_ERROR",
            None,
        )),
    }
}
