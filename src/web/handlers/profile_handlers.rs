// src/web/handlers/profile_handlers.rs
use rocket::serde::json::Json;
use rocket::State;

use crate::types::{Profile, ProfileUpdate, UserId};
use crate::web::types::{
    ApiError, AppState, DataResponse, StandardErrorResponse, StandardRequest, WithConversationId,
};

pub async fn get_profile_handler(
    user_id: String,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Profile>>, ApiError> {
    let user_id = UserId::new(user_id);

    state
        .profiles
        .get(&user_id)
        .await
        .map(|profile| {
            Json(DataResponse::success(
                format!("Profile of {}", user_id),
                profile,
                None,
            ))
        })
        .map_err(|e| StandardErrorResponse::from_store_error(&e, "PROFILE_ERROR", None))
}

pub async fn update_profile_handler(
    user_id: String,
    request: Json<StandardRequest<ProfileUpdate>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Profile>>, ApiError> {
    let user_id = UserId::new(user_id);
    let conversation_id = request.conversation_id();
    let update = request.into_inner().data;

    match state.profiles.update(&user_id, update).await {
        Ok(profile) => Ok(Json(DataResponse::success(
            "Profile updated".to_string(),
            profile,
            conversation_id,
        ))),
        Err(e) => Err(StandardErrorResponse::from_store_error(
            &e,
            "PROFILE_ERROR",
            conversation_id,
        )),
    }
}
