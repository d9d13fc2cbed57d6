// src/web/handlers/system_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;

use crate::app_log;
use crate::web::types::*;

pub async fn health_handler(state: &State<AppState>) -> Result<Json<TextResponse>, ApiError> {
    match state.swipes.ping().await {
        Ok(()) => Ok(Json(TextResponse::success("OK".to_string(), None))),
        Err(e) => {
            app_log!(error, "Health check failed: {}", e);
            Err((
                Status::ServiceUnavailable,
                Json(StandardErrorResponse::new(
                    e.message().to_string(),
                    "STORE_UNAVAILABLE".to_string(),
                    vec!["Check the backing store connection".to_string()],
                    None,
                )),
            ))
        }
    }
}
