// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, patch, post, routes, Build, Request, Response, Rocket, State};

use crate::app_log;
use crate::types::{Job, Profile, ProfileUpdate};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[post("/swipes", data = "<request>")]
pub async fn record_swipe(
    request: Json<StandardRequest<SwipeRequest>>,
    state: &State<AppState>,
) -> Result<Json<ActionResponse>, ApiError> {
    handlers::record_swipe_handler(request, state).await
}

#[post("/swipes/superlike", data = "<request>")]
pub async fn record_superlike(
    request: Json<StandardRequest<SuperlikeRequest>>,
    state: &State<AppState>,
) -> Result<Json<ActionResponse>, ApiError> {
    handlers::record_superlike_handler(request, state).await
}

#[get("/swipes/superliked?<user_id>")]
pub async fn list_superliked(
    user_id: String,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Vec<Job>>>, ApiError> {
    handlers::list_superliked_handler(user_id, state).await
}

#[get("/profile/<user_id>")]
pub async fn get_profile(
    user_id: String,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Profile>>, ApiError> {
    handlers::get_profile_handler(user_id, state).await
}

#[patch("/profile/<user_id>", data = "<request>")]
pub async fn update_profile(
    user_id: String,
    request: Json<StandardRequest<ProfileUpdate>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<Profile>>, ApiError> {
    handlers::update_profile_handler(user_id, request, state).await
}

#[get("/health")]
pub async fn health(state: &State<AppState>) -> Result<Json<TextResponse>, ApiError> {
    handlers::health_handler(state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be understood".to_string(),
        "UNPROCESSABLE".to_string(),
        vec!["direction must be either \"like\" or \"dislike\"".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the API without launching it
pub fn build_rocket(rocket: Rocket<Build>, state: AppState) -> Rocket<Build> {
    rocket
        .attach(Cors)
        .manage(state)
        .register("/api", catchers![bad_request, unprocessable, internal_error])
        .mount(
            "/api",
            routes![
                record_swipe,
                record_superlike,
                list_superliked,
                get_profile,
                update_profile,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(state: AppState, port: u16) -> Result<()> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    app_log!(info, "Starting job swipe API server on port {}", port);

    build_rocket(rocket::custom(figment), state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
