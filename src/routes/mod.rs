pub mod reset;

use axum::Router;
use axum::routing::post;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/auth/send-reset-code", post(reset::send_code))
        .route("/api/v1/auth/verify-reset-code", post(reset::verify_code))
}
