use axum::Json;

use crate::dto::HealthResponse;

pub async fn check_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "API WORKING",
    })
}
