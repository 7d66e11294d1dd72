use axum::Json;
use axum::extract::{Extension, State};
use rolegate_core::UserIdentity;

use crate::dto::DataResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn role_wise_data_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<DataResponse>> {
    let data = state.role_wise_data_service.resolve(&user).await?;
    Ok(Json(DataResponse { data }))
}
