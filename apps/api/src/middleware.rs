use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use rolegate_core::{AppError, UserIdentity};

use crate::error::ApiResult;
use crate::state::AppState;

/// Trusts the subject forwarded by the upstream authentication collaborator.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = request
        .headers()
        .get(&state.auth_subject_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|subject| !subject.is_empty())
        .map(UserIdentity::new)
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
