use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

#[cfg(test)]
mod tests;

pub fn build_router(app_state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/admin/roles",
            get(handlers::security::list_roles_handler),
        )
        .route(
            "/admin/assign-permission",
            post(handlers::security::assign_permission_handler),
        )
        .route(
            "/role-wise-data",
            get(handlers::data::role_wise_data_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .route("/check", get(handlers::health::check_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
