use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/weeks", get(handlers::list_weeks))
        .route(
            "/api/data/:week_key",
            get(handlers::get_week).post(handlers::save_week),
        )
        .route("/api/stats/:week_key", get(handlers::get_week_stats))
        .with_state(state)
}
