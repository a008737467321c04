use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", post(handlers::signup).get(handlers::list_users))
        .route("/api/users/:id", get(handlers::get_user))
        .route("/api/users/:id/activity", get(handlers::get_activity))
        .route("/api/users/:id/view", post(handlers::record_view))
        .route("/api/users/:id/upvote", post(handlers::record_upvote))
        .route("/api/users/:id/map-click", post(handlers::record_map_click))
        .route("/api/ranks/recompute", post(handlers::recompute_ranks))
        .route("/api/leaderboard", get(handlers::leaderboard))
        .route("/api/newcomers", get(handlers::newcomers))
        .route("/api/streaks/refresh", post(handlers::refresh_streaks))
        .route(
            "/api/session",
            get(handlers::get_session)
                .put(handlers::put_session)
                .delete(handlers::clear_session),
        )
        .with_state(state)
}
