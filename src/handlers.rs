use crate::aggregate::{self, ActivityKind};
use crate::errors::AppError;
use crate::models::{
    ActivityHistoryResponse, ActivityRequest, ActivityResponse, LeaderboardQuery, MapClickResponse,
    NewcomersQuery, RecomputeResponse, SessionRequest, SessionResponse, SignupRequest,
    StreakRefreshRequest, StreakRefreshResponse, UserProfile,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::store;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate, Utc};
use tracing::info;

pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserProfile>), AppError> {
    let mut data = state.data.lock().await;
    let user = store::signup(
        &mut data,
        &payload.username,
        &payload.display_name,
        &payload.bio,
        Utc::now(),
    )?;
    persist_data(&state.data_path, &data).await?;

    info!(user = user.id, username = %user.username, "created profile");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserProfile>> {
    let data = state.data.lock().await;
    Json(data.users.values().cloned().collect())
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<UserProfile>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(store::get_user(&data, id)?.clone()))
}

pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ActivityHistoryResponse>, AppError> {
    let data = state.data.lock().await;
    let user = store::get_user(&data, id)?;
    Ok(Json(ActivityHistoryResponse {
        user_id: user.id,
        daily_views: user.daily_views.clone(),
        daily_upvotes: user.daily_upvotes.clone(),
    }))
}

pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<ActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    record(&state, id, ActivityKind::View, payload.date).await
}

pub async fn record_upvote(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<ActivityRequest>,
) -> Result<Json<ActivityResponse>, AppError> {
    record(&state, id, ActivityKind::Upvote, payload.date).await
}

async fn record(
    state: &AppState,
    id: u64,
    kind: ActivityKind,
    date: Option<NaiveDate>,
) -> Result<Json<ActivityResponse>, AppError> {
    let date = date.unwrap_or_else(today);
    let mut data = state.data.lock().await;
    let response = {
        let user = store::get_user_mut(&mut data, id)?;
        let day_count = aggregate::record_activity(user, kind, date);
        user.last_active = Utc::now();
        ActivityResponse {
            user_id: user.id,
            kind: kind.as_str().to_string(),
            date: date.to_string(),
            day_count,
            lifetime_count: match kind {
                ActivityKind::View => user.views,
                ActivityKind::Upvote => user.upvotes,
            },
        }
    };
    persist_data(&state.data_path, &data).await?;

    Ok(Json(response))
}

pub async fn record_map_click(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MapClickResponse>, AppError> {
    let mut data = state.data.lock().await;
    let response = {
        let user = store::get_user_mut(&mut data, id)?;
        user.map_clicks = user.map_clicks.saturating_add(1);
        user.last_active = Utc::now();
        MapClickResponse {
            user_id: user.id,
            map_clicks: user.map_clicks,
        }
    };
    persist_data(&state.data_path, &data).await?;

    Ok(Json(response))
}

pub async fn recompute_ranks(
    State(state): State<AppState>,
) -> Result<Json<RecomputeResponse>, AppError> {
    let mut data = state.data.lock().await;
    aggregate::recompute_ranks(data.users.values_mut());
    let ranked = data.users.len();
    persist_data(&state.data_path, &data).await?;

    info!(ranked, "recomputed ranks");
    Ok(Json(RecomputeResponse { ranked }))
}

pub async fn refresh_streaks(
    State(state): State<AppState>,
    Json(payload): Json<StreakRefreshRequest>,
) -> Result<Json<StreakRefreshResponse>, AppError> {
    let refreshed_on = payload.today.unwrap_or_else(today);
    let mut data = state.data.lock().await;
    let outcome = aggregate::update_streaks(data.users.values_mut(), refreshed_on);
    persist_data(&state.data_path, &data).await?;

    info!(
        %refreshed_on,
        credited = outcome.credited,
        reset = outcome.reset,
        "refreshed streaks"
    );
    Ok(Json(StreakRefreshResponse {
        refreshed_on,
        credited: outcome.credited,
        reset: outcome.reset,
        unchanged: outcome.unchanged,
    }))
}

pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Json<Vec<UserProfile>> {
    let data = state.data.lock().await;
    Json(store::leaderboard(&data, query.limit))
}

pub async fn newcomers(
    State(state): State<AppState>,
    Query(query): Query<NewcomersQuery>,
) -> Json<Vec<UserProfile>> {
    let today = query.today.unwrap_or_else(today);
    let data = state.data.lock().await;
    Json(store::newcomers(&data, today))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let data = state.data.lock().await;
    Json(SessionResponse {
        user_id: store::current_user(&data).map(|user| user.id),
    })
}

pub async fn put_session(
    State(state): State<AppState>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut data = state.data.lock().await;
    store::set_session(&mut data, payload.user_id)?;
    persist_data(&state.data_path, &data).await?;

    Ok(Json(SessionResponse {
        user_id: data.session_user,
    }))
}

pub async fn clear_session(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    let mut data = state.data.lock().await;
    store::clear_session(&mut data);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(SessionResponse { user_id: None }))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
