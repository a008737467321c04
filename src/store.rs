//! Data-access boundary over [`HallData`]. Input validation lives here so the
//! aggregator only ever sees well-formed profiles.

use crate::errors::AppError;
use crate::models::{HallData, UserProfile};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Accounts created within this many days count as newcomers.
const NEWCOMER_WINDOW_DAYS: i64 = 7;

pub fn signup(
    data: &mut HallData,
    username: &str,
    display_name: &str,
    bio: &str,
    now: DateTime<Utc>,
) -> Result<UserProfile, AppError> {
    let username = username.trim();
    let display_name = display_name.trim();
    if username.is_empty() {
        return Err(AppError::bad_request("username must not be empty"));
    }
    if display_name.is_empty() {
        return Err(AppError::bad_request("display name must not be empty"));
    }
    if data
        .users
        .values()
        .any(|user| user.username.eq_ignore_ascii_case(username))
    {
        return Err(AppError::conflict(format!(
            "username '{username}' is already taken"
        )));
    }

    data.next_id += 1;
    let user = UserProfile::new(data.next_id, username, display_name, bio.trim(), now);
    data.users.insert(user.id, user.clone());
    Ok(user)
}

pub fn get_user(data: &HallData, id: u64) -> Result<&UserProfile, AppError> {
    data.users
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("no user with id {id}")))
}

pub fn get_user_mut(data: &mut HallData, id: u64) -> Result<&mut UserProfile, AppError> {
    data.users
        .get_mut(&id)
        .ok_or_else(|| AppError::not_found(format!("no user with id {id}")))
}

/// All profiles sorted best rank first; unranked profiles sink to the end.
pub fn leaderboard(data: &HallData, limit: Option<usize>) -> Vec<UserProfile> {
    let mut users: Vec<UserProfile> = data.users.values().cloned().collect();
    users.sort_by_key(|user| if user.rank == 0 { u32::MAX } else { user.rank });
    if let Some(limit) = limit {
        users.truncate(limit);
    }
    users
}

/// Profiles created within the newcomer window ending at `today`.
pub fn newcomers(data: &HallData, today: NaiveDate) -> Vec<UserProfile> {
    let cutoff = today - Duration::days(NEWCOMER_WINDOW_DAYS);
    data.users
        .values()
        .filter(|user| user.created_at.date_naive() >= cutoff)
        .cloned()
        .collect()
}

pub fn set_session(data: &mut HallData, user_id: u64) -> Result<(), AppError> {
    get_user(data, user_id)?;
    data.session_user = Some(user_id);
    Ok(())
}

pub fn clear_session(data: &mut HallData) {
    data.session_user = None;
}

pub fn current_user(data: &HallData) -> Option<&UserProfile> {
    data.session_user.and_then(|id| data.users.get(&id))
}
