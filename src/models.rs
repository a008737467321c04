use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-day activity counts keyed by `YYYY-MM-DD`. A date appears at most once.
pub type DayBuckets = BTreeMap<String, u64>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    pub views: u64,
    pub upvotes: u64,
    pub map_clicks: u64,
    #[serde(default)]
    pub daily_views: DayBuckets,
    #[serde(default)]
    pub daily_upvotes: DayBuckets,
    /// Dense 1-based position by descending upvotes; 0 until the first rank pass.
    pub rank: u32,
    /// Consecutive calendar days with credited activity.
    pub streak: u32,
    pub last_active: DateTime<Utc>,
    /// Last calendar day the streak was credited.
    pub last_seen_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Fresh profile at signup: zero counters, unranked. The signup day counts
    /// as the first credited streak day.
    pub fn new(
        id: u64,
        username: impl Into<String>,
        display_name: impl Into<String>,
        bio: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            display_name: display_name.into(),
            bio: bio.into(),
            views: 0,
            upvotes: 0,
            map_clicks: 0,
            daily_views: DayBuckets::new(),
            daily_upvotes: DayBuckets::new(),
            rank: 0,
            streak: 1,
            last_active: now,
            last_seen_date: now.date_naive(),
            created_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HallData {
    pub users: BTreeMap<u64, UserProfile>,
    pub next_id: u64,
    pub session_user: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityRequest {
    /// Overrides the current calendar day, mainly for tests.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub user_id: u64,
    pub kind: String,
    pub date: String,
    pub day_count: u64,
    pub lifetime_count: u64,
}

#[derive(Debug, Serialize)]
pub struct ActivityHistoryResponse {
    pub user_id: u64,
    pub daily_views: DayBuckets,
    pub daily_upvotes: DayBuckets,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MapClickResponse {
    pub user_id: u64,
    pub map_clicks: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecomputeResponse {
    pub ranked: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct StreakRefreshRequest {
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakRefreshResponse {
    pub refreshed_on: NaiveDate,
    pub credited: usize,
    pub reset: usize,
    pub unchanged: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewcomersQuery {
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub user_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user_id: Option<u64>,
}
