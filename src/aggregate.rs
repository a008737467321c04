use crate::models::UserProfile;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    View,
    Upvote,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::View => "view",
            ActivityKind::Upvote => "upvote",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreakOutcome {
    pub credited: usize,
    pub reset: usize,
    pub unchanged: usize,
}

/// Assigns every user a dense 1-based rank by descending upvotes. Ties go to
/// the earlier account. Total over any collection, including an empty one.
pub fn recompute_ranks<'a>(users: impl IntoIterator<Item = &'a mut UserProfile>) {
    let mut ordered: Vec<&mut UserProfile> = users.into_iter().collect();
    ordered.sort_by(|a, b| {
        b.upvotes
            .cmp(&a.upvotes)
            .then(a.created_at.cmp(&b.created_at))
    });
    for (position, user) in ordered.iter_mut().enumerate() {
        user.rank = position as u32 + 1;
    }
}

/// Advances every user's streak for `today`. Each user is independent:
/// a one-day gap extends the streak, a longer gap restarts it at 1, and a
/// user already credited today is left alone, so the pass is idempotent
/// within a calendar day. A last-seen date in the future is a data anomaly
/// and is skipped rather than rolled back.
pub fn update_streaks<'a>(
    users: impl IntoIterator<Item = &'a mut UserProfile>,
    today: NaiveDate,
) -> StreakOutcome {
    let mut outcome = StreakOutcome::default();
    for user in users {
        match (today - user.last_seen_date).num_days() {
            0 => outcome.unchanged += 1,
            1 => {
                user.streak = user.streak.saturating_add(1);
                user.last_seen_date = today;
                outcome.credited += 1;
            }
            gap if gap > 1 => {
                user.streak = 1;
                user.last_seen_date = today;
                outcome.reset += 1;
            }
            _ => {
                warn!(
                    user = user.id,
                    last_seen = %user.last_seen_date,
                    %today,
                    "last seen date is ahead of today, leaving streak untouched"
                );
                outcome.unchanged += 1;
            }
        }
    }
    outcome
}

/// Credits one activity of `kind` on `date`: bumps the lifetime counter and
/// the matching day bucket. Ranks are not touched; callers batch increments
/// and run [`recompute_ranks`] once afterwards. Returns the updated bucket
/// count.
pub fn record_activity(user: &mut UserProfile, kind: ActivityKind, date: NaiveDate) -> u64 {
    let (lifetime, buckets) = match kind {
        ActivityKind::View => (&mut user.views, &mut user.daily_views),
        ActivityKind::Upvote => (&mut user.upvotes, &mut user.daily_upvotes),
    };
    *lifetime = lifetime.saturating_add(1);
    let bucket = buckets.entry(date.to_string()).or_insert(0);
    *bucket = bucket.saturating_add(1);
    *bucket
}
