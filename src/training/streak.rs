//! Consecutive-training streaks with a one-week grace window.

use chrono::NaiveDate;

/// A gap of this many days or more between two training days ends a streak.
pub const STREAK_GAP_DAYS: i64 = 7;

/// Count the run of training days ending at the most recent one.
///
/// `dates` must be distinct and sorted newest first, as returned by
/// `db::training::fetch_training_dates`. The streak is 0 when there are no
/// dates or the newest one is a full gap before `today`.
pub fn current_streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some((&most_recent, older)) = dates.split_first() else {
        return 0;
    };

    if (today - most_recent).num_days() >= STREAK_GAP_DAYS {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = most_recent;
    for &date in older {
        if (cursor - date).num_days() >= STREAK_GAP_DAYS {
            break;
        }
        streak += 1;
        cursor = date;
    }
    streak
}
