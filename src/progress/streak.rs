//! Consecutive-day reading streaks
//!
//! A streak is the run of consecutive calendar days with any tracked
//! activity, counted backward from a reference date. Activity is already
//! deduplicated to calendar-date granularity, so a day counts once no matter
//! how many chapters were finished on it.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// One cell of the 7-day strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    /// The calendar date
    pub date: NaiveDate,
    /// Whether any activity was tracked on that date
    pub completed: bool,
}

/// Derived streak state, recomputed from activity dates on every read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Length of the current unbroken run of days
    pub current_streak: u32,
    /// The 7 most recent dates ending at `as_of`, oldest first
    pub last_7_days: Vec<DayActivity>,
}

/// Compute the current streak and 7-day strip as of a given date.
///
/// When `as_of` itself has no activity yet, the count starts from the day
/// before, so an unbroken run through yesterday still reads as a live streak
/// with today pending. The UI decides how to present "today pending".
pub fn compute_streak(activity: &HashSet<NaiveDate>, as_of: NaiveDate) -> StreakState {
    let mut cursor = if activity.contains(&as_of) {
        Some(as_of)
    } else {
        as_of.checked_sub_days(Days::new(1))
    };

    let mut current_streak = 0;
    while let Some(day) = cursor {
        if !activity.contains(&day) {
            break;
        }
        current_streak += 1;
        cursor = day.checked_sub_days(Days::new(1));
    }

    let last_7_days = (0..7u64)
        .rev()
        .filter_map(|back| as_of.checked_sub_days(Days::new(back)))
        .map(|date| DayActivity { date, completed: activity.contains(&date) })
        .collect();

    StreakState { current_streak, last_7_days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn dates(days: &[NaiveDate]) -> HashSet<NaiveDate> {
        days.iter().copied().collect()
    }

    #[test]
    fn no_activity_means_no_streak() {
        let state = compute_streak(&HashSet::new(), date(2024, 3, 5));
        assert_eq!(state.current_streak, 0);
        assert_eq!(state.last_7_days.len(), 7);
        assert!(state.last_7_days.iter().all(|d| !d.completed));
    }

    #[test]
    fn streak_resets_after_a_gap() {
        // Activity Mar 1-3, gap on Mar 4, activity again Mar 5: the gap
        // broke the run, so as of Mar 5 the streak is 1.
        let activity = dates(&[
            date(2024, 3, 1),
            date(2024, 3, 2),
            date(2024, 3, 3),
            date(2024, 3, 5),
        ]);
        let state = compute_streak(&activity, date(2024, 3, 5));
        assert_eq!(state.current_streak, 1);
    }

    #[test]
    fn unbroken_run_counts_every_day() {
        let activity = dates(&[date(2024, 3, 3), date(2024, 3, 4), date(2024, 3, 5)]);
        let state = compute_streak(&activity, date(2024, 3, 5));
        assert_eq!(state.current_streak, 3);
    }

    #[test]
    fn streak_survives_a_pending_today() {
        // Nothing tracked on the as-of date yet; the run through yesterday
        // still counts.
        let activity = dates(&[date(2024, 3, 3), date(2024, 3, 4)]);
        let state = compute_streak(&activity, date(2024, 3, 5));
        assert_eq!(state.current_streak, 2);
    }

    #[test]
    fn streak_is_zero_when_neither_today_nor_yesterday_have_activity() {
        let activity = dates(&[date(2024, 3, 1), date(2024, 3, 2)]);
        let state = compute_streak(&activity, date(2024, 3, 5));
        assert_eq!(state.current_streak, 0);
    }

    #[test]
    fn last_7_days_is_oldest_first_and_ends_at_as_of() {
        let activity = dates(&[date(2024, 3, 4), date(2024, 3, 5)]);
        let state = compute_streak(&activity, date(2024, 3, 5));

        let strip: Vec<NaiveDate> = state.last_7_days.iter().map(|d| d.date).collect();
        assert_eq!(strip.first(), Some(&date(2024, 2, 28)));
        assert_eq!(strip.last(), Some(&date(2024, 3, 5)));

        let flags: Vec<bool> = state.last_7_days.iter().map(|d| d.completed).collect();
        assert_eq!(flags, vec![false, false, false, false, false, true, true]);
    }

    #[test]
    fn strip_spans_month_boundaries() {
        let state = compute_streak(&HashSet::new(), date(2024, 3, 2));
        assert_eq!(state.last_7_days[0].date, date(2024, 2, 25));
    }
}
