//! The 365-day whole-canon reading plan
//!
//! The generator partitions all 1,189 chapters across 365 days in canonical
//! order: `1189 / 365 = 3` chapters per day, with the 94 leftover chapters
//! absorbed one each by the earliest days. Days group into weeks of seven,
//! leaving a final one-day week, and weeks group into twelve display-only
//! month buckets. The plan depends on nothing but the canon, so it is
//! generated once and shared.

pub mod aggregate;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::canon::{self, ChapterRef};

/// Days in the plan
pub const TOTAL_DAYS: u32 = 365;

/// Weeks in the plan: 52 full weeks plus the one-day week 53
pub const TOTAL_WEEKS: u32 = TOTAL_DAYS.div_ceil(7);

/// Display month buckets
pub const TOTAL_MONTHS: u32 = 12;

/// Chapters on a light day; heavy days carry one more
pub const BASE_CHAPTERS_PER_DAY: u32 = canon::TOTAL_CHAPTERS / TOTAL_DAYS;

/// Number of days that carry an extra chapter
pub const EXTRA_CHAPTER_DAYS: u32 = canon::TOTAL_CHAPTERS % TOTAL_DAYS;

/// Last week number of each display month, cumulative over weeks `1..=53`.
/// Months alternate four and five weeks; derivable from week number alone.
const MONTH_LAST_WEEK: [u32; TOTAL_MONTHS as usize] =
    [4, 9, 13, 17, 22, 26, 30, 35, 39, 44, 48, 53];

/// One day's assigned reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDay {
    /// Day number, 1..=365
    pub day_number: u32,
    /// Chapters to read, in canonical order
    pub chapters: Vec<ChapterRef>,
}

/// Seven consecutive plan days (one for week 53)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanWeek {
    /// Week number, 1..=53
    pub week_number: u32,
    /// Days of this week, in order
    pub days: Vec<PlanDay>,
}

/// The full generated plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearPlan {
    /// All weeks in order
    pub weeks: Vec<PlanWeek>,
}

impl YearPlan {
    /// Generate the plan from the canon. Deterministic: two calls produce
    /// structurally identical output.
    pub fn generate() -> Self {
        let mut chapters = canon::all_chapters();
        let mut weeks: Vec<PlanWeek> = Vec::with_capacity(TOTAL_WEEKS as usize);

        for day_number in 1..=TOTAL_DAYS {
            let count = if day_number <= EXTRA_CHAPTER_DAYS {
                BASE_CHAPTERS_PER_DAY + 1
            } else {
                BASE_CHAPTERS_PER_DAY
            };
            let day = PlanDay {
                day_number,
                chapters: chapters.by_ref().take(count as usize).collect(),
            };

            let week_number = week_of_day(day_number);
            match weeks.last_mut() {
                Some(week) if week.week_number == week_number => week.days.push(day),
                _ => weeks.push(PlanWeek { week_number, days: vec![day] }),
            }
        }

        Self { weeks }
    }

    /// The process-wide plan instance
    pub fn shared() -> &'static Self {
        static PLAN: Lazy<YearPlan> = Lazy::new(YearPlan::generate);
        &PLAN
    }

    /// All days in order
    pub fn days(&self) -> impl Iterator<Item = &PlanDay> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// A day by number. Out-of-range requests snap to the nearest boundary
    /// (day 1 or day 365) so navigation never dead-ends.
    pub fn day(&self, day_number: u32) -> &PlanDay {
        let day_number = clamp_day(day_number);
        let week = self.week(week_of_day(day_number));
        &week.days[(day_number - 1) as usize % 7]
    }

    /// A week by number, clamped like [`Self::day`]
    pub fn week(&self, week_number: u32) -> &PlanWeek {
        let week_number = week_number.clamp(1, TOTAL_WEEKS);
        &self.weeks[(week_number - 1) as usize]
    }

    /// Weeks belonging to a display month (1..=12, clamped)
    pub fn month(&self, month_number: u32) -> &[PlanWeek] {
        let month_number = month_number.clamp(1, TOTAL_MONTHS);
        let first = month_first_week(month_number);
        let last = MONTH_LAST_WEEK[(month_number - 1) as usize];
        &self.weeks[(first - 1) as usize..last as usize]
    }
}

/// The week a day falls in
pub fn week_of_day(day_number: u32) -> u32 {
    (clamp_day(day_number) - 1) / 7 + 1
}

/// The display month a week falls in
pub fn month_of_week(week_number: u32) -> u32 {
    let week_number = week_number.clamp(1, TOTAL_WEEKS);
    MONTH_LAST_WEEK
        .iter()
        .position(|&last| week_number <= last)
        .map(|i| i as u32 + 1)
        .unwrap_or(TOTAL_MONTHS)
}

/// First week of a display month
fn month_first_week(month_number: u32) -> u32 {
    match month_number {
        1 => 1,
        m => MONTH_LAST_WEEK[(m - 2) as usize] + 1,
    }
}

/// Clamp a day number into `1..=365`
pub fn clamp_day(day_number: u32) -> u32 {
    day_number.clamp(1, TOTAL_DAYS)
}
