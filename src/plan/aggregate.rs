//! Completion rollups over the generated plan
//!
//! Pure functions combining a [`YearPlan`] with a user's
//! [`ReadingProgress`]. Absent data always reads as zero progress, so a
//! failed or empty load still renders a locked-but-visible plan.

use serde::Serialize;

use crate::plan::{self, PlanDay, PlanWeek, YearPlan};
use crate::progress::ReadingProgress;
use crate::canon;

/// A completed/total pair for any rollup granularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Chapters completed within the unit
    pub done: usize,
    /// Chapters the unit contains
    pub total: usize,
}

impl Completion {
    /// Whether every chapter in the unit is completed
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done >= self.total
    }

    /// Completion ratio in `0.0..=1.0`; an empty unit reads as 0
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }

    fn add(&mut self, other: Completion) {
        self.done += other.done;
        self.total += other.total;
    }
}

/// Progress for one plan day
pub fn day_progress(day: &PlanDay, progress: &ReadingProgress) -> Completion {
    let done = day
        .chapters
        .iter()
        .filter(|chapter| progress.completed_in(chapter.book).contains(&chapter.chapter))
        .count();
    Completion { done, total: day.chapters.len() }
}

/// Progress for one plan week: the sum of its days
pub fn week_progress(week: &PlanWeek, progress: &ReadingProgress) -> Completion {
    let mut sum = Completion::default();
    for day in &week.days {
        sum.add(day_progress(day, progress));
    }
    sum
}

/// Progress for one display month: the sum of its weeks
pub fn month_progress(plan: &YearPlan, month_number: u32, progress: &ReadingProgress) -> Completion {
    let mut sum = Completion::default();
    for week in plan.month(month_number) {
        sum.add(week_progress(week, progress));
    }
    sum
}

/// Progress through one book of the canon
pub fn book_progress(book: &str, progress: &ReadingProgress) -> Completion {
    let total = canon::total_chapters(book);
    let completed = progress.completed_in(book);
    let done = (1..=total).filter(|chapter| completed.contains(chapter)).count();
    Completion { done, total: total as usize }
}

/// Whether a plan day may be opened: day 1 always, day n once day n-1 is
/// fully complete. The same frontier discipline as chapter unlocking,
/// applied at day granularity.
pub fn is_day_unlocked(plan: &YearPlan, day_number: u32, progress: &ReadingProgress) -> bool {
    let day_number = plan::clamp_day(day_number);
    if day_number == 1 {
        return true;
    }
    day_progress(plan.day(day_number - 1), progress).is_complete()
}

/// The first day whose reading isn't fully done; `None` once the whole plan
/// is finished. Drives the "continue reading" affordance.
pub fn first_incomplete_day(plan: &YearPlan, progress: &ReadingProgress) -> Option<u32> {
    plan.days()
        .find(|day| !day_progress(day, progress).is_complete())
        .map(|day| day.day_number)
}
