//! Lectio - a reading progress and plan engine for daily whole-Bible reading
//!
//! Lectio tracks sequential progress through the 66-book canon, computes
//! reading streaks, and lays the full 1,189 chapters out over a 365-day
//! plan. All engine logic is pure and synchronous; persistence lives behind
//! the [`store::CompletionStore`] boundary.

pub mod canon;
pub mod clock;
pub mod plan;
pub mod progress;
pub mod store;

pub use clock::Clock;
pub use plan::YearPlan;
pub use progress::ReadingProgress;
pub use store::CompletionStore;
