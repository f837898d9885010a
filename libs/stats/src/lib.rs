//! Statistics core for the NeNe habit tracker
//!
//! Turns the raw check-in log into derived metrics: a task's progress for a
//! day and whether its target is met, the current check-in streak, and the
//! per-user stats block (discipline score, completion rate).
//!
//! The calculators are pure functions over already-fetched rows. The async
//! helpers fetch those rows through a [`RecordStore`] that the caller injects.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use stats::compute_streak;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let yesterday = today.pred_opt().unwrap();
//! assert_eq!(compute_streak(&[today, yesterday], today), 2);
//! ```

pub mod aggregate;
pub mod calendar;
pub mod error;
pub mod memory;
pub mod model;
pub mod progress;
pub mod store;
pub mod streak;

pub use aggregate::{
    MAX_DISCIPLINE_SCORE, Stats, TaskProgress, completion_rate, compute_stats,
    discipline_score, list_task_progress,
};
pub use calendar::{Calendar, Clock, FixedClock, SystemClock};
pub use error::{StatsError, StatsResult};
pub use memory::MemoryStore;
pub use model::{CheckIn, CheckInKind, NewCheckIn, NewTask, ParseKindError, TargetType, Task};
pub use progress::{compute_progress, is_completed, progress_from_check_ins};
pub use store::{CheckInFilter, RecordStore};
pub use streak::compute_streak;
