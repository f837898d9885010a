//! Per-user statistics
//!
//! Everything here is recomputed from the check-in log on each call; there
//! are no stored counters to drift out of sync.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::StatsResult;
use crate::model::{CheckInKind, Task};
use crate::progress::{is_completed, progress_from_check_ins};
use crate::store::{CheckInFilter, RecordStore};
use crate::streak::compute_streak;

pub const MAX_DISCIPLINE_SCORE: u32 = 100;

/// A task together with its progress for one day
#[derive(Debug, Clone, PartialEq)]
pub struct TaskProgress {
    pub task: Task,
    pub progress: i64,
    pub is_completed: bool,
}

/// Derived statistics for one user on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub today_checkins: i64,
    pub total_pomodoro_minutes: i64,
    pub discipline_score: u32,
    pub completion_rate: u32,
    pub current_streak: u32,
    pub completed_tasks_count: u32,
}

/// `min(100, floor(10 * today_checkins + total_pomodoro_minutes / 5))`.
///
/// The minutes quotient is not truncated on its own: 7 minutes add 1.4 before
/// the final floor. Negative inputs are treated as zero.
pub fn discipline_score(today_checkins: i64, total_pomodoro_minutes: i64) -> u32 {
    // 10c + m/5 == (50c + m) / 5, so one integer division floors the exact sum
    let scaled = today_checkins
        .max(0)
        .saturating_mul(50)
        .saturating_add(total_pomodoro_minutes.max(0));
    let score = (scaled / 5).min(i64::from(MAX_DISCIPLINE_SCORE));
    score as u32
}

/// `floor(100 * completed / total)`, or 0 when there are no tasks.
pub fn completion_rate(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (u64::from(completed) * 100 / u64::from(total)) as u32
}

/// Every task of the user with its progress on `day`, newest task first.
///
/// Fetches the day's check-ins once and evaluates each task in memory.
pub async fn list_task_progress(
    store: &dyn RecordStore,
    user_id: Uuid,
    day: NaiveDate,
) -> StatsResult<Vec<TaskProgress>> {
    let tasks = store.list_tasks(user_id).await?;
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let day_check_ins = store
        .list_check_ins(CheckInFilter::for_user(user_id).on(day))
        .await?;

    let listing = tasks
        .into_iter()
        .map(|task| {
            let progress = progress_from_check_ins(&task, &day_check_ins, day, store.calendar());
            let is_completed = is_completed(&task, progress);
            TaskProgress {
                task,
                progress,
                is_completed,
            }
        })
        .collect();

    Ok(listing)
}

/// Compute the full statistics block for `user_id` as of `today`.
pub async fn compute_stats(
    store: &dyn RecordStore,
    user_id: Uuid,
    today: NaiveDate,
) -> StatsResult<Stats> {
    let today_checkins = store
        .count_check_ins(CheckInFilter::for_user(user_id).on(today))
        .await?;

    let total_pomodoro_minutes = store
        .sum_duration(CheckInFilter::for_user(user_id).kind(CheckInKind::Pomodoro))
        .await?;

    let tasks = list_task_progress(store, user_id, today).await?;
    let total_tasks = u32::try_from(tasks.len()).unwrap_or(u32::MAX);
    let completed_tasks_count =
        u32::try_from(tasks.iter().filter(|t| t.is_completed).count()).unwrap_or(u32::MAX);

    let dates = store.list_distinct_check_in_dates(user_id).await?;
    let current_streak = compute_streak(&dates, today);

    let stats = Stats {
        today_checkins,
        total_pomodoro_minutes,
        discipline_score: discipline_score(today_checkins, total_pomodoro_minutes),
        completion_rate: completion_rate(completed_tasks_count, total_tasks),
        current_streak,
        completed_tasks_count,
    };

    debug!(%user_id, %today, ?stats, "Computed stats");
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discipline_score_combines_checkins_and_minutes() {
        assert_eq!(discipline_score(0, 0), 0);
        assert_eq!(discipline_score(3, 0), 30);
        assert_eq!(discipline_score(0, 25), 5);
        assert_eq!(discipline_score(2, 50), 30);
    }

    #[test]
    fn test_discipline_score_floors_only_the_final_sum() {
        // 7 / 5 = 1.4 -> floor(1.4) = 1
        assert_eq!(discipline_score(0, 7), 1);
        // 10 + 9 / 5 = 11.8 -> 11
        assert_eq!(discipline_score(1, 9), 11);
        assert_eq!(discipline_score(0, 4), 0);
    }

    #[test]
    fn test_discipline_score_is_capped() {
        assert_eq!(discipline_score(50, 10_000), MAX_DISCIPLINE_SCORE);
        assert_eq!(discipline_score(10, 0), 100);
        assert_eq!(discipline_score(i64::MAX, i64::MAX), MAX_DISCIPLINE_SCORE);
    }

    #[test]
    fn test_discipline_score_ignores_negative_inputs() {
        assert_eq!(discipline_score(-3, -100), 0);
        assert_eq!(discipline_score(2, -100), 20);
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(completion_rate(0, 0), 0);
        assert_eq!(completion_rate(2, 3), 66);
        assert_eq!(completion_rate(3, 3), 100);
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(29, 100), 29);
    }

    #[test]
    fn test_stats_serialize_with_wire_names() {
        let stats = Stats {
            today_checkins: 4,
            total_pomodoro_minutes: 50,
            discipline_score: 50,
            completion_rate: 66,
            current_streak: 2,
            completed_tasks_count: 2,
        };

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["today_checkins"], 4);
        assert_eq!(json["total_pomodoro_minutes"], 50);
        assert_eq!(json["discipline_score"], 50);
        assert_eq!(json["completion_rate"], 66);
        assert_eq!(json["current_streak"], 2);
        assert_eq!(json["completed_tasks_count"], 2);
    }
}
