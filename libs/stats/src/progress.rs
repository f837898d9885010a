//! Daily task progress
//!
//! A task's progress for a day is the number of `task_checkin` rows (count
//! targets) or the summed pomodoro minutes (time targets) logged against it
//! on that calendar day. Progress is never stored; it is recomputed from the
//! check-in log on every read.

use chrono::NaiveDate;
use common::error::DatabaseResult;

use crate::calendar::Calendar;
use crate::model::{CheckIn, TargetType, Task};
use crate::store::{CheckInFilter, RecordStore};

/// Filter selecting the check-ins that advance `task` on `day`
pub fn progress_filter(task: &Task, day: NaiveDate) -> CheckInFilter {
    CheckInFilter::for_task(task.id)
        .kind(task.target_type.counted_kind())
        .on(day)
}

/// Progress of `task` on `day`, computed over already-fetched rows.
///
/// Rows for other tasks, kinds or days are ignored, so callers can pass a
/// superset (e.g. all of a user's check-ins for today).
pub fn progress_from_check_ins<'a>(
    task: &Task,
    check_ins: impl IntoIterator<Item = &'a CheckIn>,
    day: NaiveDate,
    calendar: &Calendar,
) -> i64 {
    let filter = progress_filter(task, day);
    let matching = check_ins
        .into_iter()
        .filter(|check_in| filter.matches(check_in, calendar));

    match task.target_type {
        TargetType::Count => matching.count() as i64,
        TargetType::Time => matching.map(|check_in| i64::from(check_in.duration)).sum(),
    }
}

/// Progress of `task` on `day`, asking the store to count or sum.
pub async fn compute_progress(
    store: &dyn RecordStore,
    task: &Task,
    day: NaiveDate,
) -> DatabaseResult<i64> {
    let filter = progress_filter(task, day);
    match task.target_type {
        TargetType::Count => store.count_check_ins(filter).await,
        TargetType::Time => store.sum_duration(filter).await,
    }
}

/// Literal `progress >= target_value`; a zero target is always met.
pub fn is_completed(task: &Task, progress: i64) -> bool {
    progress >= i64::from(task.target_value)
}
