//! Record store interface
//!
//! The calculators never talk to a database directly. Anything that can
//! answer these queries (PostgreSQL in the API service, [`MemoryStore`] in
//! tests) is handed in as `&dyn RecordStore`.
//!
//! [`MemoryStore`]: crate::memory::MemoryStore

use async_trait::async_trait;
use chrono::NaiveDate;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::calendar::Calendar;
use crate::model::{CheckIn, CheckInKind, NewCheckIn, NewTask, Task};

/// Conjunctive filter over check-ins; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckInFilter {
    pub user_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
    pub kind: Option<CheckInKind>,
    /// Calendar day in the store's zone
    pub on: Option<NaiveDate>,
}

impl CheckInFilter {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn for_task(task_id: Uuid) -> Self {
        Self {
            task_id: Some(task_id),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: CheckInKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn on(mut self, day: NaiveDate) -> Self {
        self.on = Some(day);
        self
    }

    /// Whether `check_in` satisfies every constraint, with days taken in `calendar`
    pub fn matches(&self, check_in: &CheckIn, calendar: &Calendar) -> bool {
        self.user_id.is_none_or(|id| check_in.user_id == id)
            && self.task_id.is_none_or(|id| check_in.task_id == Some(id))
            && self.kind.is_none_or(|kind| check_in.kind == kind)
            && self
                .on
                .is_none_or(|day| calendar.date_of(check_in.timestamp) == day)
    }
}

/// Durable persistence for tasks and check-ins
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Zone in which `CheckInFilter::on` and the distinct dates are evaluated
    fn calendar(&self) -> &Calendar;

    /// Check-ins matching `filter`, oldest first
    async fn list_check_ins(&self, filter: CheckInFilter) -> DatabaseResult<Vec<CheckIn>>;

    /// Sum of `duration` over matching check-ins; 0 when nothing matches
    async fn sum_duration(&self, filter: CheckInFilter) -> DatabaseResult<i64>;

    async fn count_check_ins(&self, filter: CheckInFilter) -> DatabaseResult<i64>;

    /// Distinct calendar days with at least one check-in, most recent first
    async fn list_distinct_check_in_dates(&self, user_id: Uuid) -> DatabaseResult<Vec<NaiveDate>>;

    /// The user's tasks, newest first
    async fn list_tasks(&self, user_id: Uuid) -> DatabaseResult<Vec<Task>>;

    async fn find_task(&self, user_id: Uuid, task_id: Uuid) -> DatabaseResult<Option<Task>>;

    async fn insert_task(&self, new_task: NewTask) -> DatabaseResult<Task>;

    /// Delete one of the user's tasks. Its check-ins are kept with `task_id`
    /// cleared. Returns false when the user owns no such task.
    async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> DatabaseResult<bool>;

    /// Append a check-in; existing rows are never updated.
    async fn insert_check_in(&self, new_check_in: NewCheckIn) -> DatabaseResult<CheckIn>;
}
