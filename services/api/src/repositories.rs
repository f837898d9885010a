//! PostgreSQL record store
//!
//! Day filters are translated into half-open `logged_at` ranges computed by
//! the store's [`Calendar`], so grouping matches the in-memory store exactly.

use async_trait::async_trait;
use chrono::NaiveDate;
use common::error::DatabaseResult;
use sqlx::PgPool;
use stats::{Calendar, CheckIn, CheckInFilter, NewCheckIn, NewTask, RecordStore, Task};
use uuid::Uuid;

pub mod check_in;
pub mod task;

/// [`RecordStore`] backed by the `tasks` and `checkins` tables
#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
    calendar: Calendar,
}

impl PgRecordStore {
    /// Create a new record store
    pub fn new(pool: PgPool, calendar: Calendar) -> Self {
        Self { pool, calendar }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    async fn list_check_ins(&self, filter: CheckInFilter) -> DatabaseResult<Vec<CheckIn>> {
        self.select_check_ins(&filter).await
    }

    async fn sum_duration(&self, filter: CheckInFilter) -> DatabaseResult<i64> {
        self.sum_check_in_duration(&filter).await
    }

    async fn count_check_ins(&self, filter: CheckInFilter) -> DatabaseResult<i64> {
        self.count_matching_check_ins(&filter).await
    }

    async fn list_distinct_check_in_dates(&self, user_id: Uuid) -> DatabaseResult<Vec<NaiveDate>> {
        self.distinct_check_in_dates(user_id).await
    }

    async fn list_tasks(&self, user_id: Uuid) -> DatabaseResult<Vec<Task>> {
        self.select_tasks(user_id).await
    }

    async fn find_task(&self, user_id: Uuid, task_id: Uuid) -> DatabaseResult<Option<Task>> {
        self.select_task(user_id, task_id).await
    }

    async fn insert_task(&self, new_task: NewTask) -> DatabaseResult<Task> {
        self.create_task(&new_task).await
    }

    async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> DatabaseResult<bool> {
        self.remove_task(user_id, task_id).await
    }

    async fn insert_check_in(&self, new_check_in: NewCheckIn) -> DatabaseResult<CheckIn> {
        self.create_check_in(&new_check_in).await
    }
}
