//! In-process record store
//!
//! Keeps tasks and check-ins in memory behind a lock. It answers every
//! [`RecordStore`] query with the same semantics as the PostgreSQL store,
//! which makes it the backing store for tests and local experiments.

use async_trait::async_trait;
use chrono::NaiveDate;
use common::error::DatabaseResult;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::calendar::Calendar;
use crate::model::{CheckIn, NewCheckIn, NewTask, Task};
use crate::store::{CheckInFilter, RecordStore};

#[derive(Debug, Default)]
struct Records {
    tasks: Vec<Task>,
    check_ins: Vec<CheckIn>,
}

/// Record store held entirely in memory
#[derive(Debug, Clone)]
pub struct MemoryStore {
    calendar: Calendar,
    records: Arc<RwLock<Records>>,
}

impl MemoryStore {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            records: Arc::new(RwLock::new(Records::default())),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    async fn list_check_ins(&self, filter: CheckInFilter) -> DatabaseResult<Vec<CheckIn>> {
        let records = self.records.read().await;
        let mut rows: Vec<CheckIn> = records
            .check_ins
            .iter()
            .filter(|check_in| filter.matches(check_in, &self.calendar))
            .cloned()
            .collect();
        rows.sort_by_key(|check_in| check_in.timestamp);
        Ok(rows)
    }

    async fn sum_duration(&self, filter: CheckInFilter) -> DatabaseResult<i64> {
        let records = self.records.read().await;
        Ok(records
            .check_ins
            .iter()
            .filter(|check_in| filter.matches(check_in, &self.calendar))
            .map(|check_in| i64::from(check_in.duration))
            .sum())
    }

    async fn count_check_ins(&self, filter: CheckInFilter) -> DatabaseResult<i64> {
        let records = self.records.read().await;
        let count = records
            .check_ins
            .iter()
            .filter(|check_in| filter.matches(check_in, &self.calendar))
            .count();
        Ok(count as i64)
    }

    async fn list_distinct_check_in_dates(&self, user_id: Uuid) -> DatabaseResult<Vec<NaiveDate>> {
        let records = self.records.read().await;
        let dates: BTreeSet<NaiveDate> = records
            .check_ins
            .iter()
            .filter(|check_in| check_in.user_id == user_id)
            .map(|check_in| self.calendar.date_of(check_in.timestamp))
            .collect();
        Ok(dates.into_iter().rev().collect())
    }

    async fn list_tasks(&self, user_id: Uuid) -> DatabaseResult<Vec<Task>> {
        let records = self.records.read().await;
        // Newest first; among equal timestamps the later insert wins
        let mut tasks: Vec<Task> = records
            .tasks
            .iter()
            .rev()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn find_task(&self, user_id: Uuid, task_id: Uuid) -> DatabaseResult<Option<Task>> {
        let records = self.records.read().await;
        Ok(records
            .tasks
            .iter()
            .find(|task| task.id == task_id && task.user_id == user_id)
            .cloned())
    }

    async fn insert_task(&self, new_task: NewTask) -> DatabaseResult<Task> {
        let task = Task {
            id: Uuid::new_v4(),
            user_id: new_task.user_id,
            title: new_task.title,
            description: new_task.description,
            target_type: new_task.target_type,
            target_value: new_task.target_value,
            created_at: self.calendar.now(),
        };

        self.records.write().await.tasks.push(task.clone());
        Ok(task)
    }

    async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> DatabaseResult<bool> {
        let mut records = self.records.write().await;
        let before = records.tasks.len();
        records
            .tasks
            .retain(|task| !(task.id == task_id && task.user_id == user_id));
        if records.tasks.len() == before {
            return Ok(false);
        }

        for check_in in records
            .check_ins
            .iter_mut()
            .filter(|check_in| check_in.task_id == Some(task_id))
        {
            check_in.task_id = None;
        }
        Ok(true)
    }

    async fn insert_check_in(&self, new_check_in: NewCheckIn) -> DatabaseResult<CheckIn> {
        let check_in = CheckIn {
            id: Uuid::new_v4(),
            user_id: new_check_in.user_id,
            task_id: new_check_in.task_id,
            kind: new_check_in.kind,
            duration: new_check_in.duration,
            timestamp: new_check_in.timestamp,
        };

        self.records.write().await.check_ins.push(check_in.clone());
        Ok(check_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset, Utc};

    use crate::calendar::FixedClock;
    use crate::model::{CheckInKind, TargetType};

    fn store_at(now: DateTime<Utc>) -> MemoryStore {
        MemoryStore::new(Calendar::new(
            FixedOffset::east_opt(0).unwrap(),
            Arc::new(FixedClock(now)),
        ))
    }

    fn new_task(user_id: Uuid, title: &str) -> NewTask {
        NewTask {
            user_id,
            title: title.to_string(),
            description: None,
            target_type: TargetType::Count,
            target_value: 1,
        }
    }

    fn new_check_in(user_id: Uuid, task_id: Option<Uuid>, at: DateTime<Utc>) -> NewCheckIn {
        NewCheckIn {
            user_id,
            task_id,
            kind: CheckInKind::TaskCheckin,
            duration: 0,
            timestamp: at,
        }
    }

    #[tokio::test]
    async fn test_tasks_are_scoped_to_their_owner() {
        let store = store_at(Utc::now());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let task = store.insert_task(new_task(alice, "Run")).await.unwrap();
        store.insert_task(new_task(bob, "Swim")).await.unwrap();

        let tasks = store.list_tasks(alice).await.unwrap();
        assert_eq!(tasks, vec![task.clone()]);
        assert!(store.find_task(bob, task.id).await.unwrap().is_none());
        assert!(!store.delete_task(bob, task.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_tasks_newest_first() {
        let store = store_at(Utc::now());
        let user = Uuid::new_v4();
        let first = store.insert_task(new_task(user, "first")).await.unwrap();
        let second = store.insert_task(new_task(user, "second")).await.unwrap();

        let ids: Vec<Uuid> = store
            .list_tasks(user)
            .await
            .unwrap()
            .into_iter()
            .map(|task| task.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_delete_task_keeps_history_untargeted() {
        let now = Utc::now();
        let store = store_at(now);
        let user = Uuid::new_v4();
        let task = store.insert_task(new_task(user, "Read")).await.unwrap();
        store
            .insert_check_in(new_check_in(user, Some(task.id), now))
            .await
            .unwrap();

        assert!(store.delete_task(user, task.id).await.unwrap());
        assert!(store.list_tasks(user).await.unwrap().is_empty());

        let rows = store
            .list_check_ins(CheckInFilter::for_user(user))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].task_id, None);
    }

    #[tokio::test]
    async fn test_distinct_dates_descending() {
        let now = Utc::now();
        let store = store_at(now);
        let user = Uuid::new_v4();
        for offset in [0, 0, 2, 1, 2] {
            store
                .insert_check_in(new_check_in(user, None, now - Duration::days(offset)))
                .await
                .unwrap();
        }
        store
            .insert_check_in(new_check_in(Uuid::new_v4(), None, now - Duration::days(5)))
            .await
            .unwrap();

        let calendar = store.calendar().clone();
        let expected: Vec<NaiveDate> = [0, 1, 2]
            .into_iter()
            .map(|offset| calendar.date_of(now - Duration::days(offset)))
            .collect();
        assert_eq!(
            store.list_distinct_check_in_dates(user).await.unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn test_sum_of_nothing_is_zero() {
        let store = store_at(Utc::now());
        let sum = store
            .sum_duration(CheckInFilter::for_user(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(sum, 0);
    }
}
