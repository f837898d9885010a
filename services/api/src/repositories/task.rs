//! Task queries

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{Row, postgres::PgRow};
use stats::{NewTask, TargetType, Task};
use tracing::info;
use uuid::Uuid;

use super::PgRecordStore;

const TASK_COLUMNS: &str = "id, user_id, title, description, target_type, target_value, created_at";

fn task_from_row(row: &PgRow) -> Result<Task, sqlx::Error> {
    let target_type: String = row.try_get("target_type")?;

    Ok(Task {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        target_type: target_type
            .parse::<TargetType>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        target_value: row.try_get("target_value")?,
        created_at: row.try_get("created_at")?,
    })
}

impl PgRecordStore {
    pub(crate) async fn select_tasks(&self, user_id: Uuid) -> DatabaseResult<Vec<Task>> {
        let rows = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        rows.iter()
            .map(task_from_row)
            .collect::<Result<_, _>>()
            .map_err(DatabaseError::Query)
    }

    pub(crate) async fn select_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
    ) -> DatabaseResult<Option<Task>> {
        let row = sqlx::query(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2"
        ))
        .bind(task_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        row.as_ref()
            .map(task_from_row)
            .transpose()
            .map_err(DatabaseError::Query)
    }

    pub(crate) async fn create_task(&self, new_task: &NewTask) -> DatabaseResult<Task> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO tasks (id, user_id, title, description, target_type, target_value)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(new_task.user_id)
        .bind(&new_task.title)
        .bind(&new_task.description)
        .bind(new_task.target_type.as_str())
        .bind(new_task.target_value)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        task_from_row(&row).map_err(DatabaseError::Query)
    }

    /// Check-ins of the task survive with `task_id` set to NULL (FK `ON DELETE SET NULL`)
    pub(crate) async fn remove_task(&self, user_id: Uuid, task_id: Uuid) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted task {}", task_id);
        }
        Ok(deleted)
    }
}
