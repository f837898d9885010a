//! API models for request and response payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stats::{CheckInKind, TargetType, TaskProgress};
use uuid::Uuid;

fn default_target_value() -> i32 {
    1
}

/// Request for task creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_type: TargetType,
    #[serde(default = "default_target_value")]
    pub target_value: i32,
}

/// A task in the listing, with today's progress
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_type: TargetType,
    pub target_value: i32,
    pub created_at: DateTime<Utc>,
    pub progress: i64,
    pub is_completed: bool,
}

impl From<TaskProgress> for TaskResponse {
    fn from(item: TaskProgress) -> Self {
        let TaskProgress {
            task,
            progress,
            is_completed,
        } = item;

        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            target_type: task.target_type,
            target_value: task.target_value,
            created_at: task.created_at,
            progress,
            is_completed,
        }
    }
}

/// Request for logging a check-in
#[derive(Debug, Clone, Deserialize)]
pub struct CheckInRequest {
    #[serde(rename = "type")]
    pub kind: CheckInKind,
    #[serde(default)]
    pub task_id: Option<Uuid>,
    /// Minutes
    #[serde(default)]
    pub duration: i32,
}

/// Response for a logged check-in
#[derive(Debug, Clone, Serialize)]
pub struct CheckInResponse {
    pub message: String,
    pub id: Uuid,
    /// Refreshed progress of the referenced task for today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
}

/// Response for a created resource
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_defaults() {
        let request: CreateTaskRequest = serde_json::from_str(r#"{"title": "Read"}"#).unwrap();
        assert_eq!(request.title, "Read");
        assert_eq!(request.description, None);
        assert_eq!(request.target_type, TargetType::Count);
        assert_eq!(request.target_value, 1);
    }

    #[test]
    fn test_check_in_request_wire_format() {
        let request: CheckInRequest =
            serde_json::from_str(r#"{"type": "pomodoro", "duration": 25}"#).unwrap();
        assert_eq!(request.kind, CheckInKind::Pomodoro);
        assert_eq!(request.task_id, None);
        assert_eq!(request.duration, 25);

        assert!(serde_json::from_str::<CheckInRequest>(r#"{"type": "nap"}"#).is_err());
    }

    #[test]
    fn test_check_in_response_omits_missing_progress() {
        let response = CheckInResponse {
            message: "ok".to_string(),
            id: Uuid::nil(),
            progress: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("progress").is_none());
    }
}
