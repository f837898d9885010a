//! Request validation for tasks and check-ins
//!
//! Target values are checked by [`stats::NewTask::validate`].

use stats::CheckInKind;

use crate::models::{CheckInRequest, CreateTaskRequest};

pub const MAX_TITLE_LENGTH: usize = 120;
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Validate a task creation request
pub fn validate_task(request: &CreateTaskRequest) -> Result<(), String> {
    if request.title.trim().is_empty() {
        return Err("Title is required".to_string());
    }

    if request.title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title must be at most {} characters long",
            MAX_TITLE_LENGTH
        ));
    }

    if let Some(description) = &request.description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(format!(
                "Description must be at most {} characters long",
                MAX_DESCRIPTION_LENGTH
            ));
        }
    }

    Ok(())
}

/// Validate a check-in request
pub fn validate_check_in(request: &CheckInRequest) -> Result<(), String> {
    if request.kind == CheckInKind::TaskCheckin && request.task_id.is_none() {
        return Err("task_id is required for task check-ins".to_string());
    }

    if request.duration < 0 {
        return Err("Duration must not be negative".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stats::TargetType;
    use uuid::Uuid;

    fn task(title: &str, description: Option<&str>) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: description.map(str::to_string),
            target_type: TargetType::Count,
            target_value: 1,
        }
    }

    fn check_in(kind: CheckInKind, task_id: Option<Uuid>, duration: i32) -> CheckInRequest {
        CheckInRequest {
            kind,
            task_id,
            duration,
        }
    }

    #[test]
    fn test_task_title_rules() {
        assert!(validate_task(&task("Read", None)).is_ok());
        assert!(validate_task(&task(&"t".repeat(120), None)).is_ok());

        assert_eq!(validate_task(&task("", None)).unwrap_err(), "Title is required");
        assert!(validate_task(&task("   ", None)).is_err());
        assert!(validate_task(&task(&"t".repeat(121), None)).is_err());
    }

    #[test]
    fn test_task_description_length() {
        assert!(validate_task(&task("Read", Some(&"d".repeat(200)))).is_ok());
        assert!(validate_task(&task("Read", Some(&"d".repeat(201)))).is_err());
    }

    #[test]
    fn test_check_in_rules() {
        assert!(validate_check_in(&check_in(CheckInKind::Pomodoro, None, 25)).is_ok());
        assert!(validate_check_in(&check_in(CheckInKind::TaskCheckin, Some(Uuid::new_v4()), 0)).is_ok());

        assert!(validate_check_in(&check_in(CheckInKind::TaskCheckin, None, 0)).is_err());
        assert!(validate_check_in(&check_in(CheckInKind::Pomodoro, None, -5)).is_err());
    }
}
