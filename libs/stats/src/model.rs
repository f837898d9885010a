//! Task and check-in records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{StatsError, StatsResult};

/// Error returned when a stored enum value is not recognised
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseKindError {
    kind: &'static str,
    value: String,
}

/// How a task's daily goal is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// Number of `task_checkin` check-ins per day
    #[default]
    Count,
    /// Minutes of `pomodoro` focus per day
    Time,
}

impl TargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Time => "time",
        }
    }

    /// The check-in kind that advances a task with this target
    pub fn counted_kind(&self) -> CheckInKind {
        match self {
            Self::Count => CheckInKind::TaskCheckin,
            Self::Time => CheckInKind::Pomodoro,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "count" => Ok(Self::Count),
            "time" => Ok(Self::Time),
            other => Err(ParseKindError {
                kind: "target type",
                value: other.to_string(),
            }),
        }
    }
}

/// What a check-in records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInKind {
    /// A discrete task completion
    TaskCheckin,
    /// A timed focus session
    Pomodoro,
}

impl CheckInKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskCheckin => "task_checkin",
            Self::Pomodoro => "pomodoro",
        }
    }
}

impl fmt::Display for CheckInKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckInKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_checkin" => Ok(Self::TaskCheckin),
            "pomodoro" => Ok(Self::Pomodoro),
            other => Err(ParseKindError {
                kind: "check-in type",
                value: other.to_string(),
            }),
        }
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_type: TargetType,
    /// Check-ins for `count`, minutes for `time`
    pub target_value: i32,
    pub created_at: DateTime<Utc>,
}

/// New task creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub target_type: TargetType,
    pub target_value: i32,
}

impl NewTask {
    /// Reject targets the calculators would treat as trivially (or never) met
    pub fn validate(&self) -> StatsResult<()> {
        if self.target_value <= 0 {
            return Err(StatsError::invalid_task(format!(
                "target_value must be positive, got {}",
                self.target_value
            )));
        }
        Ok(())
    }
}

/// Check-in entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `None` for an untargeted focus session
    pub task_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: CheckInKind,
    /// Minutes; only meaningful for pomodoro check-ins
    pub duration: i32,
    pub timestamp: DateTime<Utc>,
}

/// New check-in creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCheckIn {
    pub user_id: Uuid,
    pub task_id: Option<Uuid>,
    pub kind: CheckInKind,
    pub duration: i32,
    pub timestamp: DateTime<Utc>,
}
