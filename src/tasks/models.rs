//! Task model types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Task has not been done yet.
    #[default]
    Pending,
    /// Task has been marked done.
    Completed,
}

impl Status {
    /// Parse a status from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid status.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidStatus> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }

    /// Get the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid status string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl std::fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid status: '{}' (must be one of: pending, completed)", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned by the store, stable for the task's lifetime.
    pub id: i64,
    /// Free-text description of what needs doing.
    pub description: String,
    /// Current status.
    pub status: Status,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last modified. Never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Check if the task has been completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }

    /// The marker shown in task listings: `✓` when completed, `○` otherwise.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        if self.is_completed() {
            "✓"
        } else {
            "○"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task(status: Status) -> Task {
        let now = Utc::now();
        Task {
            id: 7,
            description: "water plants".to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(Status::from_str("pending").unwrap(), Status::Pending);
        assert_eq!(Status::from_str("COMPLETED").unwrap(), Status::Completed);
        assert!(Status::from_str("done").is_err());
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(Status::Pending.as_str(), "pending");
        assert_eq!(Status::Completed.as_str(), "completed");
    }

    #[test]
    fn test_status_default() {
        assert_eq!(Status::default(), Status::Pending);
    }

    #[test]
    fn test_invalid_status_display() {
        let err = InvalidStatus("foo".to_string());
        assert!(err.to_string().contains("foo"));
        assert!(err.to_string().contains("pending"));
    }

    #[test]
    fn test_task_marker() {
        assert_eq!(sample_task(Status::Pending).marker(), "○");
        assert_eq!(sample_task(Status::Completed).marker(), "✓");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&sample_task(Status::Completed)).unwrap();
        assert!(json.contains("\"status\":\"completed\""));
    }
}
