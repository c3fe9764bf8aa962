//! Domain DTOs for the todo API and the view model.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned todo identifier. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion status of a todo, lowercase on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 2] = [TodoStatus::Pending, TodoStatus::Completed];

    /// The status a toggle moves to.
    pub fn toggled(self) -> Self {
        match self {
            TodoStatus::Pending => TodoStatus::Completed,
            TodoStatus::Completed => TodoStatus::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::Pending => "pending",
            TodoStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TodoStatus::Pending),
            "completed" => Ok(TodoStatus::Completed),
            other => Err(format!("unknown todo status: {other}")),
        }
    }
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub body: String,
    pub status: TodoStatus,
}

/// Tab filter over the snapshot. Pure view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    All,
    Pending,
    Completed,
}

impl Tab {
    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Tab::All => true,
            Tab::Pending => todo.status == TodoStatus::Pending,
            Tab::Completed => todo.status == TodoStatus::Completed,
        }
    }
}

/// Filter argument of the fetch operation. An empty set means "all todos".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoQuery {
    pub statuses: Vec<TodoStatus>,
}

impl TodoQuery {
    pub fn all_statuses() -> Self {
        Self {
            statuses: TodoStatus::ALL.to_vec(),
        }
    }

    /// Comma-separated query value, duplicates removed in first-seen order.
    pub fn to_query_value(&self) -> Option<String> {
        let mut seen: Vec<TodoStatus> = Vec::with_capacity(self.statuses.len());
        for status in &self.statuses {
            if !seen.contains(status) {
                seen.push(*status);
            }
        }
        if seen.is_empty() {
            return None;
        }
        Some(seen.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(","))
    }
}

/// Request payload for changing a todo's status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodoStatus {
    pub status: TodoStatus,
}
