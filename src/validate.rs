//! Cross-collection validation producing advisory diagnostics.
//!
//! A validation pass is pure and total: it never fails, never stops at the
//! first finding, and its output replaces the previous diagnostics wholesale.
//! Diagnostics annotate cells; they never block ingest, edit, or export.

use crate::entity::{Client, Task, Worker};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One diagnostic, addressed to a cell via row index + field name.
///
/// The id is stable for a given finding (`client-3-priority`), so UI layers
/// can key on it across validation passes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub id: String,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(rename = "rowIndex", skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Run the fixed rule set over the three collections.
///
/// Ordering is deterministic: all client checks in row order, then all task
/// checks in row order. Within a row, checks run in the order below.
pub fn validate(clients: &[Client], workers: &[Worker], tasks: &[Task]) -> Vec<ValidationError> {
    let mut out: Vec<ValidationError> = Vec::new();

    for (index, client) in clients.iter().enumerate() {
        if client.client_id.is_empty() {
            out.push(ValidationError {
                id: format!("client-{}-id", index),
                severity: Severity::Error,
                message: "Client ID is required".to_string(),
                field: Some("ClientID".to_string()),
                row_index: Some(index),
                suggestion: None,
            });
        }

        if client.priority_level < 1 || client.priority_level > 5 {
            out.push(ValidationError {
                id: format!("client-{}-priority", index),
                severity: Severity::Error,
                message: "Priority level must be between 1 and 5".to_string(),
                field: Some("PriorityLevel".to_string()),
                row_index: Some(index),
                suggestion: None,
            });
        }

        // Referential integrity: every requested task must exist. One
        // diagnostic per missing reference, not deduplicated across clients.
        for task_id in &client.requested_task_ids {
            if !tasks.iter().any(|t| &t.task_id == task_id) {
                out.push(ValidationError {
                    id: format!("client-{}-task-{}", index, task_id),
                    severity: Severity::Error,
                    message: format!("Task {} does not exist", task_id),
                    field: Some("RequestedTaskIDs".to_string()),
                    row_index: Some(index),
                    suggestion: Some(
                        "Remove invalid task ID or add the task to tasks data".to_string(),
                    ),
                });
            }
        }
    }

    for (index, task) in tasks.iter().enumerate() {
        if task.duration < 1 {
            out.push(ValidationError {
                id: format!("task-{}-duration", index),
                severity: Severity::Error,
                message: "Duration must be at least 1".to_string(),
                field: Some("Duration".to_string()),
                row_index: Some(index),
                suggestion: None,
            });
        }

        // Skill coverage is advisory only, hence a warning: the schedule may
        // still be authored while hiring is in flight.
        for skill in &task.required_skills {
            let covered = workers.iter().any(|w| w.skills.iter().any(|s| s == skill));
            if !covered {
                out.push(ValidationError {
                    id: format!("task-{}-skill-{}", index, skill),
                    severity: Severity::Warning,
                    message: format!("No worker has skill: {}", skill),
                    field: Some("RequiredSkills".to_string()),
                    row_index: Some(index),
                    suggestion: None,
                });
            }
        }
    }

    out
}
