//! Domain entities: the three record shapes the tool understands.
//!
//! Projection from parsed records is a direct field-name reinterpretation.
//! No validation happens here; absent fields fall back to empty/zero and
//! structurally dubious values (a PriorityLevel of 6, say) are stored as-is
//! for the validator to flag.

use crate::table::{Record, Value};

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    #[serde(rename = "ClientID")]
    pub client_id: String,
    #[serde(rename = "ClientName")]
    pub client_name: String,
    #[serde(rename = "PriorityLevel")]
    pub priority_level: i64,
    #[serde(rename = "RequestedTaskIDs")]
    pub requested_task_ids: Vec<String>,
    #[serde(rename = "GroupTag")]
    pub group_tag: String,
    #[serde(rename = "AttributesJSON")]
    pub attributes_json: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worker {
    #[serde(rename = "WorkerID")]
    pub worker_id: String,
    #[serde(rename = "WorkerName")]
    pub worker_name: String,
    #[serde(rename = "Skills")]
    pub skills: Vec<String>,
    #[serde(rename = "AvailableSlots")]
    pub available_slots: Vec<i64>,
    #[serde(rename = "MaxLoadPerPhase")]
    pub max_load_per_phase: i64,
    #[serde(rename = "WorkerGroup")]
    pub worker_group: String,
    #[serde(rename = "QualificationLevel")]
    pub qualification_level: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    #[serde(rename = "TaskID")]
    pub task_id: String,
    #[serde(rename = "TaskName")]
    pub task_name: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Duration")]
    pub duration: i64,
    #[serde(rename = "RequiredSkills")]
    pub required_skills: Vec<String>,
    #[serde(rename = "PreferredPhases")]
    pub preferred_phases: Vec<i64>,
    #[serde(rename = "MaxConcurrent")]
    pub max_concurrent: i64,
}

impl Client {
    pub fn from_record(rec: &Record) -> Self {
        Client {
            client_id: str_field(rec, "ClientID"),
            client_name: str_field(rec, "ClientName"),
            priority_level: int_field(rec, "PriorityLevel"),
            requested_task_ids: str_list_field(rec, "RequestedTaskIDs"),
            group_tag: str_field(rec, "GroupTag"),
            attributes_json: str_field(rec, "AttributesJSON"),
        }
    }
}

impl Worker {
    pub fn from_record(rec: &Record) -> Self {
        Worker {
            worker_id: str_field(rec, "WorkerID"),
            worker_name: str_field(rec, "WorkerName"),
            skills: str_list_field(rec, "Skills"),
            available_slots: int_list_field(rec, "AvailableSlots"),
            max_load_per_phase: int_field(rec, "MaxLoadPerPhase"),
            worker_group: str_field(rec, "WorkerGroup"),
            qualification_level: int_field(rec, "QualificationLevel"),
        }
    }
}

impl Task {
    pub fn from_record(rec: &Record) -> Self {
        Task {
            task_id: str_field(rec, "TaskID"),
            task_name: str_field(rec, "TaskName"),
            category: str_field(rec, "Category"),
            duration: int_field(rec, "Duration"),
            required_skills: str_list_field(rec, "RequiredSkills"),
            preferred_phases: int_list_field(rec, "PreferredPhases"),
            max_concurrent: int_field(rec, "MaxConcurrent"),
        }
    }
}

fn str_field(rec: &Record, name: &str) -> String {
    rec.get(name).map(|v| v.as_str().to_string()).unwrap_or_default()
}

fn int_field(rec: &Record, name: &str) -> i64 {
    rec.get(name).map(Value::as_int).unwrap_or(0)
}

fn str_list_field(rec: &Record, name: &str) -> Vec<String> {
    rec.get(name).map(Value::as_str_list).unwrap_or_default()
}

fn int_list_field(rec: &Record, name: &str) -> Vec<i64> {
    rec.get(name).map(Value::as_int_list).unwrap_or_default()
}

/// Which of the three collections an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Clients,
    Workers,
    Tasks,
}

impl EntityKind {
    /// Detect the target collection from a file name ("clients.csv",
    /// "my-task-list.csv", ...). None means the caller should ask the user
    /// to rename the file.
    pub fn detect(file_name: &str) -> Option<EntityKind> {
        let name = file_name.to_lowercase();
        if name.contains("client") {
            Some(EntityKind::Clients)
        } else if name.contains("worker") {
            Some(EntityKind::Workers)
        } else if name.contains("task") {
            Some(EntityKind::Tasks)
        } else {
            None
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Clients => "clients",
            EntityKind::Workers => "workers",
            EntityKind::Tasks => "tasks",
        };
        write!(f, "{}", label)
    }
}
