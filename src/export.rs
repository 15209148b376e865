//! Export assembler: one pretty-printed JSON bundle of entities plus the
//! enabled rules, stamped with the export time. No schema versioning.

use crate::Result;
use crate::entity::{Client, Task, Worker};
use crate::rule::Rule;
use crate::store::DataStore;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct ExportBundle<'a> {
    clients: &'a [Client],
    workers: &'a [Worker],
    tasks: &'a [Task],
    rules: Vec<&'a Rule>,
    timestamp: String,
}

/// Serialize the store as the export bundle, stamped with the current time.
pub fn export_bundle(store: &DataStore) -> Result<String> {
    export_bundle_at(store, Utc::now())
}

/// Timestamp-injectable variant so callers (and tests) can pin the stamp.
pub fn export_bundle_at(store: &DataStore, at: DateTime<Utc>) -> Result<String> {
    let bundle = ExportBundle {
        clients: &store.clients,
        workers: &store.workers,
        tasks: &store.tasks,
        rules: store.rules.iter().filter(|r| r.enabled).collect(),
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    Ok(serde_json::to_string_pretty(&bundle)?)
}
