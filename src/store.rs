//! Owned application state: the four collections plus the diagnostics from
//! the last validation pass.
//!
//! Uploads replace a collection wholesale; there is no merge or append. The
//! only implicit cross-collection trigger is the re-validation that follows
//! an ingest. Everything runs on the calling thread, last writer wins.

use crate::Result;
use crate::entity::{Client, EntityKind, Task, Worker};
use crate::rule::Rule;
use crate::table::parse_table;
use crate::validate::{ValidationError, validate};

#[derive(Debug, Clone, Default)]
pub struct DataStore {
    pub clients: Vec<Client>,
    pub workers: Vec<Worker>,
    pub tasks: Vec<Task>,
    pub rules: Vec<Rule>,
    pub diagnostics: Vec<ValidationError>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse uploaded text, project it into the target collection, swap the
    /// collection, and re-validate. Returns the record count.
    ///
    /// A parse failure leaves the store untouched; other collections are
    /// never affected either way.
    pub fn ingest(&mut self, text: &str, kind: EntityKind) -> Result<usize> {
        let records = parse_table(text)?;
        let count = records.len();

        match kind {
            EntityKind::Clients => {
                self.clients = records.iter().map(Client::from_record).collect();
            }
            EntityKind::Workers => {
                self.workers = records.iter().map(Worker::from_record).collect();
            }
            EntityKind::Tasks => {
                self.tasks = records.iter().map(Task::from_record).collect();
            }
        }

        self.revalidate();
        Ok(count)
    }

    /// Whole-collection swaps for callers that already hold typed entities
    /// (grid edits). Validation stays an explicit follow-up call.
    pub fn set_clients(&mut self, clients: Vec<Client>) {
        self.clients = clients;
    }

    pub fn set_workers(&mut self, workers: Vec<Worker>) {
        self.workers = workers;
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Re-run validation and replace the diagnostics wholesale.
    pub fn revalidate(&mut self) {
        self.diagnostics = validate(&self.clients, &self.workers, &self.tasks);
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Toggle the enabled flag, the only post-creation mutation a rule
    /// supports. Returns false if no rule has the given id.
    pub fn set_rule_enabled(&mut self, rule_id: &str, enabled: bool) -> bool {
        match self.rules.iter_mut().find(|r| r.id == rule_id) {
            Some(rule) => {
                rule.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Returns false if no rule has the given id.
    pub fn delete_rule(&mut self, rule_id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != rule_id);
        self.rules.len() != before
    }
}
