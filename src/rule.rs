//! Scheduling rules and the keyword-based free-text extractor.
//!
//! Extraction is an ordered-predicate dispatch: the first matching keyword
//! test decides the rule type, and anything unrecognized degrades to a
//! `Custom` sentinel rather than an error. Ambiguous text must never block
//! rule creation.

use chrono::Utc;
use regex::Regex;
use serde::Serialize;
use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Closed set of rule payloads, one variant per rule type.
///
/// `SlotRestriction` is never produced by extraction; it exists for manually
/// authored rules. `Custom` marks unrecognized input and serializes as
/// `{"custom": true}` under type `co-run`.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleConfig {
    CoRun { task_ids: Vec<String> },
    SlotRestriction { group_tag: String, min_common_slots: u32 },
    LoadLimit { group_tag: String, max_tasks: u32 },
    PhaseWindow { task_ids: Vec<String>, allowed_phases: Vec<i64> },
    Custom,
}

impl RuleConfig {
    /// Wire name of the rule type this payload belongs to.
    pub fn type_name(&self) -> &'static str {
        match self {
            RuleConfig::CoRun { .. } | RuleConfig::Custom => "co-run",
            RuleConfig::SlotRestriction { .. } => "slot-restriction",
            RuleConfig::LoadLimit { .. } => "load-limit",
            RuleConfig::PhaseWindow { .. } => "phase-window",
        }
    }
}

impl Serialize for RuleConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RuleConfig::CoRun { task_ids } => {
                let mut m = serializer.serialize_map(Some(1))?;
                m.serialize_entry("taskIds", task_ids)?;
                m.end()
            }
            RuleConfig::SlotRestriction { group_tag, min_common_slots } => {
                let mut m = serializer.serialize_map(Some(2))?;
                m.serialize_entry("groupTag", group_tag)?;
                m.serialize_entry("minCommonSlots", min_common_slots)?;
                m.end()
            }
            RuleConfig::LoadLimit { group_tag, max_tasks } => {
                let mut m = serializer.serialize_map(Some(2))?;
                m.serialize_entry("groupTag", group_tag)?;
                m.serialize_entry("maxTasks", max_tasks)?;
                m.end()
            }
            RuleConfig::PhaseWindow { task_ids, allowed_phases } => {
                let mut m = serializer.serialize_map(Some(2))?;
                m.serialize_entry("taskIds", task_ids)?;
                m.serialize_entry("allowedPhases", allowed_phases)?;
                m.end()
            }
            RuleConfig::Custom => {
                let mut m = serializer.serialize_map(Some(1))?;
                m.serialize_entry("custom", &true)?;
                m.end()
            }
        }
    }
}

/// One authored rule. `description` keeps the source sentence verbatim; the
/// enabled flag is the only field ever mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub config: RuleConfig,
    pub enabled: bool,
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Rule", 5)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("type", self.config.type_name())?;
        s.serialize_field("description", &self.description)?;
        s.serialize_field("config", &self.config)?;
        s.serialize_field("enabled", &self.enabled)?;
        s.end()
    }
}

static TASK_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)t\d+").unwrap());
static GROUP_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)group\s+([a-zA-Z]+)").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

static RULE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Millisecond-epoch id with a per-process counter suffix, so rapid
/// successive calls stay distinguishable within a session.
fn next_rule_id() -> String {
    let ms = Utc::now().timestamp_millis();
    let seq = RULE_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", ms, seq)
}

/// Classify one free-text sentence into exactly one rule. Total: falls back
/// to the `Custom` sentinel instead of failing.
pub fn extract_rule(text: &str) -> Rule {
    let lower = text.to_lowercase();

    let config = if lower.contains("co-run") || lower.contains("together") || lower.contains("pair")
    {
        RuleConfig::CoRun {
            task_ids: extract_task_ids(text),
        }
    } else if lower.contains("limit") && lower.contains("group") {
        RuleConfig::LoadLimit {
            group_tag: extract_group_tag(text).unwrap_or_else(|| "unknown".to_string()),
            max_tasks: extract_first_number(text).unwrap_or(3),
        }
    } else if lower.contains("phase") && lower.contains("only") {
        RuleConfig::PhaseWindow {
            task_ids: extract_task_ids(text),
            allowed_phases: extract_numbers(text),
        }
    } else {
        RuleConfig::Custom
    };

    Rule {
        id: next_rule_id(),
        description: text.to_string(),
        config,
        enabled: true,
    }
}

/// Every `t<digits>` token, uppercased, in order of appearance. Duplicates
/// are retained.
fn extract_task_ids(text: &str) -> Vec<String> {
    TASK_ID_RE
        .find_iter(text)
        .map(|m| m.as_str().to_uppercase())
        .collect()
}

/// First alphabetic token following the word "group", original casing kept.
fn extract_group_tag(text: &str) -> Option<String> {
    GROUP_TAG_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

fn extract_first_number(text: &str) -> Option<u32> {
    NUMBER_RE.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Every integer literal in order, duplicates retained. Digits inside task
/// ids count too; phase-window extraction relies on that being harmless.
fn extract_numbers(text: &str) -> Vec<i64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}
