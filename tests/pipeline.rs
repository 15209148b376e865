//! End-to-end pass over the public surface: ingest the three uploads,
//! author rules from free text, and export the bundle.

use data_alchemist::entity::EntityKind;
use data_alchemist::export::export_bundle;
use data_alchemist::rule::extract_rule;
use data_alchemist::store::DataStore;
use data_alchemist::validate::Severity;

use pretty_assertions::assert_eq;

const CLIENTS_CSV: &str = "\
ClientID,ClientName,PriorityLevel,RequestedTaskIDs,GroupTag,AttributesJSON
C001,\"Acme, Inc.\",5,T001;T002,Enterprise,\"{\"\"budget\"\": 10000}\"
C002,Tech Solutions,7,T999,SMB,{}
";

const WORKERS_CSV: &str = "\
WorkerID,WorkerName,Skills,AvailableSlots,MaxLoadPerPhase,WorkerGroup,QualificationLevel
W001,John Doe,JavaScript;React,\"[1,2,3]\",2,Frontend,4
W002,Jane Smith,PostgreSQL,2;3;x,3,Backend,5
";

const TASKS_CSV: &str = "\
TaskID,TaskName,Category,Duration,RequiredSkills,PreferredPhases,MaxConcurrent
T001,Frontend Development,Development,2,JavaScript;React,1;2,1
T002,Database Design,Database,1,Rust,1,1
";

#[test]
fn ingest_validate_author_export() {
    let mut store = DataStore::new();

    assert_eq!(store.ingest(CLIENTS_CSV, EntityKind::Clients).unwrap(), 2);
    assert_eq!(store.ingest(WORKERS_CSV, EntityKind::Workers).unwrap(), 2);
    assert_eq!(store.ingest(TASKS_CSV, EntityKind::Tasks).unwrap(), 2);

    // Quoted comma survived parsing; malformed slot list fell back to the
    // ';' path and dropped the unparsable piece.
    assert_eq!(store.clients[0].client_name, "Acme, Inc.");
    assert_eq!(store.workers[1].available_slots, vec![2, 3]);

    // The last ingest re-validated everything: C002 has a bad priority and a
    // dangling task reference, T002 needs a skill nobody has.
    let ids: Vec<&str> = store.diagnostics.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["client-1-priority", "client-1-task-T999", "task-1-skill-Rust"]
    );
    assert_eq!(store.diagnostics[2].severity, Severity::Warning);

    // Author two rules, disable one.
    let co_run = extract_rule("Always run T001 and T002 together");
    let limit = extract_rule("Limit Group Alpha to 2 tasks per phase");
    let limit_id = limit.id.clone();
    store.add_rule(co_run);
    store.add_rule(limit);
    assert!(store.set_rule_enabled(&limit_id, false));

    // Diagnostics are advisory: export proceeds regardless.
    let json: serde_json::Value = serde_json::from_str(&export_bundle(&store).unwrap()).unwrap();

    assert_eq!(json["clients"].as_array().unwrap().len(), 2);
    assert_eq!(json["clients"][0]["ClientID"], "C001");
    assert_eq!(json["workers"][0]["AvailableSlots"], serde_json::json!([1, 2, 3]));
    assert_eq!(json["tasks"][1]["RequiredSkills"], serde_json::json!(["Rust"]));

    let rules = json["rules"].as_array().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0]["type"], "co-run");
    assert_eq!(rules[0]["config"]["taskIds"], serde_json::json!(["T001", "T002"]));
    assert_eq!(rules[0]["description"], "Always run T001 and T002 together");

    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn reupload_replaces_and_revalidates() {
    let mut store = DataStore::new();
    store.ingest(CLIENTS_CSV, EntityKind::Clients).unwrap();
    store.ingest(TASKS_CSV, EntityKind::Tasks).unwrap();

    // Fix C002 by re-uploading clients; the dangling reference and priority
    // findings must disappear with the swap.
    let fixed = "\
ClientID,ClientName,PriorityLevel,RequestedTaskIDs,GroupTag,AttributesJSON
C002,Tech Solutions,3,T001,SMB,{}
";
    store.ingest(fixed, EntityKind::Clients).unwrap();

    assert_eq!(store.clients.len(), 1);
    assert!(store.diagnostics.iter().all(|d| !d.id.starts_with("client-")));
}
