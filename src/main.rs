use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;

use data_alchemist::Result;
use data_alchemist::entity::EntityKind;
use data_alchemist::store::DataStore;
use data_alchemist::validate::Severity;
use data_alchemist::{export, rule};

#[derive(Parser)]
#[command(name = "data-alchemist")]
#[command(about = "Spreadsheet ingestion, validation and rule authoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest data files and print validation diagnostics.
    Check {
        /// Data files; the target collection is detected from each file name.
        files: Vec<String>,
    },

    /// Convert one free-text sentence into a structured rule and print it.
    Rule { text: String },

    /// Ingest data files, attach rules, and write the export bundle.
    Export {
        /// Data files; the target collection is detected from each file name.
        files: Vec<String>,

        /// Free-text rule sentence; may be given multiple times.
        #[arg(long = "rule")]
        rules: Vec<String>,

        #[arg(short = 'o', long)]
        out: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check { files } => {
            let mut store = DataStore::new();
            ingest_files(&mut store, &files)?;
            print_diagnostics(&store);
        }

        Commands::Rule { text } => {
            let rule = rule::extract_rule(&text);
            println!("{}", serde_json::to_string_pretty(&rule)?);
        }

        Commands::Export { files, rules, out } => {
            let mut store = DataStore::new();
            ingest_files(&mut store, &files)?;

            for text in &rules {
                let rule = rule::extract_rule(text);
                println!("Added {} rule {}", rule.config.type_name(), rule.id);
                store.add_rule(rule);
            }

            // Diagnostics are advisory: they never block the export.
            if !store.diagnostics.is_empty() {
                eprintln!(
                    "WARN: exporting with {} validation issue(s); run `check` for details",
                    store.diagnostics.len()
                );
            }

            let bundle = export::export_bundle(&store)?;
            fs::write(&out, bundle).with_context(|| format!("write export bundle {}", out))?;
            println!("Wrote {}", out);
        }
    }

    Ok(())
}

/// Ingest each file into the collection its name designates. A file that
/// cannot be classified or parsed is skipped with a warning; the remaining
/// files are unaffected.
fn ingest_files(store: &mut DataStore, files: &[String]) -> Result<()> {
    for path in files {
        let name = Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path);

        let kind = match EntityKind::detect(name) {
            Some(kind) => kind,
            None => {
                eprintln!(
                    "WARN: cannot tell what {} contains; rename it to include 'client', 'worker' or 'task'",
                    path
                );
                continue;
            }
        };

        let text = fs::read_to_string(path).with_context(|| format!("read data file {}", path))?;

        match store.ingest(&text, kind) {
            Ok(count) => println!("{} {} records loaded from {}", count, kind, path),
            Err(err) => eprintln!("WARN: skipping {}: {}", path, err),
        }
    }

    Ok(())
}

fn print_diagnostics(store: &DataStore) {
    if store.diagnostics.is_empty() {
        println!("No issues found.");
        return;
    }

    for d in &store.diagnostics {
        match (&d.field, d.row_index) {
            (Some(field), Some(row)) => {
                println!("{}: {} ({}, row {}) [{}]", d.severity, d.message, field, row, d.id);
            }
            _ => println!("{}: {} [{}]", d.severity, d.message, d.id),
        }
        if let Some(hint) = &d.suggestion {
            println!("  hint: {}", hint);
        }
    }

    let errors = store
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = store.diagnostics.len() - errors;
    println!("{} error(s), {} warning(s)", errors, warnings);
}
