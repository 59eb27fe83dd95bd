//! Subcommand handlers. Each returns the text to print on stdout.

use std::path::Path;

use serde::Serialize;

use latre_core::config::Settings;
use latre_engine::export::{ExportOptions, export_to_dir, export_to_file};
use latre_engine::import::{ImportOptions, import_files};
use latre_engine::report::ImportReport;
use latre_rfc::rfc::vcard::ContactRecord;
use latre_store::{ContactStore, StoreError};

use crate::cli::Command;
use crate::error::AppResult;

/// Runs one subcommand against `store`.
///
/// ## Errors
/// Returns an error when the store cannot be listed, the export target
/// cannot be written or JSON rendering fails. Per-contact and per-source
/// import failures end up in the report instead.
pub async fn run<S: ContactStore>(
    command: &Command,
    store: &S,
    settings: &Settings,
    json: bool,
) -> AppResult<String> {
    match command {
        Command::Import {
            sources,
            no_batch_add,
        } => {
            let mut options = ImportOptions::from(&settings.import);
            options.batch_add &= !no_batch_add;
            let report = import_files(store, sources.as_slice(), options).await;
            tracing::info!(summary = %report.summary(), "Import finished");
            render_import(&report, json)
        }
        Command::Export {
            output,
            split,
            no_photos,
        } => {
            let mut options = ExportOptions::from(&settings.export);
            options.inline_photos &= !no_photos;
            export(store, output, *split, options).await
        }
        Command::List => list(store, json).await,
        Command::Remove { uids } => remove(store, uids, json).await,
    }
}

fn render_import(report: &ImportReport, json: bool) -> AppResult<String> {
    if json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let mut lines = vec![report.summary()];
    for failure in &report.failures {
        lines.push(format!("failed: {}: {}", failure.source, failure.error));
    }
    for warning in &report.warnings {
        lines.push(format!("warning: {warning}"));
    }
    Ok(lines.join("\n"))
}

async fn export<S: ContactStore>(
    store: &S,
    output: &Path,
    split: bool,
    options: ExportOptions,
) -> AppResult<String> {
    let records = store.all().await?;

    if split {
        let written = export_to_dir(&records, output, options).await?;
        Ok(format!(
            "Exported {} contacts to {}",
            written.len(),
            output.display()
        ))
    } else {
        export_to_file(&records, output, options).await?;
        Ok(format!(
            "Exported {} contacts to {}",
            records.len(),
            output.display()
        ))
    }
}

#[derive(Debug, Serialize)]
struct ListEntry {
    uid: String,
    name: Option<String>,
    phones: Vec<String>,
}

impl From<&ContactRecord> for ListEntry {
    fn from(record: &ContactRecord) -> Self {
        Self {
            uid: record.uid().unwrap_or_default().to_string(),
            name: record.display_name(),
            phones: record.phones().iter().cloned().collect(),
        }
    }
}

async fn list<S: ContactStore>(store: &S, json: bool) -> AppResult<String> {
    let mut entries: Vec<ListEntry> = store.all().await?.iter().map(ListEntry::from).collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uid.cmp(&b.uid)));

    if json {
        return Ok(serde_json::to_string_pretty(&entries)?);
    }

    Ok(entries
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{}",
                entry.uid,
                entry.name.as_deref().unwrap_or("-"),
                entry.phones.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

#[derive(Debug, Default, Serialize)]
struct RemoveReport {
    removed: Vec<String>,
    not_found: Vec<String>,
}

async fn remove<S: ContactStore>(store: &S, uids: &[String], json: bool) -> AppResult<String> {
    let mut report = RemoveReport::default();

    for uid in uids {
        match store.remove(uid).await {
            Ok(()) => report.removed.push(uid.clone()),
            Err(StoreError::NotFound(_)) => {
                tracing::warn!(uid = %uid, "No such contact");
                report.not_found.push(uid.clone());
            }
            Err(error) => return Err(error.into()),
        }
    }

    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }

    let mut lines = vec![format!("Removed {} contacts", report.removed.len())];
    lines.extend(report.not_found.iter().map(|uid| format!("not found: {uid}")));
    Ok(lines.join("\n"))
}
