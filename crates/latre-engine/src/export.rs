//! Export pipeline: self-contained vCard files from stored records.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use latre_core::config::ExportConfig;
use latre_core::constants::VCARD_SUFFIX;
use latre_core::util::slug::slug_or_fallback;
use latre_rfc::rfc::vcard::build::photo::{PhotoRef, embed_photo, media_type_for, photo_reference};
use latre_rfc::rfc::vcard::core::names;
use latre_rfc::rfc::vcard::{ContactRecord, serialize, serialize_all};

use crate::error::EngineResult;

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Replace local `PHOTO` references with the image data.
    pub inline_photos: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            inline_photos: true,
        }
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            inline_photos: config.inline_photos,
        }
    }
}

/// Returns a copy of the record with local photos embedded.
///
/// Remote photos and unreadable local files are left as they are.
pub async fn inline_photos(record: &ContactRecord) -> ContactRecord {
    let mut inlined = record.clone();

    for (index, line) in record.lines(names::PHOTO).iter().enumerate() {
        match photo_reference(line) {
            PhotoRef::Inline => {}
            PhotoRef::Remote(uri) => {
                tracing::warn!(uri = %uri, "Leaving remote photo reference in place");
            }
            PhotoRef::Local(path) => match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    embed_photo(&mut inlined, index, &bytes, media_type_for(&path));
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), error = %error, "Cannot inline photo");
                }
            },
        }
    }

    inlined
}

async fn prepare(records: &[ContactRecord], options: ExportOptions) -> Vec<ContactRecord> {
    let mut prepared = Vec::with_capacity(records.len());
    for record in records {
        prepared.push(if options.inline_photos {
            inline_photos(record).await
        } else {
            record.clone()
        });
    }
    prepared
}

/// Writes all records to one file, separated by blank lines.
///
/// ## Errors
/// Returns an I/O error if the file cannot be written.
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub async fn export_to_file(
    records: &[ContactRecord],
    path: &Path,
    options: ExportOptions,
) -> EngineResult<()> {
    let prepared = prepare(records, options).await;
    tokio::fs::write(path, serialize_all(&prepared)).await?;

    tracing::debug!("Exported contacts to file");
    Ok(())
}

/// File names for one-file-per-record export.
///
/// Each name is the slug of the record's display name; repeats get `-2`,
/// `-3`… appended, and records with no name at all are called `contact`.
#[must_use]
pub fn export_file_names(records: &[ContactRecord]) -> Vec<String> {
    let mut taken = HashSet::new();

    records
        .iter()
        .map(|record| {
            let stem = slug_or_fallback(&record.display_name().unwrap_or_default());
            let mut candidate = stem.clone();
            let mut counter = 1;
            while !taken.insert(candidate.clone()) {
                counter += 1;
                candidate = format!("{stem}-{counter}");
            }
            format!("{candidate}{VCARD_SUFFIX}")
        })
        .collect()
}

/// Writes each record to its own file in `dir`, creating it if needed.
///
/// Returns the written paths in record order. Existing files with the same
/// names are overwritten.
///
/// ## Errors
/// Returns an I/O error if the directory or a file cannot be written.
#[tracing::instrument(skip(records), fields(records = records.len()))]
pub async fn export_to_dir(
    records: &[ContactRecord],
    dir: &Path,
    options: ExportOptions,
) -> EngineResult<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;

    let prepared = prepare(records, options).await;
    let mut written = Vec::with_capacity(prepared.len());

    for (record, name) in prepared.iter().zip(export_file_names(&prepared)) {
        let path = dir.join(name);
        tokio::fs::write(&path, serialize(record)).await?;
        written.push(path);
    }

    tracing::debug!(files = written.len(), "Exported contacts to directory");
    Ok(written)
}
