//! Import pipeline: read sources, parse, reduce, resolve.

use std::collections::HashSet;
use std::path::PathBuf;

use futures::{StreamExt, stream};

use latre_core::config::ImportConfig;
use latre_rfc::rfc::vcard::build::photo::file_uri_path;
use latre_rfc::rfc::vcard::{ContactRecord, parse_block, split_blocks};
use latre_store::ContactStore;

use crate::dedup::reduce_batch;
use crate::error::{EngineError, EngineResult};
use crate::report::{ImportReport, SourceFailure};
use crate::resolve::{ResolveOptions, resolve_batch};

#[derive(Debug, Clone, Copy)]
pub struct ImportOptions {
    /// Upper bound on files read at the same time.
    pub max_parallel_reads: usize,
    pub batch_add: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            max_parallel_reads: 5,
            batch_add: true,
        }
    }
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            max_parallel_reads: config.max_parallel_reads,
            batch_add: config.batch_add,
        }
    }
}

/// A raw vCard block and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    pub source: String,
    /// 1-based line of `BEGIN:VCARD` in the source.
    pub line: usize,
    pub text: String,
}

/// Blocks gathered from a set of sources.
#[derive(Debug, Clone, Default)]
pub struct CollectedBlocks {
    /// Distinct blocks in first-seen order.
    pub blocks: Vec<SourceBlock>,
    /// Blocks dropped because an identical one was already collected.
    pub duplicates: usize,
    /// Sources that could not be read or split.
    pub failures: Vec<SourceFailure>,
}

/// Resolves a path or URI to a local path.
///
/// ## Errors
/// Returns `Source` for URIs with a scheme other than `file`, and for
/// `file://` URIs naming another host.
pub fn source_path(source: &str) -> EngineResult<PathBuf> {
    if let Some(path) = file_uri_path(source) {
        return Ok(path);
    }

    if source.starts_with("file://") {
        return Err(EngineError::source_error(
            source,
            "not a local file, only file:// URIs on this machine are supported",
        ));
    }

    if let Some((scheme, _)) = source.split_once("://")
        && !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return Err(EngineError::source_error(
            source,
            format!("{scheme} URIs are not supported, only local files"),
        ));
    }

    Ok(PathBuf::from(source))
}

/// Reads the text of a source.
///
/// ## Errors
/// Returns `Source` if the source is remote, unreadable, or not UTF-8 text.
pub async fn read_source(source: &str) -> EngineResult<String> {
    let path = source_path(source)?;
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| EngineError::source_error(source, e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| EngineError::source_error(source, e.to_string()))
}

async fn read_blocks(source: &str) -> EngineResult<Vec<(usize, String)>> {
    let text = read_source(source).await?;
    let blocks = split_blocks(&text)?;
    Ok(blocks
        .into_iter()
        .map(|block| (block.line, block.text.to_string()))
        .collect())
}

/// Reads sources concurrently and collects their distinct vCard blocks.
///
/// ## Summary
/// At most `max_parallel` files are read at once. Blocks are compared by
/// exact text and only the first occurrence is kept. A source that cannot
/// be read, or whose markers are malformed, is reported and skipped.
#[tracing::instrument(skip(sources), fields(sources = sources.len()))]
pub async fn collect_blocks<S: AsRef<str>>(sources: &[S], max_parallel: usize) -> CollectedBlocks {
    let reads: Vec<(String, EngineResult<Vec<(usize, String)>>)> =
        stream::iter(sources.iter().map(|s| s.as_ref().to_string()))
            .map(|source| async move {
                let result = read_blocks(&source).await;
                (source, result)
            })
            .buffered(max_parallel.max(1))
            .collect()
            .await;

    let mut collected = CollectedBlocks::default();
    let mut seen = HashSet::new();

    for (source, result) in reads {
        match result {
            Ok(blocks) => {
                for (line, text) in blocks {
                    if seen.insert(text.clone()) {
                        collected.blocks.push(SourceBlock {
                            source: source.clone(),
                            line,
                            text,
                        });
                    } else {
                        collected.duplicates += 1;
                    }
                }
            }
            Err(error) => {
                tracing::warn!(source = %source, error = %error, "Skipping source");
                collected.failures.push(SourceFailure {
                    source,
                    error: error.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        blocks = collected.blocks.len(),
        duplicates = collected.duplicates,
        "Collected blocks"
    );
    collected
}

/// Parses collected blocks, reporting the ones that fail.
#[must_use]
pub fn parse_blocks(blocks: &[SourceBlock]) -> (Vec<ContactRecord>, Vec<SourceFailure>) {
    let mut records = Vec::with_capacity(blocks.len());
    let mut failures = Vec::new();

    for block in blocks {
        match parse_block(&block.text, block.line) {
            Ok(record) => records.push(record),
            Err(error) => {
                tracing::warn!(source = %block.source, error = %error, "Skipping malformed contact");
                failures.push(SourceFailure {
                    source: block.source.clone(),
                    error: error.to_string(),
                });
            }
        }
    }

    (records, failures)
}

/// Reduces parsed records and resolves them against the store.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub async fn import_records<S: ContactStore>(
    store: &S,
    records: Vec<ContactRecord>,
    options: ImportOptions,
) -> ImportReport {
    let mut report = ImportReport {
        total: records.len(),
        ..ImportReport::default()
    };
    resolve_into(&mut report, store, records, options).await;
    report
}

async fn resolve_into<S: ContactStore>(
    report: &mut ImportReport,
    store: &S,
    records: Vec<ContactRecord>,
    options: ImportOptions,
) {
    let reduction = reduce_batch(records);
    report.warn(reduction.skipped);

    let resolved = resolve_batch(
        store,
        reduction.records,
        ResolveOptions {
            batch_add: options.batch_add,
        },
    )
    .await;
    report.warn(resolved.skipped);

    for (resolution, members) in resolved.resolutions.into_iter().zip(reduction.members) {
        report.record(resolution, members);
    }
}

/// Imports every contact found in the given files or `file://` URIs.
///
/// ## Summary
/// Failures are per source, per block and per contact; none of them stops
/// the rest of the import.
#[tracing::instrument(skip(store, sources), fields(sources = sources.len()))]
pub async fn import_files<S: ContactStore, P: AsRef<str>>(
    store: &S,
    sources: &[P],
    options: ImportOptions,
) -> ImportReport {
    let collected = collect_blocks(sources, options.max_parallel_reads).await;
    let (records, parse_failures) = parse_blocks(&collected.blocks);

    let mut report = ImportReport {
        total: collected.blocks.len(),
        failures: collected.failures,
        ..ImportReport::default()
    };
    report.failures.extend(parse_failures);

    resolve_into(&mut report, store, records, options).await;

    tracing::debug!(summary = %report.summary(), "Import finished");
    report
}
