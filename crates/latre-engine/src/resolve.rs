//! Resolving phone-disjoint records against the store.
//!
//! ## Summary
//! Each record is looked up by phone number. No match means the record is
//! new and gets added. Matches are first consolidated among themselves,
//! newest revision receiving, and the incoming record is then merged into
//! the survivor with its own values taking precedence.
//!
//! Incoming records that land on the same stored contact, directly or
//! through a chain of stored duplicates, are folded together in batch order
//! first and merged into that contact once. Resolving the same batch again
//! then rebuilds the same fold and finds nothing to write.
//!
//! Each group is resolved independently: a store failure is recorded as
//! [`Resolution::Failed`] for its records and the loop moves on.

use std::collections::BTreeSet;

use serde::Serialize;

use latre_core::error::CoreError;
use latre_rfc::rfc::filter::{AddressbookFilter, PropFilter, TextMatch};
use latre_rfc::rfc::vcard::ContactRecord;
use latre_rfc::rfc::vcard::core::names;
use latre_store::ContactStore;

use crate::error::EngineResult;
use crate::meld::{Precedence, UnsupportedProperty, contains_all, meld};

/// What happened to one incoming record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    /// Stored as a new contact.
    Added { uid: String },
    /// Folded into an existing contact; `removed` lists the duplicates that
    /// were consolidated into it and deleted.
    Merged { uid: String, removed: Vec<String> },
    /// Already present; the store was not touched.
    Unchanged { uid: String },
    /// A store operation failed for this record.
    Failed { name: Option<String>, error: String },
}

impl Resolution {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    /// Probe the store once for the whole batch and add everything in one
    /// operation when nothing collides.
    pub batch_add: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { batch_add: true }
    }
}

/// Outcome of resolving a batch, one resolution per input record.
///
/// Records resolved as one group share the same resolution.
#[derive(Debug, Clone, Default)]
pub struct ResolveReport {
    pub resolutions: Vec<Resolution>,
    pub skipped: Vec<UnsupportedProperty>,
}

/// Resolves a phone-disjoint batch against the store.
///
/// The batch must not contain two records sharing a phone number; see
/// [`crate::dedup::reduce_batch`].
#[tracing::instrument(skip_all, fields(batch_size = records.len()))]
pub async fn resolve_batch<S: ContactStore>(
    store: &S,
    records: Vec<ContactRecord>,
    options: ResolveOptions,
) -> ResolveReport {
    if options.batch_add
        && let Some(report) = try_add_all(store, &records).await
    {
        return report;
    }

    let mut report = ResolveReport::default();
    let mut resolved = Vec::with_capacity(records.len());

    for group in group_by_stored(store, &records).await {
        let Some((&head, rest)) = group.split_first() else {
            continue;
        };

        let mut combined = records[head].clone();
        for &index in rest {
            let outcome = meld(&combined, &records[index], Precedence::Pending);
            report.skipped.extend(outcome.skipped);
            combined = outcome.record;
        }

        let resolution = match resolve_one(store, &combined, &mut report.skipped).await {
            Ok(resolution) => resolution,
            Err(error) => {
                tracing::warn!(error = %error, name = ?combined.display_name(), "Failed to resolve contact");
                Resolution::Failed {
                    name: combined.display_name(),
                    error: error.to_string(),
                }
            }
        };
        resolved.extend(group.iter().map(|&index| (index, resolution.clone())));
    }

    resolved.sort_by_key(|&(index, _)| index);
    report.resolutions = resolved.into_iter().map(|(_, r)| r).collect();

    tracing::debug!(
        failures = report.resolutions.iter().filter(|r| r.is_failure()).count(),
        "Resolved batch"
    );
    report
}

/// Adds the whole batch in one operation when no record can collide.
///
/// Returns `None` when the batch has to be resolved record by record.
async fn try_add_all<S: ContactStore>(
    store: &S,
    records: &[ContactRecord],
) -> Option<ResolveReport> {
    if records.is_empty() || records.iter().any(|r| r.phones().is_empty()) {
        return None;
    }

    let numbers = records.iter().flat_map(|r| r.phones().iter().cloned());
    match store.query(&AddressbookFilter::any_phone(numbers)).await {
        Ok(hits) if hits.is_empty() => {}
        Ok(_) => return None,
        Err(error) => {
            tracing::warn!(error = %error, "Batch probe failed, resolving one by one");
            return None;
        }
    }

    match store.add_batch(records.to_vec()).await {
        Ok(uids) => {
            tracing::debug!(added = uids.len(), "Added whole batch");
            Some(ResolveReport {
                resolutions: uids
                    .into_iter()
                    .map(|uid| Resolution::Added { uid })
                    .collect(),
                skipped: Vec::new(),
            })
        }
        Err(error) => {
            // Anything already added is found again by phone and left alone.
            tracing::warn!(error = %error, "Batch add failed, resolving one by one");
            None
        }
    }
}

/// Partitions the batch into groups of record indices, in batch order.
///
/// Records whose phone queries hit overlapping sets of stored contacts share
/// a group. A record without phones, without hits, or whose query failed is
/// a group of its own.
async fn group_by_stored<S: ContactStore>(
    store: &S,
    records: &[ContactRecord],
) -> Vec<Vec<usize>> {
    let mut groups: Vec<(BTreeSet<String>, Vec<usize>)> = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let mut uids = BTreeSet::new();
        if !record.phones().is_empty() {
            match store
                .query(&AddressbookFilter::any_phone(record.phones().iter().cloned()))
                .await
            {
                Ok(hits) => uids.extend(hits.iter().filter_map(|r| r.uid()).map(str::to_string)),
                Err(error) => {
                    tracing::debug!(error = %error, "Grouping query failed, resolving record alone");
                }
            }
        }

        let mut members = vec![index];
        if !uids.is_empty() {
            let (joined, apart): (Vec<_>, Vec<_>) = groups
                .into_iter()
                .partition(|(group_uids, _)| !group_uids.is_disjoint(&uids));
            for (group_uids, group_members) in joined {
                uids.extend(group_uids);
                members.extend(group_members);
            }
            groups = apart;
        }

        members.sort_unstable();
        groups.push((uids, members));
    }

    groups.sort_by_key(|(_, members)| members.first().copied());
    groups.into_iter().map(|(_, members)| members).collect()
}

async fn resolve_one<S: ContactStore>(
    store: &S,
    record: &ContactRecord,
    skipped: &mut Vec<UnsupportedProperty>,
) -> EngineResult<Resolution> {
    if record.phones().is_empty() {
        return resolve_phoneless(store, record).await;
    }

    let existing = store
        .query(&AddressbookFilter::any_phone(record.phones().iter().cloned()))
        .await?;

    if existing.is_empty() {
        let uid = store.add(record.clone()).await?;
        return Ok(Resolution::Added { uid });
    }

    let (survivor, removed) = consolidate(store, existing, skipped).await?;
    let uid = stored_uid(&survivor)?.to_string();

    let outcome = meld(&survivor, record, Precedence::Pending);
    skipped.extend(outcome.skipped);

    if outcome.changed {
        store.modify(&outcome.record).await?;
    } else if removed.is_empty() {
        tracing::trace!(uid = %uid, "Contact already up to date");
        return Ok(Resolution::Unchanged { uid });
    }

    Ok(Resolution::Merged { uid, removed })
}

/// Melds conflicting stored records into one survivor.
///
/// The more recently revised record of each pair receives; a missing
/// revision is older than any present one and a tie keeps the record
/// queried first. Each folded-away record is deleted once the survivor has
/// been written.
async fn consolidate<S: ContactStore>(
    store: &S,
    existing: Vec<ContactRecord>,
    skipped: &mut Vec<UnsupportedProperty>,
) -> EngineResult<(ContactRecord, Vec<String>)> {
    let mut existing = existing.into_iter();
    let Some(mut survivor) = existing.next() else {
        return Err(CoreError::InvariantViolation("no stored record to consolidate").into());
    };
    let mut removed = Vec::new();

    for other in existing {
        let (receiver, donor) = if other.revision() > survivor.revision() {
            (other, survivor)
        } else {
            (survivor, other)
        };

        let outcome = meld(&receiver, &donor, Precedence::Receiver);
        skipped.extend(outcome.skipped);

        if outcome.changed {
            store.modify(&outcome.record).await?;
        }

        let donor_uid = stored_uid(&donor)?;
        store.remove(donor_uid).await?;
        tracing::debug!(
            survivor = ?outcome.record.uid(),
            removed = donor_uid,
            "Consolidated stored duplicate"
        );

        removed.push(donor_uid.to_string());
        survivor = outcome.record;
    }

    Ok((survivor, removed))
}

/// Matches a record without phone numbers by full name, else by name.
async fn resolve_phoneless<S: ContactStore>(
    store: &S,
    record: &ContactRecord,
) -> EngineResult<Resolution> {
    let key = [names::FN, names::N]
        .into_iter()
        .find_map(|name| record.first_value(name).filter(|v| !v.is_empty()).map(|v| (name, v)));

    if let Some((name, value)) = key {
        let filter = AddressbookFilter::anyof(vec![
            PropFilter::new(name).with_text_match(TextMatch::equals(value)),
        ]);
        let candidates = store.query(&filter).await?;

        if let Some(found) = candidates.iter().find(|c| contains_all(c, record)) {
            let uid = stored_uid(found)?.to_string();
            tracing::trace!(uid = %uid, "Phoneless contact already present");
            return Ok(Resolution::Unchanged { uid });
        }
    }

    let uid = store.add(record.clone()).await?;
    Ok(Resolution::Added { uid })
}

fn stored_uid(record: &ContactRecord) -> EngineResult<&str> {
    record
        .uid()
        .ok_or_else(|| CoreError::InvariantViolation("stored record without uid").into())
}
