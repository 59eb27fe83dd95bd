//! Folding two conflicting records into one.
//!
//! ## Summary
//! The properties whose lines differ between the two records are walked one
//! by one. `TEL` is always the union of both records' numbers, receiver
//! lines first. Any other property is taken from whichever record has it;
//! when both do, [`Precedence`] decides. `UID` and `REV` belong to the store
//! and never take part.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use latre_rfc::rfc::vcard::core::names;
use latre_rfc::rfc::vcard::parse::lexer::property_name;
use latre_rfc::rfc::vcard::parse::values::phone_number;
use latre_rfc::rfc::vcard::{ContactField, ContactRecord, content_lines};

/// Which record's value stands when both carry a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// The pending (donor) record's value replaces the receiver's.
    Pending,
    /// The receiver keeps its value.
    Receiver,
}

/// A property skipped during a merge because the store has no field for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UnsupportedProperty {
    pub name: String,
}

impl fmt::Display for UnsupportedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported property {}", self.name)
    }
}

/// Result of melding two records.
#[derive(Debug, Clone)]
pub struct MeldOutcome {
    /// The receiver with the donor folded in.
    pub record: ContactRecord,
    /// Whether the result differs from the receiver.
    pub changed: bool,
    /// Properties left out of the merge.
    pub skipped: Vec<UnsupportedProperty>,
}

/// Content lines of a record without the store-managed ones.
fn comparable_lines(record: &ContactRecord) -> Vec<String> {
    content_lines(record)
        .into_iter()
        .filter(|line| {
            property_name(line).is_none_or(|name| {
                !ContactField::from_property_name(&name).is_some_and(ContactField::is_store_managed)
            })
        })
        .collect()
}

/// Returns the names of the properties whose lines differ between two
/// records, `UID` and `REV` excluded.
#[must_use]
pub fn differing_properties(a: &ContactRecord, b: &ContactRecord) -> BTreeSet<String> {
    let lines_a: BTreeSet<String> = comparable_lines(a).into_iter().collect();
    let lines_b: BTreeSet<String> = comparable_lines(b).into_iter().collect();

    lines_a
        .symmetric_difference(&lines_b)
        .filter_map(|line| property_name(line))
        .collect()
}

/// Whether `container` already carries every line of `record`, ignoring
/// `UID`, `REV` and `VERSION`.
#[must_use]
pub fn contains_all(container: &ContactRecord, record: &ContactRecord) -> bool {
    let held: BTreeSet<String> = comparable_lines(container).into_iter().collect();
    comparable_lines(record)
        .iter()
        .filter(|line| property_name(line).is_none_or(|name| name != names::VERSION))
        .all(|line| held.contains(line))
}

/// Receiver's `TEL` lines followed by the donor's lines for numbers the
/// receiver does not have yet.
fn union_phone_lines(receiver: &ContactRecord, donor: &ContactRecord) -> Vec<String> {
    let mut lines = receiver.phone_lines().to_vec();
    let mut seen = receiver.phones().clone();

    for line in donor.phone_lines() {
        if let Some(number) = phone_number(line)
            && seen.insert(number)
        {
            lines.push(line.clone());
        }
    }

    lines
}

/// Folds `donor` into `receiver`.
///
/// The result's phone set is the union of both records' phone sets. A
/// property only one side has always ends up in the result, unless the
/// store has no field for it: the receiver's lines are then left alone and
/// donor values for it are reported in [`MeldOutcome::skipped`].
#[must_use]
pub fn meld(receiver: &ContactRecord, donor: &ContactRecord, precedence: Precedence) -> MeldOutcome {
    let mut record = receiver.clone();
    let mut skipped = Vec::new();

    for name in differing_properties(receiver, donor) {
        let Some(field) = ContactField::from_property_name(&name) else {
            // Receiver-only lines stay put; only donor values can be lost.
            if !donor.lines(&name).is_empty() {
                tracing::warn!(property = %name, "Skipping property with no contact field");
                skipped.push(UnsupportedProperty { name });
            }
            continue;
        };

        if field == ContactField::Phone {
            record.set_lines(names::TEL, union_phone_lines(receiver, donor));
            continue;
        }

        let donor_lines = donor.lines(&name);
        if donor_lines.is_empty() {
            continue;
        }

        let receiver_has = !receiver.lines(&name).is_empty();
        if !receiver_has || precedence == Precedence::Pending {
            tracing::trace!(field = %field, "Taking donor value");
            record.set_lines(&name, donor_lines.to_vec());
        }
    }

    let changed = comparable_lines(&record) != comparable_lines(receiver);

    MeldOutcome {
        record,
        changed,
        skipped,
    }
}
