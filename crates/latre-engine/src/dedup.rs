//! Reducing an import batch to phone-disjoint records.

use std::collections::VecDeque;

use latre_rfc::rfc::vcard::ContactRecord;

use crate::meld::{Precedence, UnsupportedProperty, meld};

/// A batch after overlapping records were folded together.
#[derive(Debug, Clone, Default)]
pub struct BatchReduction {
    /// Pairwise phone-disjoint records, in order of their first member.
    pub records: Vec<ContactRecord>,
    /// How many input records were folded into each output record.
    pub members: Vec<usize>,
    /// Properties skipped while folding.
    pub skipped: Vec<UnsupportedProperty>,
}

/// Folds records that share a phone number into one.
///
/// ## Summary
/// The head of the working list absorbs every remaining record it overlaps
/// with, later records taking precedence on conflicting values. Absorbing a
/// record can create new overlaps, so the remaining records are rescanned
/// until a pass absorbs nothing. Overlap is not transitive, which is why
/// records are not simply grouped by phone number.
///
/// Records without phone numbers are passed through untouched.
#[tracing::instrument(skip_all, fields(batch_size = records.len()))]
#[must_use]
pub fn reduce_batch(records: Vec<ContactRecord>) -> BatchReduction {
    let mut pending: VecDeque<ContactRecord> = records.into();
    let mut reduction = BatchReduction::default();

    while let Some(mut head) = pending.pop_front() {
        let mut members = 1;

        loop {
            let mut absorbed = false;
            let mut deferred = VecDeque::with_capacity(pending.len());

            while let Some(other) = pending.pop_front() {
                if head.shares_phone_with(&other) {
                    let outcome = meld(&head, &other, Precedence::Pending);
                    head = outcome.record;
                    reduction.skipped.extend(outcome.skipped);
                    members += 1;
                    absorbed = true;
                } else {
                    deferred.push_back(other);
                }
            }

            pending = deferred;
            if !absorbed {
                break;
            }
        }

        tracing::trace!(members, phones = head.phones().len(), "Reduced record");
        reduction.records.push(head);
        reduction.members.push(members);
    }

    tracing::debug!(uniques = reduction.records.len(), "Reduced batch");
    reduction
}
