//! Import outcome as shown to the user.

use serde::Serialize;

use crate::meld::UnsupportedProperty;
use crate::resolve::Resolution;

/// A source file, or a block inside one, that could not be imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    /// Path or URI as given.
    pub source: String,
    pub error: String,
}

/// Totals of one import run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Distinct contact blocks found across all readable sources.
    pub total: usize,
    /// Blocks that ended up in the store, added, merged or already there.
    pub imported: usize,
    pub added: Vec<String>,
    pub modified: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: usize,
    pub failures: Vec<SourceFailure>,
    pub warnings: Vec<UnsupportedProperty>,
}

impl ImportReport {
    /// Folds a resolution standing for `members` source blocks into the totals.
    ///
    /// Records resolved together report the same uids; each uid is listed
    /// once.
    pub fn record(&mut self, resolution: Resolution, members: usize) {
        match resolution {
            Resolution::Added { uid } => {
                self.imported += members;
                push_new(&mut self.added, uid);
            }
            Resolution::Merged { uid, removed } => {
                self.imported += members;
                push_new(&mut self.modified, uid);
                for uid in removed {
                    push_new(&mut self.removed, uid);
                }
            }
            Resolution::Unchanged { .. } => {
                self.imported += members;
                self.unchanged += 1;
            }
            Resolution::Failed { name, error } => {
                self.failures.push(SourceFailure {
                    source: name.unwrap_or_else(|| "unnamed contact".to_string()),
                    error,
                });
            }
        }
    }

    /// Adds warnings, dropping repeats.
    pub fn warn(&mut self, warnings: impl IntoIterator<Item = UnsupportedProperty>) {
        for warning in warnings {
            if !self.warnings.contains(&warning) {
                self.warnings.push(warning);
            }
        }
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// One-line summary, e.g. "8 of 10 contacts imported".
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} of {} contacts imported", self.imported, self.total)
    }
}

fn push_new(uids: &mut Vec<String>, uid: String) {
    if !uids.contains(&uid) {
        uids.push(uid);
    }
}
