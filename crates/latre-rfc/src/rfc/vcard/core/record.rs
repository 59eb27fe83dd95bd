//! The contact record exchanged between the codec, the store and the engine.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::name::PersonName;
use super::property::names;
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::parse::ParseResult;
use crate::rfc::vcard::parse::lexer::{line_value, property_name};
use crate::rfc::vcard::parse::values::{
    is_version_number, parse_name, parse_revision, phone_number,
};

/// Type parameters written for phone numbers set programmatically.
const DEFAULT_TEL_PARAMS: &str = "TEL;TYPE=VOICE;TYPE=CELL:";

/// A contact as a set of raw vCard property lines.
///
/// Lines are grouped by uppercase property name and kept verbatim. The
/// phone set, uid and revision are derived from the `TEL`, `UID` and `REV`
/// lines and regenerated on every mutation, so they can never disagree
/// with the lines they come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    uid: Option<String>,
    fields: BTreeMap<String, Vec<String>>,
    phones: BTreeSet<String>,
    revision: Option<DateTime<Utc>>,
}

impl ContactRecord {
    /// Creates an empty, not-yet-persisted record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from property lines, skipping lines without a name.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::new();
        for line in lines {
            record.push_line(line);
        }
        record
    }

    // --- Raw lines ---

    /// Appends a property line.
    ///
    /// Returns `false` (and leaves the record untouched) when the line has
    /// no recognizable property name.
    pub fn push_line(&mut self, line: impl Into<String>) -> bool {
        let line = line.into();
        let line = line.trim_end_matches(['\r', '\n']).to_string();
        let Some(name) = property_name(&line) else {
            return false;
        };

        self.fields.entry(name.clone()).or_default().push(line);
        self.refresh(&name);
        true
    }

    /// Replaces every line of a property. An empty list removes it.
    pub fn set_lines(&mut self, name: &str, lines: Vec<String>) {
        let name = name.to_ascii_uppercase();
        if lines.is_empty() {
            self.fields.remove(&name);
        } else {
            self.fields.insert(name.clone(), lines);
        }
        self.refresh(&name);
    }

    /// Removes a property and returns its lines.
    pub fn remove_property(&mut self, name: &str) -> Vec<String> {
        let name = name.to_ascii_uppercase();
        let removed = self.fields.remove(&name).unwrap_or_default();
        self.refresh(&name);
        removed
    }

    /// Returns the lines of a property, in order of appearance.
    #[must_use]
    pub fn lines(&self, name: &str) -> &[String] {
        self.fields
            .get(&name.to_ascii_uppercase())
            .map_or(&[][..], Vec::as_slice)
    }

    /// Returns the value of the first line of a property.
    #[must_use]
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.lines(name).first().map(|line| line_value(line).trim())
    }

    /// Returns the names of all properties present.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Returns every property with its lines.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    // --- Derived data ---

    /// Store-assigned identifier; `None` until the record is persisted.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn set_uid(&mut self, uid: &str) {
        self.set_lines(names::UID, vec![format!("UID:{uid}")]);
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.uid.is_some()
    }

    /// Bare phone numbers of all `TEL` lines, deduplicated.
    #[must_use]
    pub fn phones(&self) -> &BTreeSet<String> {
        &self.phones
    }

    /// Raw `TEL` lines, in order of appearance.
    #[must_use]
    pub fn phone_lines(&self) -> &[String] {
        self.lines(names::TEL)
    }

    /// Returns whether both records have at least one phone number in common.
    #[must_use]
    pub fn shares_phone_with(&self, other: &Self) -> bool {
        !self.phones.is_disjoint(&other.phones)
    }

    /// Replaces the `TEL` lines with one voice/cell line per number.
    pub fn set_phone_numbers<I, S>(&mut self, numbers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines = numbers
            .into_iter()
            .map(|n| format!("{DEFAULT_TEL_PARAMS}{}", n.as_ref()))
            .collect();
        self.set_lines(names::TEL, lines);
    }

    /// Parsed `REV` timestamp.
    #[must_use]
    pub fn revision(&self) -> Option<DateTime<Utc>> {
        self.revision
    }

    pub fn set_revision(&mut self, revision: DateTime<Utc>) {
        self.set_lines(
            names::REV,
            vec![format!("REV:{}", revision.format("%Y-%m-%dT%H:%M:%SZ"))],
        );
    }

    // --- Interpreted properties ---

    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.first_value(names::VERSION)
    }

    /// Sets the `VERSION` line.
    ///
    /// ## Errors
    /// Returns a validation error if the version is not made of digits and dots.
    pub fn set_version(&mut self, version: &str) -> RfcResult<()> {
        if !is_version_number(version) {
            return Err(RfcError::ValidationError(format!(
                "{version} as version is not accepted"
            )));
        }
        self.set_lines(names::VERSION, vec![format!("VERSION:{version}")]);
        Ok(())
    }

    /// Decoded family and given name from the first `N` line.
    ///
    /// ## Errors
    /// Returns a field error if the `N` line is malformed or uses an
    /// unsupported encoding.
    pub fn name(&self) -> ParseResult<Option<PersonName>> {
        self.lines(names::N)
            .first()
            .map(|line| parse_name(line, 0))
            .transpose()
    }

    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.first_value(names::FN).filter(|v| !v.is_empty())
    }

    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.lines(names::EMAIL)
            .iter()
            .map(|line| line_value(line).trim())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// A representative name: full name, else first phone number, else
    /// first email address.
    #[must_use]
    pub fn display_name(&self) -> Option<String> {
        if let Some(fn_) = self.formatted_name() {
            return Some(fn_.to_string());
        }
        if let Some(number) = self.phone_lines().iter().find_map(|l| phone_number(l)) {
            return Some(number);
        }
        self.emails().first().map(|e| (*e).to_string())
    }

    fn refresh(&mut self, name: &str) {
        match name {
            names::TEL => {
                self.phones = self
                    .lines(names::TEL)
                    .iter()
                    .filter_map(|line| phone_number(line))
                    .collect();
            }
            names::UID => {
                self.uid = self
                    .first_value(names::UID)
                    .filter(|v| !v.is_empty())
                    .map(String::from);
            }
            names::REV => {
                self.revision = self.first_value(names::REV).and_then(|value| {
                    let parsed = parse_revision(value);
                    if parsed.is_none() {
                        tracing::warn!(value, "Ignoring unparsable REV value");
                    }
                    parsed
                });
            }
            _ => {}
        }
    }
}
