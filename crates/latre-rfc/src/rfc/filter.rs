//! Address book query predicates.
//!
//! A predicate is a list of property filters combined with `anyof` or
//! `allof`. Stores evaluate it against each record with
//! [`AddressbookFilter::matches`].

use serde::Serialize;

use crate::rfc::vcard::ContactRecord;
use crate::rfc::vcard::core::names;
use crate::rfc::vcard::parse::lexer::line_value;

/// Filter for address book queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressbookFilter {
    /// Property filters.
    pub prop_filters: Vec<PropFilter>,
    /// Filter test (anyof/allof).
    pub test: FilterTest,
}

impl AddressbookFilter {
    /// Creates a new filter with anyof test.
    #[must_use]
    pub fn anyof(filters: Vec<PropFilter>) -> Self {
        Self {
            prop_filters: filters,
            test: FilterTest::AnyOf,
        }
    }

    /// Creates a new filter with allof test.
    #[must_use]
    pub fn allof(filters: Vec<PropFilter>) -> Self {
        Self {
            prop_filters: filters,
            test: FilterTest::AllOf,
        }
    }

    /// Matches records holding at least one of the given phone numbers.
    #[must_use]
    pub fn any_phone<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::anyof(
            numbers
                .into_iter()
                .map(|n| PropFilter::new(names::TEL).with_text_match(TextMatch::equals(n)))
                .collect(),
        )
    }

    /// Evaluates the filter against a record.
    ///
    /// A filter without property filters matches every record.
    #[must_use]
    pub fn matches(&self, record: &ContactRecord) -> bool {
        if self.prop_filters.is_empty() {
            return true;
        }
        match self.test {
            FilterTest::AnyOf => self.prop_filters.iter().any(|f| f.matches(record)),
            FilterTest::AllOf => self.prop_filters.iter().all(|f| f.matches(record)),
        }
    }
}

/// Filter test type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum FilterTest {
    /// Any filter must match.
    #[default]
    AnyOf,
    /// All filters must match.
    AllOf,
}

/// Property filter for queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropFilter {
    /// Property name.
    pub name: String,
    /// Is-not-defined test.
    pub is_not_defined: bool,
    /// Text match filter.
    pub text_match: Option<TextMatch>,
}

impl PropFilter {
    /// Creates a property filter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            is_not_defined: false,
            text_match: None,
        }
    }

    /// Sets is-not-defined.
    #[must_use]
    pub fn not_defined(mut self) -> Self {
        self.is_not_defined = true;
        self
    }

    /// Adds a text match.
    #[must_use]
    pub fn with_text_match(mut self, match_: TextMatch) -> Self {
        self.text_match = Some(match_);
        self
    }

    /// Evaluates the filter against a record.
    ///
    /// `TEL` is matched against the bare phone numbers, every other
    /// property against the raw values of its lines.
    #[must_use]
    pub fn matches(&self, record: &ContactRecord) -> bool {
        let lines = record.lines(&self.name);

        if self.is_not_defined {
            return lines.is_empty();
        }

        let Some(text_match) = &self.text_match else {
            return !lines.is_empty();
        };

        if self.name == names::TEL {
            record.phones().iter().any(|n| text_match.matches(n))
        } else {
            lines
                .iter()
                .any(|line| text_match.matches(line_value(line).trim()))
        }
    }
}

/// Text matching criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMatch {
    /// The text to match.
    pub value: String,
    /// Match type.
    pub match_type: MatchType,
    /// Negate the match.
    pub negate: bool,
}

impl TextMatch {
    fn with_type(value: impl Into<String>, match_type: MatchType) -> Self {
        Self {
            value: value.into(),
            match_type,
            negate: false,
        }
    }

    /// Creates a contains match.
    #[must_use]
    pub fn contains(value: impl Into<String>) -> Self {
        Self::with_type(value, MatchType::Contains)
    }

    /// Creates an equals match.
    #[must_use]
    pub fn equals(value: impl Into<String>) -> Self {
        Self::with_type(value, MatchType::Equals)
    }

    /// Creates a starts-with match.
    #[must_use]
    pub fn starts_with(value: impl Into<String>) -> Self {
        Self::with_type(value, MatchType::StartsWith)
    }

    /// Creates an ends-with match.
    #[must_use]
    pub fn ends_with(value: impl Into<String>) -> Self {
        Self::with_type(value, MatchType::EndsWith)
    }

    /// Negates the match.
    #[must_use]
    pub fn negate(mut self) -> Self {
        self.negate = true;
        self
    }

    /// Tests a single value, ignoring case.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();
        let needle = self.value.to_lowercase();

        let hit = match self.match_type {
            MatchType::Equals => candidate == needle,
            MatchType::Contains => candidate.contains(&needle),
            MatchType::StartsWith => candidate.starts_with(&needle),
            MatchType::EndsWith => candidate.ends_with(&needle),
        };

        hit != self.negate
    }
}

/// Text match type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MatchType {
    /// Contains the text.
    #[default]
    Contains,
    /// Equals the text.
    Equals,
    /// Starts with the text.
    StartsWith,
    /// Ends with the text.
    EndsWith,
}
