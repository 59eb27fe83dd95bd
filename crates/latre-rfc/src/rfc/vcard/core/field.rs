//! Mapping between vCard property names and store field identifiers.
//!
//! The address-book store addresses contact data by field rather than by
//! raw property name. Merging walks the properties that differ between two
//! records and needs the field each one lands in; properties that have no
//! field (vendor extensions mostly) are skipped by the caller with a
//! warning.

use std::fmt;

use serde::Serialize;

/// A contact field understood by the address-book store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ContactField {
    FullName,
    Name,
    Nickname,
    Photo,
    Birthday,
    Anniversary,
    Gender,
    Address,
    Label,
    Phone,
    Email,
    Impp,
    Mailer,
    Timezone,
    Geo,
    Title,
    Role,
    Logo,
    Agent,
    Organization,
    Categories,
    Note,
    ProductId,
    Revision,
    SortString,
    Sound,
    Uid,
    Url,
    Version,
    Class,
    Key,
    Kind,
    Language,
    Member,
    Related,
    FreeBusyUrl,
    CalendarUri,
    CalendarAddressUri,
    FileAs,
    Spouse,
    Manager,
    Assistant,
    BlogUrl,
    VideoUrl,
    ImAim,
    ImJabber,
    ImYahoo,
    ImMsn,
    ImIcq,
    ImGroupwise,
    ImSkype,
    ImGoogleTalk,
}

/// Every known property name with the field it maps to.
pub const FIELD_TABLE: &[(&str, ContactField)] = &[
    ("FN", ContactField::FullName),
    ("N", ContactField::Name),
    ("NICKNAME", ContactField::Nickname),
    ("PHOTO", ContactField::Photo),
    ("BDAY", ContactField::Birthday),
    ("ANNIVERSARY", ContactField::Anniversary),
    ("GENDER", ContactField::Gender),
    ("ADR", ContactField::Address),
    ("LABEL", ContactField::Label),
    ("TEL", ContactField::Phone),
    ("EMAIL", ContactField::Email),
    ("IMPP", ContactField::Impp),
    ("MAILER", ContactField::Mailer),
    ("TZ", ContactField::Timezone),
    ("GEO", ContactField::Geo),
    ("TITLE", ContactField::Title),
    ("ROLE", ContactField::Role),
    ("LOGO", ContactField::Logo),
    ("AGENT", ContactField::Agent),
    ("ORG", ContactField::Organization),
    ("CATEGORIES", ContactField::Categories),
    ("NOTE", ContactField::Note),
    ("PRODID", ContactField::ProductId),
    ("REV", ContactField::Revision),
    ("SORT-STRING", ContactField::SortString),
    ("SOUND", ContactField::Sound),
    ("UID", ContactField::Uid),
    ("URL", ContactField::Url),
    ("VERSION", ContactField::Version),
    ("CLASS", ContactField::Class),
    ("KEY", ContactField::Key),
    ("KIND", ContactField::Kind),
    ("LANG", ContactField::Language),
    ("MEMBER", ContactField::Member),
    ("RELATED", ContactField::Related),
    ("FBURL", ContactField::FreeBusyUrl),
    ("CALURI", ContactField::CalendarUri),
    ("CALADRURI", ContactField::CalendarAddressUri),
    ("X-EVOLUTION-FILE-AS", ContactField::FileAs),
    ("X-EVOLUTION-SPOUSE", ContactField::Spouse),
    ("X-EVOLUTION-MANAGER", ContactField::Manager),
    ("X-EVOLUTION-ASSISTANT", ContactField::Assistant),
    ("X-EVOLUTION-BLOG-URL", ContactField::BlogUrl),
    ("X-EVOLUTION-VIDEO-URL", ContactField::VideoUrl),
    ("X-AIM", ContactField::ImAim),
    ("X-JABBER", ContactField::ImJabber),
    ("X-YAHOO", ContactField::ImYahoo),
    ("X-MSN", ContactField::ImMsn),
    ("X-ICQ", ContactField::ImIcq),
    ("X-GROUPWISE", ContactField::ImGroupwise),
    ("X-SKYPE", ContactField::ImSkype),
    ("X-GOOGLE-TALK", ContactField::ImGoogleTalk),
];

impl ContactField {
    /// Looks up the field for a property name (case-insensitive).
    ///
    /// Returns `None` for properties the store has no field for.
    #[must_use]
    pub fn from_property_name(name: &str) -> Option<Self> {
        FIELD_TABLE
            .iter()
            .find(|(prop, _)| prop.eq_ignore_ascii_case(name))
            .map(|&(_, field)| field)
    }

    /// Returns the vCard property name of this field.
    #[must_use]
    pub fn property_name(self) -> &'static str {
        FIELD_TABLE
            .iter()
            .find(|&&(_, field)| field == self)
            .map_or("", |&(prop, _)| prop)
    }

    /// Whether the field is maintained by the store rather than the user.
    #[must_use]
    pub const fn is_store_managed(self) -> bool {
        matches!(self, Self::Uid | Self::Revision)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property_name())
    }
}
