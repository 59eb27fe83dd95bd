use std::fmt;

use serde::Serialize;

/// Decoded family and given name of an `N` property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonName {
    pub family: String,
    pub given: String,
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.given.is_empty(), self.family.is_empty()) {
            (false, false) => write!(f, "{} {}", self.given, self.family),
            (true, _) => write!(f, "{}", self.family),
            (false, true) => write!(f, "{}", self.given),
        }
    }
}
