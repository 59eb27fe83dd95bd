//! Content-line parameters (`TYPE=home,voice`, `ENCODING=b`, `CHARSET=…`).

/// One parameter of a content line. Names are uppercased; values keep
/// their spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    pub name: String,
    pub values: Vec<String>,
}

impl VCardParameter {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::multi(name, vec![value.into()])
    }

    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Case-insensitive membership test over the values.
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// First value of the parameter called `name`, if the line carries it.
#[must_use]
pub fn param_value<'a>(params: &'a [VCardParameter], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .and_then(VCardParameter::value)
}

/// Whether the line declares base64 content (`ENCODING=b` in 3.0,
/// `ENCODING=BASE64` in 2.1).
#[must_use]
pub fn is_base64(params: &[VCardParameter]) -> bool {
    params
        .iter()
        .any(|p| p.name == "ENCODING" && (p.has_value("b") || p.has_value("BASE64")))
}
