//! Core vCard types.

mod field;
mod name;
mod parameter;
mod property;
mod record;

pub use field::{ContactField, FIELD_TABLE};
pub use name::PersonName;
pub use parameter::{VCardParameter, is_base64, param_value};
pub use property::names;
pub use record::ContactRecord;
