//! vCard serialization.

pub mod fold;
pub mod photo;
mod serializer;

pub use serializer::{DEFAULT_VERSION, content_lines, serialize, serialize_all};
