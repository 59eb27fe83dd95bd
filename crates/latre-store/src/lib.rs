//! Address book stores for the Lá Tre contact manager.
//!
//! The engine only talks to a store through [`store::ContactStore`]. Two
//! implementations ship with the crate: [`memory::MemoryStore`] for tests
//! and embedding, and [`vdir::VdirStore`], a directory of one `.vcf` file per
//! contact.

pub mod error;
pub mod memory;
pub mod store;
pub mod vdir;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::ContactStore;
pub use vdir::VdirStore;
