//! Import deduplication and merge engine for the Lá Tre contact manager.
//!
//! ## Overview
//!
//! An import runs in three stages:
//!
//! 1. [`import::collect_blocks`] reads the candidate files and drops blocks
//!    that appear verbatim more than once.
//! 2. [`dedup::reduce_batch`] folds parsed records that share a phone number
//!    into one, so that the batch is pairwise phone-disjoint.
//! 3. [`resolve::resolve_batch`] matches each unique record against the
//!    store and adds, merges or skips it.
//!
//! Two records are folded with [`meld::meld`], which never loses a phone
//! number. [`export`] writes stored records back to vCard files.

pub mod dedup;
pub mod error;
pub mod export;
pub mod import;
pub mod meld;
pub mod report;
pub mod resolve;


pub use error::{EngineError, EngineResult};
