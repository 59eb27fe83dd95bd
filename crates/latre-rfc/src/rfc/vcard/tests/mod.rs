//! Codec tests over whole documents.

mod fixtures;
mod round_trip;
