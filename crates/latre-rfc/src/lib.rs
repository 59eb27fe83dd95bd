//! vCard codec and store predicate model for the Lá Tre contact manager.

pub mod error;
pub mod rfc;
