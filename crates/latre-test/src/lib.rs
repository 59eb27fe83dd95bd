//! Lá Tre contact manager - integration test support.
//!
//! Re-exports the workspace crates so end-to-end tests can use one
//! `latre_test::component::` path.

pub mod component {
    pub use latre_core::config;
    pub use latre_engine::{dedup, export, import, meld, report, resolve};
    pub use latre_rfc::rfc::{filter, vcard};

    pub mod store {
        pub use latre_store::*;
    }

    pub mod shell {
        pub use latre_app::cli::Command;
        pub use latre_app::commands::run;
    }
}
