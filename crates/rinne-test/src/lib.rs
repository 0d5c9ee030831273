//! Rinne recurrence engine - integration test support.
//!
//! This crate re-exports the workspace crates to support integration
//! tests that use `rinne_test::component` paths.

pub mod component {
    // Re-export core primitives at the component level
    pub use rinne_core::{arith, config, constants, error};

    // Re-export the recurrence layer
    pub use rinne_rfc::error as rfc_error;
    pub use rinne_rfc::rfc::recur;
}
