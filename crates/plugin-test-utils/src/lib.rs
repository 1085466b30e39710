//! Shared test utilities for the plugin-sync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`plugin`] — generated plugin repositories that act as local "remotes"
//! - [`rev`] — revision helpers for asserting on repository state

pub mod plugin;
pub mod rev;

/// Install a `tracing` subscriber honouring `RUST_LOG` for test debugging.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
