//! spida-webhook - relay webhook results back to a SPIDAmin project
//!
//! Invoked by SPIDAmin as a webhook handler: the payload arrives on stdin,
//! one update goes back to the server, and the process exits. Any fatal
//! condition exits non-zero.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

/// Main entry point for the spida-webhook CLI
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    cli::run().await
}
