//! # Logging Setup
//!
//! Actors log every request with an `entity_type` field (`Product`, `Order`, ...)
//! plus the entity ID, so the module path is redundant and is hidden.
//!
//! ```bash
//! RUST_LOG=info cargo run            # lifecycle and outcomes
//! RUST_LOG=debug cargo run           # full request payloads
//! RUST_LOG=nexora=debug,info cargo run
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls are ignored (tests call it freely).
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
