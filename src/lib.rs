//! farmsync - Sync backend for an offline-first farm inventory and
//! point-of-sale app.
//!
//! An offline-capable client keeps local `products` and `sales` collections
//! and periodically reconciles them with this server. The crate provides the
//! idempotent upsert protocol that merges client-originated records (carrying
//! client-generated identifiers) into server state, the transactional sale
//! path that atomically records a sale and decrements stock, and the
//! full-state sync read used for bootstrap and resync.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Errors documented per function where non-obvious
)]

/// HTTP interface - axum router, handlers, and wire types
pub mod api;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - framework-agnostic reconciliation, sale recording, and sync reads
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
