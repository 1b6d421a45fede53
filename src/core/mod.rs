//! Core business logic - framework-agnostic sync, reconciliation, and sale
//! recording operations.
//!
//! Everything in here takes the owning account's `owner_id` as an explicit
//! parameter. There is no ambient session state: whoever presents an owner
//! identifier owns that identifier's rows, and a real authentication layer can
//! be substituted in front of these functions without touching them.

/// Pass-through product management (list, delete)
pub mod product;
/// Idempotent upsert reconciliation for client-originated records
pub mod reconcile;
/// Transactional sale recording with atomic stock decrement
pub mod sale;
/// Full-state sync reads for client bootstrap and resync
pub mod sync;

/// Rounds a monetary amount to 2 decimal places, the precision carried by the
/// wire format and the store.
pub(crate) fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
