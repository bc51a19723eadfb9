//! Typed error hierarchy for the EcoManager core.
//!
//! Two kinds of failure exist in this system and only one of them is an
//! error type: store failures (`StoreError`). Form validation failures are
//! plain data (a field→message map, see `form::ValidationErrors`) and are
//! never raised through `Result`.

use thiserror::Error;

/// Errors from the entity store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The target record no longer exists. Raised by update and delete,
    /// mirrored to HTTP 404 at the API layer.
    #[error("{kind} não encontrado (id {id})")]
    NotFound { kind: &'static str, id: u64 },

    #[error("Store lock poisoned")]
    LockPoisoned,
}
