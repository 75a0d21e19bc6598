//! # Ledger Error Types
//!
//! What callers of the engine see.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Caller-Facing Errors                               │
//! │                                                                         │
//! │  Validation       ← malformed input, caught before any write           │
//! │  NotFound         ← dangling product/customer/invoice reference        │
//! │  InsufficientStock← a sale would overdraw a product                    │
//! │  AlreadySettled   ← payment against a paid invoice                     │
//! │  Overpayment      ← payment exceeding the remaining due                │
//! │  Conflict         ← concurrent modification, retries exhausted         │
//! │  Store            ← backend internals (connection, migration, query)   │
//! │                                                                         │
//! │  Every error is scoped to ONE operation and recoverable by the         │
//! │  caller; nothing here is fatal to the process.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use ampere_core::{Money, ValidationError};
use ampere_db::StoreError;

/// Errors surfaced by ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or out-of-range input. Nothing was persisted; fix the
    /// input and retry.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced product, customer, or invoice does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A sale would drive a product's stock below zero.
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Payment against an invoice that is already fully settled.
    #[error("Invoice {invoice_id} is already settled")]
    AlreadySettled { invoice_id: String },

    /// Payment larger than the invoice's remaining due. The policy here is
    /// to reject: excess cash is change at the counter, not a credit.
    #[error("Payment of {amount} exceeds remaining due {remaining} on invoice {invoice_id}")]
    Overpayment {
        invoice_id: String,
        amount: Money,
        remaining: Money,
    },

    /// Concurrent modification persisted after bounded retries. The caller
    /// should retry the whole operation.
    #[error("Concurrent modification of {entity} {id}, retries exhausted")]
    Conflict { entity: String, id: String },

    /// Backend failure (connection, migration, query).
    #[error("Storage error: {0}")]
    Store(StoreError),
}

/// Lifts store errors into the caller-facing taxonomy.
///
/// NotFound, InsufficientStock, and Conflict carry meaning the caller acts
/// on, so they map to their own variants; everything else stays wrapped.
impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => LedgerError::NotFound { entity, id },
            StoreError::InsufficientStock {
                product,
                available,
                requested,
            } => LedgerError::InsufficientStock {
                product,
                available,
                requested,
            },
            StoreError::Conflict { entity, id } => LedgerError::Conflict { entity, id },
            other => LedgerError::Store(other),
        }
    }
}

impl LedgerError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let err: LedgerError = StoreError::not_found("Invoice", "inv-1").into();
        assert!(matches!(err, LedgerError::NotFound { .. }));

        let err: LedgerError = StoreError::conflict("Invoice", "inv-1").into();
        assert!(matches!(err, LedgerError::Conflict { .. }));

        let err: LedgerError = StoreError::QueryFailed("boom".to_string()).into();
        assert!(matches!(err, LedgerError::Store(_)));
    }

    #[test]
    fn test_overpayment_message() {
        let err = LedgerError::Overpayment {
            invoice_id: "inv-1".to_string(),
            amount: Money::from_rupees(900),
            remaining: Money::from_rupees(400),
        };
        assert_eq!(
            err.to_string(),
            "Payment of Rs 900.00 exceeds remaining due Rs 400.00 on invoice inv-1"
        );
    }
}
