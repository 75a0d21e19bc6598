//! # ampere-ledger: Invoice/Payment Reconciliation Engine
//!
//! The orchestration layer of Ampere POS. It ties the pure bookkeeping rules
//! of `ampere-core` to the transactional storage of `ampere-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ampere POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (billing screen / API)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ampere-ledger (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐  ┌────────────────┐  ┌────────────────┐  │   │
//! │  │   │     ledger     │  │     report     │  │     error      │  │   │
//! │  │   │ create_invoice │  │ RevenueReport  │  │  LedgerError   │  │   │
//! │  │   │ record_payment │  │ BalanceAudit   │  │                │  │   │
//! │  │   └────────────────┘  └────────────────┘  └────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   EXPLICIT ACTORS • ATOMIC COMMITS • BOUNDED RETRIES           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Store trait                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ampere-db (SQLite / in-memory backends)            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ampere_core::{Actor, CartLine, CustomerRef, InvoiceDraft, PaymentMethod};
//! use ampere_db::MemoryStore;
//! use ampere_ledger::Ledger;
//!
//! # async fn demo(product_id: String) -> Result<(), ampere_ledger::LedgerError> {
//! let ledger = Ledger::new(MemoryStore::new());
//! let counter = Actor::operator("counter-1");
//!
//! let invoice = ledger
//!     .create_invoice(
//!         InvoiceDraft {
//!             lines: vec![CartLine { product_id, quantity: 2 }],
//!             customer: CustomerRef::WalkIn { name: None, phone: None },
//!             paid_paisa: 70_000,
//!             method: PaymentMethod::Cash,
//!         },
//!         &counter,
//!     )
//!     .await?;
//!
//! assert!(invoice.is_settled());
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod report;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LedgerError, LedgerResult};
pub use ledger::{Ledger, LedgerConfig, MAX_SETTLEMENT_RETRIES};
pub use report::{BalanceAudit, RevenueReport};
