//! # ampere-core: Pure Business Logic for Ampere POS
//!
//! This crate is the **heart** of the Ampere POS ledger. It contains every
//! bookkeeping rule as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ampere POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (billing screen / API)                   │   │
//! │  │      cart of line items ──► payment ──► printable invoice       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     ampere-ledger (engine)                      │   │
//! │  │      create_invoice, record_payment, revenue_report             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ampere-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  totals   │  │   rules   │  │   │
//! │  │   │  Invoice  │  │  TaxRate  │  │  status   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO AMBIENT STATE • PURE FUNCTIONS     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  ampere-db (Store trait + backends)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Invoice, Payment, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`billing`] - Invoice totals, settlement status, payment application
//! - [`error`] - Validation error types
//! - [`validation`] - Input rule checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output - always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are paisa (i64), never floats
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use ampere_core::money::Money;
//! use ampere_core::billing::derive_status;
//! use ampere_core::types::InvoiceStatus;
//!
//! let total = Money::from_rupees(700);
//! let paid = Money::from_rupees(300);
//!
//! // 300 of 700 received: invoice is partially settled
//! assert_eq!(derive_status(paid, total), InvoiceStatus::Partial);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use ampere_core::Money` instead of
// `use ampere_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed on a single invoice
///
/// ## Business Reason
/// Prevents runaway carts and keeps invoices printable on one page.
pub const MAX_INVOICE_LINES: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Wire is sold by the meter, so quantities run far higher than piece goods,
/// but a five-digit quantity is almost certainly a typo.
pub const MAX_LINE_QUANTITY: i64 = 9_999;

/// Display name recorded for sales with no customer reference.
pub const WALK_IN_CUSTOMER: &str = "Walk-in Customer";
