//! # Store Trait
//!
//! The single persistence contract every backend implements.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Interchangeable Backends                              │
//! │                                                                         │
//! │                    ┌──────────────────┐                                 │
//! │                    │  ampere-ledger   │  written against               │
//! │                    │  Ledger<S: Store>│  the trait ONLY                │
//! │                    └────────┬─────────┘                                 │
//! │                             │                                           │
//! │              ┌──────────────┴──────────────┐                            │
//! │              ▼                             ▼                            │
//! │     ┌─────────────────┐          ┌─────────────────┐                   │
//! │     │   SqliteStore   │          │   MemoryStore   │                   │
//! │     │  (sqlx, pooled, │          │  (RwLock over   │                   │
//! │     │   WAL, file or  │          │   plain maps,   │                   │
//! │     │   in-memory)    │          │   tests/dev)    │                   │
//! │     └─────────────────┘          └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The contract is deliberately narrow: per-entity reads and writes plus TWO
//! transactional multi-writes. Those two commits are the only places where
//! several records change together, and each backend guarantees they apply
//! atomically — every constituent write lands or none does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use ampere_core::{Customer, Invoice, InvoiceStatus, Payment, Product};

use crate::error::StoreResult;

// =============================================================================
// Commit Units
// =============================================================================

/// One stock decrement inside an invoice commit.
#[derive(Debug, Clone)]
pub struct StockDecrement {
    pub product_id: String,
    pub quantity: i64,
}

/// A signed balance adjustment on a customer inside a commit.
#[derive(Debug, Clone)]
pub struct CustomerDelta {
    pub customer_id: String,
    pub delta_paisa: i64,
}

/// Everything an invoice creation writes, as ONE atomic unit.
///
/// The backend must re-guard each stock decrement inside the transaction
/// (`stock >= quantity`); insufficient stock aborts the whole commit with
/// zero observable change. No orphan invoice, no partial decrements.
#[derive(Debug, Clone)]
pub struct InvoiceCommit {
    /// The fully computed invoice, items included.
    pub invoice: Invoice,
    /// Stock decrements, one per cart line.
    pub stock_decrements: Vec<StockDecrement>,
    /// Balance increment for the referenced customer, when the sale is on
    /// credit to an existing customer. `None` for walk-ins or settled sales.
    pub customer_delta: Option<CustomerDelta>,
}

/// Everything a payment receipt writes, as ONE atomic unit.
///
/// The invoice update is conditional on `expected_revision` — if a concurrent
/// settlement bumped the revision first, the backend returns
/// [`crate::StoreError::Conflict`] and writes nothing, so the caller can
/// reload and retry.
#[derive(Debug, Clone)]
pub struct PaymentCommit {
    /// The immutable journal entry to append.
    pub payment: Payment,
    /// Revision the settlement columns were computed against.
    pub expected_revision: i64,
    /// New cumulative paid, in paisa.
    pub new_paid_paisa: i64,
    /// New remaining due, in paisa.
    pub new_due_paisa: i64,
    /// Recomputed status.
    pub new_status: InvoiceStatus,
    /// Balance decrement for the invoice's customer, when it has one.
    pub customer_delta: Option<CustomerDelta>,
}

// =============================================================================
// Store Trait
// =============================================================================

/// Backend-agnostic persistence contract.
///
/// Covers the five capabilities the engine needs — insert with caller-built
/// records, update by id, read by id, read all, and transactional
/// multi-write — plus the purpose-built guarded mutations (`adjust_stock`,
/// `adjust_due`) that back the bookkeeping invariants.
#[async_trait]
pub trait Store: Send + Sync {
    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    /// Inserts a new product.
    async fn insert_product(&self, product: &Product) -> StoreResult<()>;

    /// Updates a product's catalog fields (name, category, unit, prices,
    /// watts). Stock is NOT written here — stock changes only through
    /// [`Store::adjust_stock`] or an invoice commit, so the non-negative
    /// guard can never be bypassed by an edit.
    async fn update_product(&self, product: &Product) -> StoreResult<()>;

    /// Deletes a product. Historical invoice items keep their snapshots.
    async fn delete_product(&self, id: &str) -> StoreResult<()>;

    /// Gets a product by id.
    async fn product(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Lists all products, newest first.
    async fn products(&self) -> StoreResult<Vec<Product>>;

    /// Applies a signed stock delta and returns the new level.
    ///
    /// Fails with [`crate::StoreError::InsufficientStock`] BEFORE persisting
    /// when `stock + delta < 0`.
    async fn adjust_stock(&self, product_id: &str, delta: i64) -> StoreResult<i64>;

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Inserts a new customer.
    async fn insert_customer(&self, customer: &Customer) -> StoreResult<()>;

    /// Updates a customer's contact fields (name, phone, email, address).
    /// The running balance is NOT written here — it changes only through
    /// [`Store::adjust_due`] or a ledger commit.
    async fn update_customer(&self, customer: &Customer) -> StoreResult<()>;

    /// Gets a customer by id.
    async fn customer(&self, id: &str) -> StoreResult<Option<Customer>>;

    /// Lists all customers, newest first.
    async fn customers(&self) -> StoreResult<Vec<Customer>>;

    /// Looks up a customer by phone number (the business lookup key).
    async fn customer_by_phone(&self, phone: &str) -> StoreResult<Option<Customer>>;

    /// Applies a signed balance delta and returns the new balance in paisa.
    /// Deliberately unfloored: a direct adjustment may take the balance
    /// negative.
    async fn adjust_due(&self, customer_id: &str, delta_paisa: i64) -> StoreResult<i64>;

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    /// Gets an invoice with its items.
    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>>;

    /// Lists all invoices with items, newest first.
    async fn invoices(&self) -> StoreResult<Vec<Invoice>>;

    /// Lists invoices referencing the given customer, newest first.
    async fn invoices_for_customer(&self, customer_id: &str) -> StoreResult<Vec<Invoice>>;

    /// Lists invoices in any of the given statuses, newest first.
    async fn invoices_with_status(&self, statuses: &[InvoiceStatus]) -> StoreResult<Vec<Invoice>>;

    /// Lists invoices created inside `[from, to)`, newest first.
    async fn invoices_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Invoice>>;

    // -------------------------------------------------------------------------
    // Payments
    // -------------------------------------------------------------------------

    /// Lists payments against the given invoice, oldest first.
    async fn payments_for_invoice(&self, invoice_id: &str) -> StoreResult<Vec<Payment>>;

    // -------------------------------------------------------------------------
    // Transactional Multi-Writes
    // -------------------------------------------------------------------------

    /// Commits an invoice creation: invoice + items + stock decrements +
    /// customer balance increment, all-or-nothing.
    async fn commit_invoice(&self, commit: &InvoiceCommit) -> StoreResult<()>;

    /// Commits a payment receipt: payment append + revision-checked invoice
    /// settlement update + customer balance decrement, all-or-nothing.
    async fn commit_payment(&self, commit: &PaymentCommit) -> StoreResult<()>;
}
