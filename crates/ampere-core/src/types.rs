//! # Domain Types
//!
//! Core domain types used throughout Ampere POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Invoice      │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  invoice_number │   │  invoice_id     │       │
//! │  │  stock >= 0     │   │  status         │   │  amount > 0     │       │
//! │  │  price_paisa    │   │  total_paisa    │   │  immutable      │       │
//! │  └─────────────────┘   └────────┬────────┘   └─────────────────┘       │
//! │                                 │ owns                                  │
//! │  ┌─────────────────┐   ┌────────▼────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │   InvoiceItem   │   │  InvoiceStatus  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  snapshot of    │   │  Unpaid         │       │
//! │  │  phone (lookup) │   │  product at     │   │  Partial        │       │
//! │  │  total_due      │   │  sale time      │   │  Paid           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An [`InvoiceItem`] freezes the product's name, unit, price, and cost at
//! the moment of sale. Later edits to the product must never change a
//! historical invoice, and a deleted product leaves its snapshots intact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1700 bps = 17% (e.g., Pakistani GST)
///
/// The shop currently bills tax-free, so the configured rate is zero, but
/// every total is computed through the rate so a future non-zero rate is a
/// configuration change rather than a code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Unit of Sale
// =============================================================================

/// How a product is measured and sold.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Discrete items (bulbs, switches).
    Piece,
    /// Sold by length (loose wire).
    Meter,
    /// Pre-bundled packs (a 90m wire coil).
    Pack,
}

impl Unit {
    /// Returns the lowercase wire/storage name of the unit.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Unit::Piece => "piece",
            Unit::Meter => "meter",
            Unit::Pack => "pack",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a payment was tendered.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Easypaisa mobile wallet.
    Easypay,
    /// JazzCash mobile wallet.
    Jazzcash,
    /// Direct bank transfer.
    Bank,
}

impl PaymentMethod {
    /// Returns the lowercase wire/storage name of the method.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Easypay => "easypay",
            PaymentMethod::Jazzcash => "jazzcash",
            PaymentMethod::Bank => "bank",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Invoice Status
// =============================================================================

/// Settlement status of an invoice.
///
/// ## State Machine
/// ```text
/// unpaid ──payment──► partial ──payment──► paid (terminal)
///    │                                       ▲
///    └────────── full payment ───────────────┘
/// ```
///
/// The status is ALWAYS a pure function of `(paid, total)` — it is derived
/// by [`crate::billing::derive_status`] and never set independently.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Nothing received (`paid == 0`, `due == total`).
    Unpaid,
    /// Something received, something still owed (`0 < due < total`).
    Partial,
    /// Fully settled (`due == 0`). Terminal: no further payments accepted.
    Paid,
}

impl InvoiceStatus {
    /// Returns the lowercase wire/storage name of the status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Unpaid => "unpaid",
            InvoiceStatus::Partial => "partial",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unpaid
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Actor
// =============================================================================

/// Role of the operator performing an action.
///
/// The role gates visibility of cost and profit figures: only the shop
/// owner sees `unit_cost_paisa` and profit in revenue reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Shop owner: full visibility including cost/profit.
    Owner,
    /// Regular counter operator.
    Operator,
}

/// The identity performing a ledger operation.
///
/// Supplied explicitly by the caller on every call — the engine never reads
/// an ambient "current user". The identity provider that authenticates this
/// actor is an external collaborator; the string is trusted as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Operator name recorded as `created_by` on invoices and payments.
    pub name: String,
    /// Role flag gating cost/profit visibility.
    pub role: Role,
}

impl Actor {
    /// Creates an owner actor.
    pub fn owner(name: impl Into<String>) -> Self {
        Actor {
            name: name.into(),
            role: Role::Owner,
        }
    }

    /// Creates a regular operator actor.
    pub fn operator(name: impl Into<String>) -> Self {
        Actor {
            name: name.into(),
            role: Role::Operator,
        }
    }

    /// Checks whether this actor may see cost and profit figures.
    #[inline]
    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the shop catalog.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the billing screen and on invoices.
    pub name: String,

    /// Free-text category ("Bulbs", "Wires", "Switches").
    pub category: String,

    /// How this product is measured and sold.
    pub unit: Unit,

    /// Selling price per unit, in paisa.
    pub unit_price_paisa: i64,

    /// Cost per unit in paisa. Owner-only visibility; feeds profit figures.
    pub unit_cost_paisa: Option<i64>,

    /// Current stock level. Never negative: every mutation is guarded.
    pub stock: i64,

    /// Wattage marking, free text ("12W"). Only electrical items carry one.
    pub watts: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paisa(self.unit_price_paisa)
    }

    /// Returns the cost as Money, if recorded.
    #[inline]
    pub fn unit_cost(&self) -> Option<Money> {
        self.unit_cost_paisa.map(Money::from_paisa)
    }

    /// Checks if the requested quantity can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer with a running balance owed to the shop.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Customer name.
    pub name: String,

    /// Phone number — the business lookup key for repeat customers.
    pub phone: String,

    /// Optional email address.
    pub email: Option<String>,

    /// Optional street address.
    pub address: Option<String>,

    /// Running balance owed to the shop, in paisa.
    ///
    /// Maintained INCREMENTALLY by the ledger: invoice creation adds the
    /// invoice's due, payment receipt subtracts the payment amount. It is
    /// never recomputed in place; drift against a from-scratch recomputation
    /// is detectable via the balance audit.
    pub total_due_paisa: i64,

    /// When the customer record was created.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the running balance as Money.
    #[inline]
    pub fn total_due(&self) -> Money {
        Money::from_paisa(self.total_due_paisa)
    }
}

// =============================================================================
// Invoice Item
// =============================================================================

/// A line item on an invoice.
///
/// Uses the snapshot pattern: product name, unit, price, and cost are copied
/// at invoice time and never re-joined to the live product. Owned by its
/// invoice; not independently addressable.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// The product this line was sold from. A reference only — the product
    /// may be edited or deleted later without touching this snapshot.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Quantity sold (>= 1).
    pub quantity: i64,

    /// Unit of sale at time of sale (frozen).
    pub unit: Unit,

    /// Unit selling price in paisa at time of sale (frozen).
    pub unit_price_paisa: i64,

    /// Unit cost in paisa at time of sale (frozen, owner-only).
    pub unit_cost_paisa: Option<i64>,

    /// Line total: `quantity × unit_price_paisa`.
    pub total_paisa: i64,
}

impl InvoiceItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_paisa(self.unit_price_paisa)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paisa(self.total_paisa)
    }

    /// Returns the line's total cost (`quantity × unit_cost`), zero when no
    /// cost was recorded on the product at sale time.
    #[inline]
    pub fn cost_total(&self) -> Money {
        Money::from_paisa(self.unit_cost_paisa.unwrap_or(0) * self.quantity)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A sale invoice with its line items.
///
/// Created once, atomically with its items and side effects. Afterwards only
/// `paid_paisa`, `due_paisa`, `status`, and `revision` change, exclusively
/// through payment receipt. Never deleted in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-facing number derived from the creation time (`INV-042117`).
    /// Unique in practice; uniqueness is not enforced beyond time-based
    /// generation.
    pub invoice_number: String,

    /// Customer reference. `None` for walk-in sales, whose due amounts are
    /// tracked only on the invoice itself.
    pub customer_id: Option<String>,

    /// Customer display name (walk-in sales carry an inline name).
    pub customer_name: String,

    /// Customer phone captured at invoice time.
    pub customer_phone: Option<String>,

    /// Ordered, non-empty line items. Owned by this invoice.
    pub items: Vec<InvoiceItem>,

    /// Sum of line totals, in paisa.
    pub subtotal_paisa: i64,

    /// Tax on the subtotal at the configured rate (currently zero).
    pub tax_paisa: i64,

    /// `subtotal + tax`, in paisa.
    pub total_paisa: i64,

    /// Cumulative amount received, in paisa. Monotonically non-decreasing:
    /// there is no refund or payment-reversal operation.
    pub paid_paisa: i64,

    /// Remaining amount owed: `max(0, total - paid)`. Never negative.
    pub due_paisa: i64,

    /// Payment method recorded at creation time.
    pub payment_method: PaymentMethod,

    /// Settlement status — a pure function of `(paid, total)`.
    pub status: InvoiceStatus,

    /// When the invoice was created.
    pub created_at: DateTime<Utc>,

    /// Operator who created the invoice.
    pub created_by: String,

    /// Optimistic-concurrency counter, bumped on every settlement update.
    /// Two racing payments can never both apply against the same revision.
    pub revision: i64,
}

impl Invoice {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_paisa(self.subtotal_paisa)
    }

    /// Returns the tax as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_paisa(self.tax_paisa)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_paisa(self.total_paisa)
    }

    /// Returns the cumulative paid amount as Money.
    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_paisa(self.paid_paisa)
    }

    /// Returns the remaining due as Money.
    #[inline]
    pub fn due(&self) -> Money {
        Money::from_paisa(self.due_paisa)
    }

    /// Checks whether the invoice is fully settled.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.due_paisa == 0
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A payment received against an invoice.
///
/// Immutable once created — an append-only journal entry. The sum of an
/// invoice's payments always equals that invoice's cumulative `paid`.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The invoice this payment settles (exactly one).
    pub invoice_id: String,

    /// Customer, denormalized from the invoice at payment time.
    pub customer_id: Option<String>,

    /// Amount received, in paisa (> 0).
    pub amount_paisa: i64,

    /// How the payment was tendered.
    pub method: PaymentMethod,

    /// When the payment was received.
    pub created_at: DateTime<Utc>,

    /// Operator who received the payment.
    pub created_by: String,
}

impl Payment {
    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_paisa(self.amount_paisa)
    }
}

// =============================================================================
// Input Drafts
// =============================================================================

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub unit: Unit,
    pub unit_price_paisa: i64,
    pub unit_cost_paisa: Option<i64>,
    pub stock: i64,
    pub watts: Option<String>,
}

/// Input for creating a customer. The running balance always starts at zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// One cart entry submitted by the billing screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: i64,
}

/// Who an invoice is billed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerRef {
    /// An existing customer; due amounts roll up into their balance.
    Existing(String),
    /// A walk-in sale with inline contact details; due is tracked only on
    /// the invoice.
    WalkIn {
        name: Option<String>,
        phone: Option<String>,
    },
}

/// Input for creating an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Non-empty cart of `(product, quantity)` lines.
    pub lines: Vec<CartLine>,
    /// Existing customer or inline walk-in details.
    pub customer: CustomerRef,
    /// Amount received at the counter when the invoice was rung up (>= 0).
    pub paid_paisa: i64,
    /// How the creation-time payment was tendered.
    pub method: PaymentMethod,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1700);
        assert_eq!(rate.bps(), 1700);
        assert!((rate.percentage() - 17.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_default_is_zero() {
        assert!(TaxRate::default().is_zero());
    }

    #[test]
    fn test_invoice_status_default() {
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(Unit::Meter.as_str(), "meter");
        assert_eq!(PaymentMethod::Jazzcash.as_str(), "jazzcash");
        assert_eq!(InvoiceStatus::Partial.as_str(), "partial");
    }

    #[test]
    fn test_actor_roles() {
        assert!(Actor::owner("malik").is_owner());
        assert!(!Actor::operator("counter-1").is_owner());
    }

    #[test]
    fn test_product_can_sell() {
        let product = Product {
            id: "p1".to_string(),
            name: "LED Bulb 12W".to_string(),
            category: "Bulbs".to_string(),
            unit: Unit::Piece,
            unit_price_paisa: 35_000,
            unit_cost_paisa: Some(22_000),
            stock: 10,
            watts: Some("12W".to_string()),
            created_at: Utc::now(),
        };

        assert!(product.can_sell(10));
        assert!(!product.can_sell(11));
    }

    #[test]
    fn test_item_cost_total_defaults_to_zero() {
        let item = InvoiceItem {
            product_id: "p1".to_string(),
            product_name: "Switch 2-Gang".to_string(),
            quantity: 4,
            unit: Unit::Piece,
            unit_price_paisa: 28_000,
            unit_cost_paisa: None,
            total_paisa: 112_000,
        };

        assert!(item.cost_total().is_zero());
        assert_eq!(item.total(), Money::from_rupees(1_120));
    }
}
