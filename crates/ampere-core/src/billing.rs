//! # Billing Module
//!
//! The pure reconciliation arithmetic of the ledger: line-item snapshots,
//! invoice totals, settlement status, payment application, and revenue
//! aggregation. Everything here is a pure function — the orchestration crate
//! feeds these results into transactional commits.
//!
//! ## Reconciliation Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invoice Arithmetic                                   │
//! │                                                                         │
//! │  item.total  = quantity × unit_price        (snapshot at sale time)    │
//! │  subtotal    = Σ item.total                                            │
//! │  tax         = subtotal × tax_rate          (rate in bps, default 0)   │
//! │  total       = subtotal + tax                                          │
//! │  due         = max(0, total − paid)         (never negative)           │
//! │                                                                         │
//! │  status      = paid     if due == 0                                    │
//! │              | partial  if paid > 0                                    │
//! │              | unpaid   otherwise                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ampere_core::billing::{derive_status, remaining_due};
//! use ampere_core::money::Money;
//! use ampere_core::types::InvoiceStatus;
//!
//! let total = Money::from_rupees(700);
//! let paid = Money::from_rupees(300);
//!
//! assert_eq!(remaining_due(total, paid), Money::from_rupees(400));
//! assert_eq!(derive_status(paid, total), InvoiceStatus::Partial);
//! ```

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::types::{Invoice, InvoiceItem, InvoiceStatus, Product, TaxRate};

// =============================================================================
// Line Item Snapshot
// =============================================================================

/// Freezes a product into an invoice line item.
///
/// ## Snapshot Semantics
/// Name, unit, price, and cost are copied **as they exist right now**.
/// Later product edits must never retroactively change historical invoices,
/// and a deleted product leaves its snapshots intact.
pub fn snapshot_item(product: &Product, quantity: i64) -> InvoiceItem {
    let total = product.unit_price().multiply_quantity(quantity);

    InvoiceItem {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        quantity,
        unit: product.unit,
        unit_price_paisa: product.unit_price_paisa,
        unit_cost_paisa: product.unit_cost_paisa,
        total_paisa: total.paisa(),
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Computed money columns of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal at the configured rate.
    pub tax: Money,
    /// `subtotal + tax`.
    pub total: Money,
}

/// Computes subtotal, tax, and total over a set of line items.
///
/// The tax rate is pluggable (basis points). The shop currently configures
/// zero, so `tax` is zero and `total == subtotal`, but the computation always
/// runs through the rate.
pub fn compute_totals(items: &[InvoiceItem], rate: TaxRate) -> InvoiceTotals {
    let subtotal: Money = items.iter().map(InvoiceItem::total).sum();
    let tax = subtotal.calculate_tax(rate);

    InvoiceTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Remaining amount owed on an invoice: `max(0, total − paid)`.
///
/// The floor at zero is authoritative: an overpayment at creation time is
/// change handed back across the counter, never negative debt.
#[inline]
pub fn remaining_due(total: Money, paid: Money) -> Money {
    (total - paid).floor_zero()
}

/// Derives the settlement status from `(paid, total)`.
///
/// This is THE status function — status is never set independently of it.
///
/// ## Truth Table
/// ```text
/// due == 0            → Paid    (includes overpayment at creation)
/// due > 0, paid > 0   → Partial
/// due > 0, paid == 0  → Unpaid
/// ```
pub fn derive_status(paid: Money, total: Money) -> InvoiceStatus {
    let due = remaining_due(total, paid);

    if due.is_zero() {
        InvoiceStatus::Paid
    } else if paid.is_positive() {
        InvoiceStatus::Partial
    } else {
        InvoiceStatus::Unpaid
    }
}

// =============================================================================
// Payment Application
// =============================================================================

/// The new settlement columns of an invoice after a payment lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Cumulative paid after the payment.
    pub new_paid: Money,
    /// Remaining due after the payment.
    pub new_due: Money,
    /// Recomputed status.
    pub new_status: InvoiceStatus,
}

/// Applies a payment amount to an invoice's settlement columns.
///
/// Pure arithmetic — amount validation (> 0, not already settled, not an
/// overpayment) and the transactional write belong to the caller.
pub fn apply_payment(invoice: &Invoice, amount: Money) -> Settlement {
    let new_paid = invoice.paid() + amount;
    let new_due = remaining_due(invoice.total(), new_paid);

    Settlement {
        new_paid,
        new_due,
        new_status: derive_status(new_paid, invoice.total()),
    }
}

// =============================================================================
// Invoice Number
// =============================================================================

/// Derives the human-facing invoice number from the creation instant.
///
/// Format: `INV-` followed by the last six digits of the creation time in
/// milliseconds. Unique in practice for a single counter; uniqueness is not
/// enforced beyond this.
///
/// ## Example
/// ```rust
/// use ampere_core::billing::invoice_number;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.timestamp_millis_opt(1_726_042_117_358).unwrap();
/// assert_eq!(invoice_number(at), "INV-117358");
/// ```
pub fn invoice_number(at: DateTime<Utc>) -> String {
    format!("INV-{:06}", at.timestamp_millis() % 1_000_000)
}

// =============================================================================
// Aggregation
// =============================================================================

/// Aggregate revenue figures over a set of invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueTotals {
    /// Number of invoices aggregated.
    pub invoice_count: usize,
    /// Sum of invoice totals (billed, whether or not collected).
    pub revenue: Money,
    /// Sum of paid amounts (actually collected).
    pub received: Money,
    /// Sum of line costs (`quantity × unit_cost` over every item).
    pub cost: Money,
    /// `revenue − cost`.
    pub profit: Money,
}

/// Aggregates revenue, received, cost, and profit over invoices.
///
/// Lines whose product carried no cost at sale time contribute zero cost.
/// Role gating (owner-only cost/profit) is the report layer's concern; the
/// arithmetic here is unconditional.
pub fn summarize_revenue(invoices: &[Invoice]) -> RevenueTotals {
    let revenue: Money = invoices.iter().map(Invoice::total).sum();
    let received: Money = invoices.iter().map(Invoice::paid).sum();
    let cost: Money = invoices
        .iter()
        .flat_map(|inv| inv.items.iter())
        .map(InvoiceItem::cost_total)
        .sum();

    RevenueTotals {
        invoice_count: invoices.len(),
        revenue,
        received,
        cost,
        profit: revenue - cost,
    }
}

/// Sums the outstanding due across a customer's invoices.
///
/// This is the from-scratch side of the balance audit: the incremental
/// `Customer.total_due` must equal this sum over all of the customer's
/// invoices with `due > 0`. Any difference is drift.
pub fn outstanding_total(invoices: &[Invoice]) -> Money {
    invoices
        .iter()
        .map(Invoice::due)
        .filter(Money::is_positive)
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethod, Unit};
    use chrono::TimeZone;

    fn led_bulb(stock: i64) -> Product {
        Product {
            id: "p-led".to_string(),
            name: "LED Bulb 12W".to_string(),
            category: "Bulbs".to_string(),
            unit: Unit::Piece,
            unit_price_paisa: 35_000,
            unit_cost_paisa: Some(22_000),
            stock,
            watts: Some("12W".to_string()),
            created_at: Utc::now(),
        }
    }

    fn invoice_with(total: Money, paid: Money) -> Invoice {
        let due = remaining_due(total, paid);
        Invoice {
            id: "inv-1".to_string(),
            invoice_number: "INV-000001".to_string(),
            customer_id: None,
            customer_name: "Walk-in Customer".to_string(),
            customer_phone: None,
            items: vec![],
            subtotal_paisa: total.paisa(),
            tax_paisa: 0,
            total_paisa: total.paisa(),
            paid_paisa: paid.paisa(),
            due_paisa: due.paisa(),
            payment_method: PaymentMethod::Cash,
            status: derive_status(paid, total),
            created_at: Utc::now(),
            created_by: "counter-1".to_string(),
            revision: 0,
        }
    }

    #[test]
    fn test_snapshot_item_freezes_product() {
        let product = led_bulb(10);
        let item = snapshot_item(&product, 2);

        assert_eq!(item.product_name, "LED Bulb 12W");
        assert_eq!(item.unit_price_paisa, 35_000);
        assert_eq!(item.unit_cost_paisa, Some(22_000));
        assert_eq!(item.total_paisa, 70_000);
    }

    #[test]
    fn test_compute_totals_zero_rate() {
        let product = led_bulb(10);
        let items = vec![snapshot_item(&product, 2)];

        let totals = compute_totals(&items, TaxRate::zero());

        assert_eq!(totals.subtotal, Money::from_rupees(700));
        assert!(totals.tax.is_zero());
        assert_eq!(totals.total, Money::from_rupees(700));
    }

    #[test]
    fn test_compute_totals_with_rate() {
        let product = led_bulb(10);
        let items = vec![snapshot_item(&product, 2)];

        // 17% GST on Rs 700 = Rs 119
        let totals = compute_totals(&items, TaxRate::from_bps(1_700));

        assert_eq!(totals.tax, Money::from_rupees(119));
        assert_eq!(totals.total, Money::from_rupees(819));
    }

    #[test]
    fn test_derive_status_truth_table() {
        let total = Money::from_rupees(700);

        assert_eq!(derive_status(Money::zero(), total), InvoiceStatus::Unpaid);
        assert_eq!(
            derive_status(Money::from_rupees(300), total),
            InvoiceStatus::Partial
        );
        assert_eq!(derive_status(total, total), InvoiceStatus::Paid);
        // Overpayment at creation still derives Paid: due floors at zero
        assert_eq!(
            derive_status(Money::from_rupees(900), total),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_zero_total_is_paid() {
        assert_eq!(
            derive_status(Money::zero(), Money::zero()),
            InvoiceStatus::Paid
        );
    }

    #[test]
    fn test_remaining_due_floors_at_zero() {
        let total = Money::from_rupees(700);
        assert_eq!(
            remaining_due(total, Money::from_rupees(300)),
            Money::from_rupees(400)
        );
        assert!(remaining_due(total, Money::from_rupees(900)).is_zero());
    }

    #[test]
    fn test_apply_payment_partial_then_settled() {
        let invoice = invoice_with(Money::from_rupees(700), Money::from_rupees(300));

        let settled = apply_payment(&invoice, Money::from_rupees(400));

        assert_eq!(settled.new_paid, Money::from_rupees(700));
        assert!(settled.new_due.is_zero());
        assert_eq!(settled.new_status, InvoiceStatus::Paid);
    }

    #[test]
    fn test_apply_payment_stays_partial() {
        let invoice = invoice_with(Money::from_rupees(1_000), Money::zero());

        let settled = apply_payment(&invoice, Money::from_rupees(250));

        assert_eq!(settled.new_paid, Money::from_rupees(250));
        assert_eq!(settled.new_due, Money::from_rupees(750));
        assert_eq!(settled.new_status, InvoiceStatus::Partial);
    }

    #[test]
    fn test_invoice_number_last_six_digits() {
        let at = Utc.timestamp_millis_opt(1_726_042_117_358).unwrap();
        assert_eq!(invoice_number(at), "INV-117358");

        // Leading zeros preserved
        let at = Utc.timestamp_millis_opt(1_726_042_000_042).unwrap();
        assert_eq!(invoice_number(at), "INV-000042");
    }

    #[test]
    fn test_summarize_revenue() {
        let product = led_bulb(100);
        let items = vec![snapshot_item(&product, 2)];
        let mut inv = invoice_with(Money::from_rupees(700), Money::from_rupees(300));
        inv.items = items;

        let totals = summarize_revenue(&[inv]);

        assert_eq!(totals.invoice_count, 1);
        assert_eq!(totals.revenue, Money::from_rupees(700));
        assert_eq!(totals.received, Money::from_rupees(300));
        // cost = 2 × Rs 220
        assert_eq!(totals.cost, Money::from_rupees(440));
        assert_eq!(totals.profit, Money::from_rupees(260));
    }

    #[test]
    fn test_outstanding_total_skips_settled() {
        let open = invoice_with(Money::from_rupees(700), Money::from_rupees(300));
        let settled = invoice_with(Money::from_rupees(500), Money::from_rupees(500));

        let outstanding = outstanding_total(&[open, settled]);

        assert_eq!(outstanding, Money::from_rupees(400));
    }
}
