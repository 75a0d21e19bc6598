//! # Reporting
//!
//! Revenue reporting and the customer balance audit.
//!
//! ## Owner Gating
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Who Sees What                                          │
//! │                                                                         │
//! │               revenue   received   cost     profit                     │
//! │  Owner          ✓          ✓        ✓         ✓                        │
//! │  Operator       ✓          ✓       None      None                     │
//! │                                                                         │
//! │  Cost figures come from the cost snapshots frozen on invoice items;   │
//! │  a non-owner gets None rather than zeroes that could be mistaken      │
//! │  for real figures.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ampere_core::billing::{outstanding_total, summarize_revenue};
use ampere_core::{Actor, Customer, Invoice, Money};

// =============================================================================
// Revenue Report
// =============================================================================

/// Aggregate figures over invoices created inside a time range.
///
/// A read-only value object — the document renderer may consume it but
/// never mutates ledger state through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueReport {
    /// Range start (inclusive).
    pub from: DateTime<Utc>,
    /// Range end (exclusive).
    pub to: DateTime<Utc>,
    /// Number of invoices in the range.
    pub invoice_count: usize,
    /// Sum of invoice totals (billed, whether or not collected).
    pub revenue: Money,
    /// Sum of paid amounts (actually collected).
    pub received: Money,
    /// Sum of cost snapshots. `None` unless the requesting actor is the
    /// owner.
    pub cost: Option<Money>,
    /// `revenue − cost`. `None` unless the requesting actor is the owner.
    pub profit: Option<Money>,
}

impl RevenueReport {
    /// Builds the report, gating cost/profit on the actor's role.
    pub fn build(
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        invoices: &[Invoice],
        actor: &Actor,
    ) -> Self {
        let totals = summarize_revenue(invoices);

        let (cost, profit) = if actor.is_owner() {
            (Some(totals.cost), Some(totals.profit))
        } else {
            (None, None)
        };

        RevenueReport {
            from,
            to,
            invoice_count: totals.invoice_count,
            revenue: totals.revenue,
            received: totals.received,
            cost,
            profit,
        }
    }
}

// =============================================================================
// Balance Audit
// =============================================================================

/// Result of recomputing a customer's balance from scratch.
///
/// The running `total_due` is maintained incrementally by the ledger;
/// this audit recomputes the same figure by summing `due` over the
/// customer's open invoices and reports any drift between the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceAudit {
    /// The audited customer.
    pub customer_id: String,
    /// The incrementally maintained balance, as stored.
    pub recorded: Money,
    /// The from-scratch recomputation: Σ due over invoices with due > 0.
    pub computed: Money,
    /// `recorded − computed`. Zero when the books are consistent.
    pub drift: Money,
}

impl BalanceAudit {
    /// Builds the audit from a customer record and their invoices.
    pub fn build(customer: &Customer, invoices: &[Invoice]) -> Self {
        let recorded = customer.total_due();
        let computed = outstanding_total(invoices);

        BalanceAudit {
            customer_id: customer.id.clone(),
            recorded,
            computed,
            drift: recorded - computed,
        }
    }

    /// Whether the incremental balance matches the recomputation.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.drift.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
