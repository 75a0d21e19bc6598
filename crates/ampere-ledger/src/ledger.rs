//! # Ledger Engine
//!
//! The orchestration core: invoice creation and payment receipt, plus the
//! catalog and customer operations that feed them.
//!
//! ## Invoice Creation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create_invoice(draft, actor)                                           │
//! │                                                                         │
//! │  1. Validate cart, quantities, paid amount   ← nothing written yet     │
//! │  2. Resolve customer (existing id / walk-in)                           │
//! │  3. Resolve products, snapshot line items    ← prices frozen NOW       │
//! │  4. subtotal / tax / total / due / status    ← pure arithmetic         │
//! │  5. ONE atomic commit:                                                 │
//! │       invoice + items                                                  │
//! │       stock -= qty per line (re-guarded)                               │
//! │       customer.total_due += due (credit sale to known customer)        │
//! │  6. Return the persisted invoice                                       │
//! │                                                                         │
//! │  Any failure in step 5 leaves ZERO observable change.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Payment Receipt Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_payment(invoice_id, amount, method, actor)                      │
//! │                                                                         │
//! │  loop (bounded retries):                                               │
//! │    1. Load invoice                                                     │
//! │    2. Reject if already settled                                        │
//! │    3. Reject if amount exceeds remaining due                           │
//! │    4. Compute new paid/due/status              ← pure arithmetic       │
//! │    5. ONE atomic commit:                                               │
//! │         payment appended (immutable journal)                           │
//! │         invoice settled columns, IF revision unchanged                 │
//! │         customer.total_due -= amount                                   │
//! │    6. Revision moved? reload and retry; else return the payment        │
//! │                                                                         │
//! │  Two concurrent payments of 100 against a 500/0 invoice end at        │
//! │  paid = 200: the loser of the revision race retries on fresh numbers.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use ampere_core::billing::{
    apply_payment, compute_totals, derive_status, invoice_number, remaining_due, snapshot_item,
};
use ampere_core::validation::{
    validate_cart, validate_customer_name, validate_paid_amount, validate_payment_amount,
    validate_phone, validate_price_paisa, validate_product_name, validate_stock,
    validate_tax_rate_bps, validate_uuid,
};
use ampere_core::{
    Actor, Customer, CustomerDraft, CustomerRef, Invoice, InvoiceDraft, InvoiceItem,
    InvoiceStatus, Money, Payment, PaymentMethod, Product, ProductDraft, TaxRate,
    WALK_IN_CUSTOMER,
};
use ampere_db::{CustomerDelta, InvoiceCommit, PaymentCommit, StockDecrement, Store, StoreError};

use crate::error::{LedgerError, LedgerResult};
use crate::report::{BalanceAudit, RevenueReport};

/// How many times a settlement is retried when a concurrent payment wins the
/// revision race. Retries recompute from a fresh read, so each attempt can
/// only lose to an invoice that genuinely changed.
pub const MAX_SETTLEMENT_RETRIES: usize = 3;

// =============================================================================
// Configuration
// =============================================================================

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerConfig {
    /// Tax rate applied to every invoice subtotal. Defaults to zero; the
    /// shop currently bills tax-free.
    pub tax_rate: TaxRate,
}

// =============================================================================
// Ledger
// =============================================================================

/// The invoice/payment reconciliation engine.
///
/// Generic over the [`Store`] trait — SQLite and the in-memory backend are
/// interchangeable underneath. Every operation takes its acting identity
/// explicitly; the engine never reads ambient session state.
#[derive(Debug)]
pub struct Ledger<S: Store> {
    store: S,
    config: LedgerConfig,
}

impl<S: Store> Ledger<S> {
    /// Creates an engine with default configuration (zero tax).
    pub fn new(store: S) -> Self {
        Ledger {
            store,
            config: LedgerConfig::default(),
        }
    }

    /// Creates an engine with explicit configuration.
    pub fn with_config(store: S, config: LedgerConfig) -> LedgerResult<Self> {
        validate_tax_rate_bps(config.tax_rate.bps())?;
        Ok(Ledger { store, config })
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Catalog
    // -------------------------------------------------------------------------

    /// Adds a product to the catalog.
    pub async fn add_product(&self, draft: ProductDraft) -> LedgerResult<Product> {
        validate_product_name(&draft.name)?;
        validate_price_paisa(draft.unit_price_paisa)?;
        if let Some(cost) = draft.unit_cost_paisa {
            validate_price_paisa(cost)?;
        }
        validate_stock(draft.stock)?;

        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            category: draft.category.trim().to_string(),
            unit: draft.unit,
            unit_price_paisa: draft.unit_price_paisa,
            unit_cost_paisa: draft.unit_cost_paisa,
            stock: draft.stock,
            watts: draft.watts,
            created_at: Utc::now(),
        };

        self.store.insert_product(&product).await?;

        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Updates a product's catalog fields. Stock is not written here — use
    /// [`Ledger::adjust_stock`], which applies the non-negative guard.
    pub async fn update_product(&self, product: &Product) -> LedgerResult<()> {
        validate_uuid(&product.id)?;
        validate_product_name(&product.name)?;
        validate_price_paisa(product.unit_price_paisa)?;
        if let Some(cost) = product.unit_cost_paisa {
            validate_price_paisa(cost)?;
        }

        self.store.update_product(product).await?;

        info!(id = %product.id, "Product updated");
        Ok(())
    }

    /// Deletes a product. Historical invoices keep their snapshots of it.
    pub async fn delete_product(&self, id: &str) -> LedgerResult<()> {
        validate_uuid(id)?;

        self.store.delete_product(id).await?;
        info!(id = %id, "Product deleted");
        Ok(())
    }

    /// Gets a product by id.
    pub async fn product(&self, id: &str) -> LedgerResult<Product> {
        validate_uuid(id)?;

        self.store
            .product(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Product", id))
    }

    /// Lists the catalog, newest first.
    pub async fn products(&self) -> LedgerResult<Vec<Product>> {
        Ok(self.store.products().await?)
    }

    /// Applies a signed stock delta (catalog corrections, restocking) and
    /// returns the new level. Rejected before persisting when the result
    /// would be negative.
    pub async fn adjust_stock(&self, product_id: &str, delta: i64) -> LedgerResult<i64> {
        validate_uuid(product_id)?;

        let stock = self.store.adjust_stock(product_id, delta).await?;
        info!(product_id = %product_id, delta = %delta, stock = %stock, "Stock adjusted");
        Ok(stock)
    }

    // -------------------------------------------------------------------------
    // Customer Ledger
    // -------------------------------------------------------------------------

    /// Adds a customer. The running balance always starts at zero.
    pub async fn add_customer(&self, draft: CustomerDraft) -> LedgerResult<Customer> {
        validate_customer_name(&draft.name)?;
        validate_phone(&draft.phone)?;

        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            email: draft.email,
            address: draft.address,
            total_due_paisa: 0,
            created_at: Utc::now(),
        };

        self.store.insert_customer(&customer).await?;

        info!(id = %customer.id, name = %customer.name, "Customer added");
        Ok(customer)
    }

    /// Updates a customer's contact fields. The running balance is not
    /// written here — it moves only with invoices and payments.
    pub async fn update_customer(&self, customer: &Customer) -> LedgerResult<()> {
        validate_uuid(&customer.id)?;
        validate_customer_name(&customer.name)?;
        validate_phone(&customer.phone)?;

        self.store.update_customer(customer).await?;

        info!(id = %customer.id, "Customer updated");
        Ok(())
    }

    /// Gets a customer by id.
    pub async fn customer(&self, id: &str) -> LedgerResult<Customer> {
        validate_uuid(id)?;

        self.store
            .customer(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Customer", id))
    }

    /// Lists all customers, newest first.
    pub async fn customers(&self) -> LedgerResult<Vec<Customer>> {
        Ok(self.store.customers().await?)
    }

    /// Looks up a customer by phone number.
    pub async fn customer_by_phone(&self, phone: &str) -> LedgerResult<Option<Customer>> {
        Ok(self.store.customer_by_phone(phone).await?)
    }

    /// Applies a signed balance delta (manual correction) and returns the
    /// new balance in paisa. Deliberately unfloored — invoice creation and
    /// payment receipt keep the balance consistent on their own, but a
    /// manual correction may take it negative.
    pub async fn adjust_due(&self, customer_id: &str, delta_paisa: i64) -> LedgerResult<i64> {
        validate_uuid(customer_id)?;

        let balance = self.store.adjust_due(customer_id, delta_paisa).await?;
        info!(customer_id = %customer_id, delta = %delta_paisa, balance = %balance, "Customer balance adjusted");
        Ok(balance)
    }

    // -------------------------------------------------------------------------
    // Invoice Creation
    // -------------------------------------------------------------------------

    /// Creates an invoice from a cart, atomically with its side effects.
    ///
    /// Snapshot semantics: each line freezes the product's name, unit,
    /// price, and cost as they exist at this moment. Stock decrements and
    /// the customer balance increment commit together with the invoice or
    /// not at all.
    pub async fn create_invoice(
        &self,
        draft: InvoiceDraft,
        actor: &Actor,
    ) -> LedgerResult<Invoice> {
        debug!(lines = draft.lines.len(), paid = draft.paid_paisa, "create_invoice");

        validate_cart(&draft.lines)?;
        validate_paid_amount(draft.paid_paisa)?;

        // Resolve the customer reference before touching products, so an
        // unknown id fails fast.
        let (customer_id, customer_name, customer_phone) = match &draft.customer {
            CustomerRef::Existing(id) => {
                let customer = self.customer(id).await?;
                (Some(customer.id), customer.name, Some(customer.phone))
            }
            CustomerRef::WalkIn { name, phone } => {
                let name = name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(WALK_IN_CUSTOMER)
                    .to_string();
                (None, name, phone.clone())
            }
        };

        // Snapshot every line. The stock pre-check gives a precise early
        // error; the commit re-guards under the transaction, so a racing
        // sale still cannot overdraw.
        let mut items: Vec<InvoiceItem> = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let product = self.product(&line.product_id).await?;

            if !product.can_sell(line.quantity) {
                return Err(LedgerError::InsufficientStock {
                    product: product.id,
                    available: product.stock,
                    requested: line.quantity,
                });
            }

            items.push(snapshot_item(&product, line.quantity));
        }

        let totals = compute_totals(&items, self.config.tax_rate);
        let paid = Money::from_paisa(draft.paid_paisa);
        let due = remaining_due(totals.total, paid);
        let status = derive_status(paid, totals.total);
        let now = Utc::now();

        let invoice = Invoice {
            id: Uuid::new_v4().to_string(),
            invoice_number: invoice_number(now),
            customer_id: customer_id.clone(),
            customer_name,
            customer_phone,
            items,
            subtotal_paisa: totals.subtotal.paisa(),
            tax_paisa: totals.tax.paisa(),
            total_paisa: totals.total.paisa(),
            paid_paisa: draft.paid_paisa,
            due_paisa: due.paisa(),
            payment_method: draft.method,
            status,
            created_at: now,
            created_by: actor.name.clone(),
            revision: 0,
        };

        let commit = InvoiceCommit {
            invoice: invoice.clone(),
            stock_decrements: draft
                .lines
                .iter()
                .map(|line| StockDecrement {
                    product_id: line.product_id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            // Walk-ins carry their due only on the invoice itself; a settled
            // sale moves no balance either way.
            customer_delta: customer_id.filter(|_| due.is_positive()).map(|id| {
                CustomerDelta {
                    customer_id: id,
                    delta_paisa: due.paisa(),
                }
            }),
        };

        self.store.commit_invoice(&commit).await?;

        info!(
            id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            total = %invoice.total(),
            due = %invoice.due(),
            status = %invoice.status,
            created_by = %actor.name,
            "Invoice created"
        );

        Ok(invoice)
    }

    // -------------------------------------------------------------------------
    // Payment Receipt
    // -------------------------------------------------------------------------

    /// Records a payment against an invoice and settles it atomically.
    ///
    /// Policy decisions, documented here and in the tests:
    /// - A payment against an already-settled invoice is rejected
    ///   ([`LedgerError::AlreadySettled`]).
    /// - A payment exceeding the remaining due is rejected
    ///   ([`LedgerError::Overpayment`]) — excess cash is change at the
    ///   counter, never a stored credit.
    /// - Duplicate submissions are NOT deduplicated: re-sending the same
    ///   logical payment double-applies. Callers needing exactly-once must
    ///   deduplicate on their side.
    pub async fn record_payment(
        &self,
        invoice_id: &str,
        amount_paisa: i64,
        method: PaymentMethod,
        actor: &Actor,
    ) -> LedgerResult<Payment> {
        debug!(invoice_id = %invoice_id, amount = %amount_paisa, "record_payment");

        validate_uuid(invoice_id)?;
        validate_payment_amount(amount_paisa)?;
        let amount = Money::from_paisa(amount_paisa);

        for attempt in 0..MAX_SETTLEMENT_RETRIES {
            let invoice = self
                .store
                .invoice(invoice_id)
                .await?
                .ok_or_else(|| LedgerError::not_found("Invoice", invoice_id))?;

            if invoice.is_settled() {
                return Err(LedgerError::AlreadySettled {
                    invoice_id: invoice_id.to_string(),
                });
            }

            if amount > invoice.due() {
                return Err(LedgerError::Overpayment {
                    invoice_id: invoice_id.to_string(),
                    amount,
                    remaining: invoice.due(),
                });
            }

            let settlement = apply_payment(&invoice, amount);

            let payment = Payment {
                id: Uuid::new_v4().to_string(),
                invoice_id: invoice_id.to_string(),
                customer_id: invoice.customer_id.clone(),
                amount_paisa,
                method,
                created_at: Utc::now(),
                created_by: actor.name.clone(),
            };

            let commit = PaymentCommit {
                payment: payment.clone(),
                expected_revision: invoice.revision,
                new_paid_paisa: settlement.new_paid.paisa(),
                new_due_paisa: settlement.new_due.paisa(),
                new_status: settlement.new_status,
                customer_delta: invoice.customer_id.clone().map(|customer_id| {
                    CustomerDelta {
                        customer_id,
                        delta_paisa: -amount_paisa,
                    }
                }),
            };

            match self.store.commit_payment(&commit).await {
                Ok(()) => {
                    info!(
                        invoice_id = %invoice_id,
                        payment_id = %payment.id,
                        amount = %amount,
                        new_due = %settlement.new_due,
                        status = %settlement.new_status,
                        created_by = %actor.name,
                        "Payment recorded"
                    );
                    return Ok(payment);
                }
                // A concurrent settlement bumped the revision first. Reload
                // and recompute against the fresh numbers.
                Err(StoreError::Conflict { .. }) => {
                    debug!(invoice_id = %invoice_id, attempt, "Settlement conflict, retrying");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(LedgerError::Conflict {
            entity: "Invoice".to_string(),
            id: invoice_id.to_string(),
        })
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Gets an invoice with its items.
    pub async fn invoice(&self, id: &str) -> LedgerResult<Invoice> {
        validate_uuid(id)?;

        self.store
            .invoice(id)
            .await?
            .ok_or_else(|| LedgerError::not_found("Invoice", id))
    }

    /// Lists all invoices, newest first.
    pub async fn invoices(&self) -> LedgerResult<Vec<Invoice>> {
        Ok(self.store.invoices().await?)
    }

    /// Lists invoices still owing money (partial + unpaid), newest first.
    pub async fn outstanding_invoices(&self) -> LedgerResult<Vec<Invoice>> {
        Ok(self
            .store
            .invoices_with_status(&[InvoiceStatus::Partial, InvoiceStatus::Unpaid])
            .await?)
    }

    /// Lists a customer's invoices, newest first.
    pub async fn invoices_for_customer(&self, customer_id: &str) -> LedgerResult<Vec<Invoice>> {
        validate_uuid(customer_id)?;
        Ok(self.store.invoices_for_customer(customer_id).await?)
    }

    /// Lists the payment journal of an invoice, oldest first.
    pub async fn payments_for_invoice(&self, invoice_id: &str) -> LedgerResult<Vec<Payment>> {
        validate_uuid(invoice_id)?;
        Ok(self.store.payments_for_invoice(invoice_id).await?)
    }

    // -------------------------------------------------------------------------
    // Reporting
    // -------------------------------------------------------------------------

    /// Builds the revenue report over invoices created inside `[from, to)`.
    ///
    /// Cost and profit are owner-gated: a non-owner actor receives `None`
    /// for both, never zeroes that could be mistaken for real figures.
    pub async fn revenue_report(
        &self,
        from: chrono::DateTime<Utc>,
        to: chrono::DateTime<Utc>,
        actor: &Actor,
    ) -> LedgerResult<RevenueReport> {
        let invoices = self.store.invoices_created_between(from, to).await?;
        Ok(RevenueReport::build(from, to, &invoices, actor))
    }

    /// Audits a customer's running balance against a from-scratch
    /// recomputation over their invoices. Non-zero drift means the
    /// incremental bookkeeping and reality have diverged.
    pub async fn audit_customer_balance(&self, customer_id: &str) -> LedgerResult<BalanceAudit> {
        let customer = self.customer(customer_id).await?;
        let invoices = self.store.invoices_for_customer(customer_id).await?;
        Ok(BalanceAudit::build(&customer, &invoices))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ampere_core::{CartLine, Unit};
    use ampere_db::MemoryStore;

    fn counter() -> Actor {
        Actor::operator("counter-1")
    }

    async fn ledger() -> Ledger<MemoryStore> {
        Ledger::new(MemoryStore::new())
    }

    async fn seeded_product(ledger: &Ledger<MemoryStore>, stock: i64) -> Product {
        ledger
            .add_product(ProductDraft {
                name: "LED Bulb 12W".to_string(),
                category: "Bulbs".to_string(),
                unit: Unit::Piece,
                unit_price_paisa: 35_000,
                unit_cost_paisa: Some(22_000),
                stock,
                watts: Some("12W".to_string()),
            })
            .await
            .unwrap()
    }

    fn cash_cart(product_id: &str, quantity: i64, paid_paisa: i64) -> InvoiceDraft {
        InvoiceDraft {
            lines: vec![CartLine {
                product_id: product_id.to_string(),
                quantity,
            }],
            customer: CustomerRef::WalkIn {
                name: None,
                phone: None,
            },
            paid_paisa,
            method: PaymentMethod::Cash,
        }
    }

    #[tokio::test]
    async fn test_create_invoice_rejects_empty_cart() {
        let ledger = ledger().await;

        let draft = InvoiceDraft {
            lines: vec![],
            customer: CustomerRef::WalkIn {
                name: None,
                phone: None,
            },
            paid_paisa: 0,
            method: PaymentMethod::Cash,
        };

        let err = ledger.create_invoice(draft, &counter()).await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_invoice_unknown_product() {
        let ledger = ledger().await;

        let unknown = Uuid::new_v4().to_string();
        let err = ledger
            .create_invoice(cash_cart(&unknown, 1, 0), &counter())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_malformed_ids_rejected_before_lookup() {
        let ledger = ledger().await;

        // A malformed id is an input error, not a missing record
        let err = ledger
            .create_invoice(cash_cart("not-a-uuid", 1, 0), &counter())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let err = ledger.invoice("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));

        let err = ledger
            .record_payment("not-a-uuid", 100, PaymentMethod::Cash, &counter())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_walk_in_name_defaults() {
        let ledger = ledger().await;
        let product = seeded_product(&ledger, 10).await;

        let invoice = ledger
            .create_invoice(cash_cart(&product.id, 1, 35_000), &counter())
            .await
            .unwrap();

        assert_eq!(invoice.customer_name, WALK_IN_CUSTOMER);
        assert!(invoice.customer_id.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_survives_product_edit() {
        let ledger = ledger().await;
        let mut product = seeded_product(&ledger, 10).await;

        let invoice = ledger
            .create_invoice(cash_cart(&product.id, 2, 0), &counter())
            .await
            .unwrap();

        // Reprice the product after the sale
        product.unit_price_paisa = 99_000;
        ledger.update_product(&product).await.unwrap();

        let reloaded = ledger.invoice(&invoice.id).await.unwrap();
        assert_eq!(reloaded.items[0].unit_price_paisa, 35_000);
        assert_eq!(reloaded.total_paisa, 70_000);
    }

    #[tokio::test]
    async fn test_record_payment_rejects_non_positive() {
        let ledger = ledger().await;
        let product = seeded_product(&ledger, 10).await;
        let invoice = ledger
            .create_invoice(cash_cart(&product.id, 2, 0), &counter())
            .await
            .unwrap();

        let err = ledger
            .record_payment(&invoice.id, 0, PaymentMethod::Cash, &counter())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[tokio::test]
    async fn test_record_payment_rejects_overpayment() {
        let ledger = ledger().await;
        let product = seeded_product(&ledger, 10).await;
        let invoice = ledger
            .create_invoice(cash_cart(&product.id, 2, 30_000), &counter())
            .await
            .unwrap();

        // Due is Rs 400; Rs 900 must be refused
        let err = ledger
            .record_payment(&invoice.id, 90_000, PaymentMethod::Cash, &counter())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Overpayment { .. }));

        // Invoice untouched
        let reloaded = ledger.invoice(&invoice.id).await.unwrap();
        assert_eq!(reloaded.paid_paisa, 30_000);
    }

    #[tokio::test]
    async fn test_record_payment_rejects_settled_invoice() {
        let ledger = ledger().await;
        let product = seeded_product(&ledger, 10).await;
        let invoice = ledger
            .create_invoice(cash_cart(&product.id, 2, 70_000), &counter())
            .await
            .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Paid);

        let err = ledger
            .record_payment(&invoice.id, 100, PaymentMethod::Cash, &counter())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::AlreadySettled { .. }));
    }

    #[tokio::test]
    async fn test_outstanding_invoices_filter() {
        let ledger = ledger().await;
        let product = seeded_product(&ledger, 100).await;

        ledger
            .create_invoice(cash_cart(&product.id, 1, 35_000), &counter())
            .await
            .unwrap(); // paid
        ledger
            .create_invoice(cash_cart(&product.id, 2, 10_000), &counter())
            .await
            .unwrap(); // partial
        ledger
            .create_invoice(cash_cart(&product.id, 1, 0), &counter())
            .await
            .unwrap(); // unpaid

        let outstanding = ledger.outstanding_invoices().await.unwrap();
        assert_eq!(outstanding.len(), 2);
        assert!(outstanding
            .iter()
            .all(|inv| inv.status != InvoiceStatus::Paid));
    }
}
