//! End-to-end ledger flows, run against BOTH backends.
//!
//! Each scenario is written once, generically over the Store trait, and
//! exercised through the SQLite backend (in-memory database) and the
//! MemoryStore. The engine must be indistinguishable across the two.

use ampere_core::{
    Actor, CartLine, CustomerDraft, CustomerRef, InvoiceDraft, InvoiceStatus, PaymentMethod,
    Product, ProductDraft, Unit,
};
use ampere_db::{Database, DbConfig, MemoryStore, Store};
use ampere_ledger::{Ledger, LedgerError};

// =============================================================================
// Fixtures
// =============================================================================

fn counter() -> Actor {
    Actor::operator("counter-1")
}

async fn sqlite_ledger() -> Ledger<ampere_db::SqliteStore> {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    Ledger::new(db.store())
}

fn memory_ledger() -> Ledger<MemoryStore> {
    Ledger::new(MemoryStore::new())
}

async fn led_bulb<S: Store>(ledger: &Ledger<S>, stock: i64) -> Product {
    ledger
        .add_product(ProductDraft {
            name: "LED Bulb".to_string(),
            category: "Bulbs".to_string(),
            unit: Unit::Piece,
            unit_price_paisa: 35_000, // Rs 350
            unit_cost_paisa: Some(22_000),
            stock,
            watts: Some("12W".to_string()),
        })
        .await
        .unwrap()
}

fn walk_in_cart(product_id: &str, quantity: i64, paid_paisa: i64) -> InvoiceDraft {
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

// =============================================================================
// Scenario 1: full payment at creation
// =============================================================================

async fn full_payment_at_creation<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 10).await;

    let invoice = ledger
        .create_invoice(walk_in_cart(&product.id, 2, 70_000), &counter())
        .await
        .unwrap();

    assert_eq!(invoice.subtotal_paisa, 70_000);
    assert_eq!(invoice.tax_paisa, 0);
    assert_eq!(invoice.total_paisa, 70_000);
    assert_eq!(invoice.due_paisa, 0);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert!(invoice.invoice_number.starts_with("INV-"));

    let restocked = ledger.product(&product.id).await.unwrap();
    assert_eq!(restocked.stock, 8);
}

#[tokio::test]
async fn full_payment_at_creation_sqlite() {
    full_payment_at_creation(sqlite_ledger().await).await;
}

#[tokio::test]
async fn full_payment_at_creation_memory() {
    full_payment_at_creation(memory_ledger()).await;
}

// =============================================================================
// Scenario 2: partial payment rolls due onto the customer
// =============================================================================

async fn partial_payment_raises_customer_balance<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 10).await;
    let customer = ledger
        .add_customer(CustomerDraft {
            name: "Ahmad Ali".to_string(),
            phone: "03001234567".to_string(),
            email: None,
            address: Some("Lahore".to_string()),
        })
        .await
        .unwrap();

    let invoice = ledger
        .create_invoice(
            InvoiceDraft {
                lines: vec![CartLine {
                    product_id: product.id.clone(),
                    quantity: 2,
                }],
                customer: CustomerRef::Existing(customer.id.clone()),
                paid_paisa: 30_000,
                method: PaymentMethod::Cash,
            },
            &counter(),
        )
        .await
        .unwrap();

    assert_eq!(invoice.due_paisa, 40_000);
    assert_eq!(invoice.status, InvoiceStatus::Partial);
    assert_eq!(invoice.customer_name, "Ahmad Ali");

    let reloaded = ledger.customer(&customer.id).await.unwrap();
    assert_eq!(reloaded.total_due_paisa, 40_000);
}

#[tokio::test]
async fn partial_payment_raises_customer_balance_sqlite() {
    partial_payment_raises_customer_balance(sqlite_ledger().await).await;
}

#[tokio::test]
async fn partial_payment_raises_customer_balance_memory() {
    partial_payment_raises_customer_balance(memory_ledger()).await;
}

// =============================================================================
// Scenario 3: settling payment clears invoice and customer balance
// =============================================================================

async fn settling_payment_clears_balances<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 10).await;
    let customer = ledger
        .add_customer(CustomerDraft {
            name: "Sara Khan".to_string(),
            phone: "03017654321".to_string(),
            email: None,
            address: None,
        })
        .await
        .unwrap();

    let invoice = ledger
        .create_invoice(
            InvoiceDraft {
                lines: vec![CartLine {
                    product_id: product.id.clone(),
                    quantity: 2,
                }],
                customer: CustomerRef::Existing(customer.id.clone()),
                paid_paisa: 30_000,
                method: PaymentMethod::Cash,
            },
            &counter(),
        )
        .await
        .unwrap();

    let payment = ledger
        .record_payment(&invoice.id, 40_000, PaymentMethod::Jazzcash, &counter())
        .await
        .unwrap();
    assert_eq!(payment.amount_paisa, 40_000);
    assert_eq!(payment.customer_id.as_deref(), Some(customer.id.as_str()));

    let settled = ledger.invoice(&invoice.id).await.unwrap();
    assert_eq!(settled.paid_paisa, 70_000);
    assert_eq!(settled.due_paisa, 0);
    assert_eq!(settled.status, InvoiceStatus::Paid);

    // Balance back at the pre-invoice level
    let reloaded = ledger.customer(&customer.id).await.unwrap();
    assert_eq!(reloaded.total_due_paisa, 0);

    // Round-trip property: Σ payment amounts == invoice.paid − creation paid
    let journal = ledger.payments_for_invoice(&invoice.id).await.unwrap();
    let journal_total: i64 = journal.iter().map(|p| p.amount_paisa).sum();
    assert_eq!(journal_total + 30_000, settled.paid_paisa);
}

#[tokio::test]
async fn settling_payment_clears_balances_sqlite() {
    settling_payment_clears_balances(sqlite_ledger().await).await;
}

#[tokio::test]
async fn settling_payment_clears_balances_memory() {
    settling_payment_clears_balances(memory_ledger()).await;
}

// =============================================================================
// Scenario 4: insufficient stock aborts with zero state change
// =============================================================================

async fn insufficient_stock_changes_nothing<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 10).await;

    let err = ledger
        .create_invoice(walk_in_cart(&product.id, 20, 0), &counter())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InsufficientStock {
            available: 10,
            requested: 20,
            ..
        }
    ));

    // No invoice, no stock movement
    assert!(ledger.invoices().await.unwrap().is_empty());
    assert_eq!(ledger.product(&product.id).await.unwrap().stock, 10);
}

#[tokio::test]
async fn insufficient_stock_changes_nothing_sqlite() {
    insufficient_stock_changes_nothing(sqlite_ledger().await).await;
}

#[tokio::test]
async fn insufficient_stock_changes_nothing_memory() {
    insufficient_stock_changes_nothing(memory_ledger()).await;
}

// =============================================================================
// Scenario 5: direct stock adjustment applies the same guard
// =============================================================================

async fn stock_adjustment_guard<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 3).await;

    let err = ledger.adjust_stock(&product.id, -5).await.unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientStock { .. }));
    assert_eq!(ledger.product(&product.id).await.unwrap().stock, 3);

    // Restock is unguarded upward
    assert_eq!(ledger.adjust_stock(&product.id, 7).await.unwrap(), 10);
}

#[tokio::test]
async fn stock_adjustment_guard_sqlite() {
    stock_adjustment_guard(sqlite_ledger().await).await;
}

#[tokio::test]
async fn stock_adjustment_guard_memory() {
    stock_adjustment_guard(memory_ledger()).await;
}

// =============================================================================
// Scenario 6: concurrent payments both land
// =============================================================================

async fn concurrent_payments_both_apply<S: Store>(ledger: Ledger<S>) {
    // Rs 500 invoice, nothing paid yet: cart of 2 at a Rs 250 product
    let holder = ledger
        .add_product(ProductDraft {
            name: "Holder".to_string(),
            category: "Fittings".to_string(),
            unit: Unit::Piece,
            unit_price_paisa: 25_000,
            unit_cost_paisa: None,
            stock: 10,
            watts: None,
        })
        .await
        .unwrap();

    let invoice = ledger
        .create_invoice(walk_in_cart(&holder.id, 2, 0), &counter())
        .await
        .unwrap();
    assert_eq!(invoice.total_paisa, 50_000);

    // Both settlements read the same revision; the loser of the race must
    // retry on fresh numbers, not silently lose its delta.
    let actor_a = counter();
    let actor_b = counter();
    let (a, b) = tokio::join!(
        ledger.record_payment(&invoice.id, 10_000, PaymentMethod::Cash, &actor_a),
        ledger.record_payment(&invoice.id, 10_000, PaymentMethod::Cash, &actor_b)
    );

    a.unwrap();
    b.unwrap();

    // Neither delta was lost
    let settled = ledger.invoice(&invoice.id).await.unwrap();
    assert_eq!(settled.paid_paisa, 20_000);
    assert_eq!(settled.due_paisa, 30_000);
    assert_eq!(settled.status, InvoiceStatus::Partial);
    assert_eq!(settled.revision, 2);

    let journal = ledger.payments_for_invoice(&invoice.id).await.unwrap();
    assert_eq!(journal.len(), 2);
}

#[tokio::test]
async fn concurrent_payments_both_apply_sqlite() {
    concurrent_payments_both_apply(sqlite_ledger().await).await;
}

#[tokio::test]
async fn concurrent_payments_both_apply_memory() {
    concurrent_payments_both_apply(memory_ledger()).await;
}

// =============================================================================
// Duplicate submission is NOT idempotent (documented behaviour)
// =============================================================================

async fn duplicate_payment_double_applies<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 10).await;
    let invoice = ledger
        .create_invoice(walk_in_cart(&product.id, 10, 0), &counter())
        .await
        .unwrap();
    assert_eq!(invoice.total_paisa, 350_000);

    // The same logical payment sent twice lands twice. There is no
    // idempotency key; exactly-once is the caller's responsibility.
    ledger
        .record_payment(&invoice.id, 30_000, PaymentMethod::Cash, &counter())
        .await
        .unwrap();
    ledger
        .record_payment(&invoice.id, 30_000, PaymentMethod::Cash, &counter())
        .await
        .unwrap();

    let reloaded = ledger.invoice(&invoice.id).await.unwrap();
    assert_eq!(reloaded.paid_paisa, 60_000);
    assert_eq!(
        ledger
            .payments_for_invoice(&invoice.id)
            .await
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn duplicate_payment_double_applies_sqlite() {
    duplicate_payment_double_applies(sqlite_ledger().await).await;
}

#[tokio::test]
async fn duplicate_payment_double_applies_memory() {
    duplicate_payment_double_applies(memory_ledger()).await;
}

// =============================================================================
// Aggregate invariant: balance audit stays consistent through the lifecycle
// =============================================================================

async fn balance_audit_stays_consistent<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 100).await;
    let customer = ledger
        .add_customer(CustomerDraft {
            name: "Hassan Raza".to_string(),
            phone: "03005551234".to_string(),
            email: None,
            address: Some("Multan".to_string()),
        })
        .await
        .unwrap();

    let credit_sale = |quantity: i64, paid: i64| InvoiceDraft {
        lines: vec![CartLine {
            product_id: product.id.clone(),
            quantity,
        }],
        customer: CustomerRef::Existing(customer.id.clone()),
        paid_paisa: paid,
        method: PaymentMethod::Bank,
    };

    // Two open invoices: dues of Rs 400 and Rs 700
    let first = ledger
        .create_invoice(credit_sale(2, 30_000), &counter())
        .await
        .unwrap();
    ledger
        .create_invoice(credit_sale(2, 0), &counter())
        .await
        .unwrap();

    let audit = ledger.audit_customer_balance(&customer.id).await.unwrap();
    assert!(audit.is_consistent());
    assert_eq!(audit.recorded.paisa(), 110_000);

    // Settle the first; audit must still agree
    ledger
        .record_payment(&first.id, 40_000, PaymentMethod::Cash, &counter())
        .await
        .unwrap();

    let audit = ledger.audit_customer_balance(&customer.id).await.unwrap();
    assert!(audit.is_consistent());
    assert_eq!(audit.recorded.paisa(), 70_000);
}

#[tokio::test]
async fn balance_audit_stays_consistent_sqlite() {
    balance_audit_stays_consistent(sqlite_ledger().await).await;
}

#[tokio::test]
async fn balance_audit_stays_consistent_memory() {
    balance_audit_stays_consistent(memory_ledger()).await;
}

// =============================================================================
// Revenue report over the lifecycle
// =============================================================================

async fn revenue_report_owner_gating<S: Store>(ledger: Ledger<S>) {
    let product = led_bulb(&ledger, 100).await;

    ledger
        .create_invoice(walk_in_cart(&product.id, 2, 70_000), &counter())
        .await
        .unwrap();
    ledger
        .create_invoice(walk_in_cart(&product.id, 1, 0), &counter())
        .await
        .unwrap();

    let from = chrono::Utc::now() - chrono::Duration::hours(1);
    let to = chrono::Utc::now() + chrono::Duration::hours(1);

    let report = ledger
        .revenue_report(from, to, &Actor::owner("malik"))
        .await
        .unwrap();
    assert_eq!(report.invoice_count, 2);
    assert_eq!(report.revenue.paisa(), 105_000);
    assert_eq!(report.received.paisa(), 70_000);
    // 3 bulbs at Rs 220 cost
    assert_eq!(report.cost.unwrap().paisa(), 66_000);
    assert_eq!(report.profit.unwrap().paisa(), 39_000);

    let gated = ledger
        .revenue_report(from, to, &counter())
        .await
        .unwrap();
    assert_eq!(gated.revenue.paisa(), 105_000);
    assert!(gated.cost.is_none());
    assert!(gated.profit.is_none());
}

#[tokio::test]
async fn revenue_report_owner_gating_sqlite() {
    revenue_report_owner_gating(sqlite_ledger().await).await;
}

#[tokio::test]
async fn revenue_report_owner_gating_memory() {
    revenue_report_owner_gating(memory_ledger()).await;
}
