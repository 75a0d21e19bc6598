//! # Memory Store
//!
//! The in-memory implementation of the [`Store`] trait.
//!
//! ## Atomicity Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     RwLock as Transaction                               │
//! │                                                                         │
//! │  Where SQLite wraps a multi-write in BEGIN/COMMIT, the memory backend  │
//! │  holds ONE RwLock write guard across the whole commit:                 │
//! │                                                                         │
//! │    let mut state = self.state.write().await;                           │
//! │    // validate everything first (stock guards, revision check)         │
//! │    // ...then mutate; no await point between validation and mutation   │
//! │                                                                         │
//! │  Validation-before-mutation under the guard gives all-or-nothing:     │
//! │  any failure returns before the first map is touched.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Useful for tests and for running the engine without a database file; it
//! raises the same [`StoreError`] variants as the SQLite backend so callers
//! cannot tell the two apart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use ampere_core::{Customer, Invoice, InvoiceStatus, Payment, Product};

use crate::error::{StoreError, StoreResult};
use crate::store::{InvoiceCommit, PaymentCommit, Store};

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Default)]
struct State {
    products: HashMap<String, Product>,
    customers: HashMap<String, Customer>,
    invoices: HashMap<String, Invoice>,
    payments: HashMap<String, Payment>,
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store over plain maps.
///
/// ## Usage
/// ```rust,ignore
/// let store = MemoryStore::new();
/// let ledger = Ledger::new(store);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

/// Sorts newest first, the listing order every read query uses.
fn newest_first<T>(mut records: Vec<T>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    records.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    records
}

#[async_trait]
impl Store for MemoryStore {
    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state.products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        let mut state = self.state.write().await;

        let existing = state
            .products
            .get_mut(&product.id)
            .ok_or_else(|| StoreError::not_found("Product", &product.id))?;

        // Catalog fields only; stock changes go through adjust_stock.
        existing.name = product.name.clone();
        existing.category = product.category.clone();
        existing.unit = product.unit;
        existing.unit_price_paisa = product.unit_price_paisa;
        existing.unit_cost_paisa = product.unit_cost_paisa;
        existing.watts = product.watts.clone();

        Ok(())
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        let mut state = self.state.write().await;

        state
            .products
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found("Product", id))
    }

    async fn product(&self, id: &str) -> StoreResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(id).cloned())
    }

    async fn products(&self) -> StoreResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state.products.values().cloned().collect(),
            |p| p.created_at,
        ))
    }

    async fn adjust_stock(&self, product_id: &str, delta: i64) -> StoreResult<i64> {
        let mut state = self.state.write().await;

        let product = state
            .products
            .get_mut(product_id)
            .ok_or_else(|| StoreError::not_found("Product", product_id))?;

        let next = product.stock + delta;
        if next < 0 {
            return Err(StoreError::InsufficientStock {
                product: product_id.to_string(),
                available: product.stock,
                requested: -delta,
            });
        }

        product.stock = next;
        Ok(next)
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    async fn insert_customer(&self, customer: &Customer) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state
            .customers
            .insert(customer.id.clone(), customer.clone());
        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> StoreResult<()> {
        let mut state = self.state.write().await;

        let existing = state
            .customers
            .get_mut(&customer.id)
            .ok_or_else(|| StoreError::not_found("Customer", &customer.id))?;

        // Contact fields only; the balance changes through adjust_due.
        existing.name = customer.name.clone();
        existing.phone = customer.phone.clone();
        existing.email = customer.email.clone();
        existing.address = customer.address.clone();

        Ok(())
    }

    async fn customer(&self, id: &str) -> StoreResult<Option<Customer>> {
        let state = self.state.read().await;
        Ok(state.customers.get(id).cloned())
    }

    async fn customers(&self) -> StoreResult<Vec<Customer>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state.customers.values().cloned().collect(),
            |c| c.created_at,
        ))
    }

    async fn customer_by_phone(&self, phone: &str) -> StoreResult<Option<Customer>> {
        let state = self.state.read().await;
        Ok(state
            .customers
            .values()
            .find(|c| c.phone == phone)
            .cloned())
    }

    async fn adjust_due(&self, customer_id: &str, delta_paisa: i64) -> StoreResult<i64> {
        let mut state = self.state.write().await;

        let customer = state
            .customers
            .get_mut(customer_id)
            .ok_or_else(|| StoreError::not_found("Customer", customer_id))?;

        customer.total_due_paisa += delta_paisa;
        Ok(customer.total_due_paisa)
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        let state = self.state.read().await;
        Ok(state.invoices.get(id).cloned())
    }

    async fn invoices(&self) -> StoreResult<Vec<Invoice>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state.invoices.values().cloned().collect(),
            |i| i.created_at,
        ))
    }

    async fn invoices_for_customer(&self, customer_id: &str) -> StoreResult<Vec<Invoice>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .invoices
                .values()
                .filter(|i| i.customer_id.as_deref() == Some(customer_id))
                .cloned()
                .collect(),
            |i| i.created_at,
        ))
    }

    async fn invoices_with_status(
        &self,
        statuses: &[InvoiceStatus],
    ) -> StoreResult<Vec<Invoice>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .invoices
                .values()
                .filter(|i| statuses.contains(&i.status))
                .cloned()
                .collect(),
            |i| i.created_at,
        ))
    }

    async fn invoices_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Invoice>> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .invoices
                .values()
                .filter(|i| i.created_at >= from && i.created_at < to)
                .cloned()
                .collect(),
            |i| i.created_at,
        ))
    }

    // -------------------------------------------------------------------------
    // Payments
    // -------------------------------------------------------------------------

    async fn payments_for_invoice(&self, invoice_id: &str) -> StoreResult<Vec<Payment>> {
        let state = self.state.read().await;

        let mut payments: Vec<Payment> = state
            .payments
            .values()
            .filter(|p| p.invoice_id == invoice_id)
            .cloned()
            .collect();
        payments.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        Ok(payments)
    }

    // -------------------------------------------------------------------------
    // Transactional Multi-Writes
    // -------------------------------------------------------------------------

    async fn commit_invoice(&self, commit: &InvoiceCommit) -> StoreResult<()> {
        let mut state = self.state.write().await;

        // Validate everything before touching any map.
        for dec in &commit.stock_decrements {
            let product = state
                .products
                .get(&dec.product_id)
                .ok_or_else(|| StoreError::not_found("Product", &dec.product_id))?;

            if product.stock < dec.quantity {
                return Err(StoreError::InsufficientStock {
                    product: dec.product_id.clone(),
                    available: product.stock,
                    requested: dec.quantity,
                });
            }
        }

        if let Some(delta) = &commit.customer_delta {
            if !state.customers.contains_key(&delta.customer_id) {
                return Err(StoreError::not_found("Customer", &delta.customer_id));
            }
        }

        // All guards passed; apply every write.
        state
            .invoices
            .insert(commit.invoice.id.clone(), commit.invoice.clone());

        for dec in &commit.stock_decrements {
            if let Some(product) = state.products.get_mut(&dec.product_id) {
                product.stock -= dec.quantity;
            }
        }

        if let Some(delta) = &commit.customer_delta {
            if let Some(customer) = state.customers.get_mut(&delta.customer_id) {
                customer.total_due_paisa += delta.delta_paisa;
            }
        }

        Ok(())
    }

    async fn commit_payment(&self, commit: &PaymentCommit) -> StoreResult<()> {
        let mut state = self.state.write().await;

        // Same revision check the SQLite backend runs in its UPDATE.
        let revision = state
            .invoices
            .get(&commit.payment.invoice_id)
            .map(|i| i.revision)
            .ok_or_else(|| StoreError::not_found("Invoice", &commit.payment.invoice_id))?;

        if revision != commit.expected_revision {
            return Err(StoreError::conflict(
                "Invoice",
                &commit.payment.invoice_id,
            ));
        }

        if let Some(delta) = &commit.customer_delta {
            if !state.customers.contains_key(&delta.customer_id) {
                return Err(StoreError::not_found("Customer", &delta.customer_id));
            }
        }

        state
            .payments
            .insert(commit.payment.id.clone(), commit.payment.clone());

        if let Some(invoice) = state.invoices.get_mut(&commit.payment.invoice_id) {
            invoice.paid_paisa = commit.new_paid_paisa;
            invoice.due_paisa = commit.new_due_paisa;
            invoice.status = commit.new_status;
            invoice.revision += 1;
        }

        if let Some(delta) = &commit.customer_delta {
            if let Some(customer) = state.customers.get_mut(&delta.customer_id) {
                customer.total_due_paisa += delta.delta_paisa;
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ampere_core::{PaymentMethod, Unit};
    use uuid::Uuid;

    fn product(stock: i64) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: "Copper Wire 1.5mm".to_string(),
            category: "Wires".to_string(),
            unit: Unit::Meter,
            unit_price_paisa: 12_000,
            unit_cost_paisa: None,
            stock,
            watts: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_adjust_stock_guard() {
        let store = MemoryStore::new();
        let p = product(3);
        store.insert_product(&p).await.unwrap();

        let err = store.adjust_stock(&p.id, -5).await.unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { .. }));
        assert_eq!(store.product(&p.id).await.unwrap().unwrap().stock, 3);

        assert_eq!(store.adjust_stock(&p.id, -3).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_adjust_due_is_unfloored() {
        let store = MemoryStore::new();
        let customer = Customer {
            id: "c1".to_string(),
            name: "Ahmad Ali".to_string(),
            phone: "03001234567".to_string(),
            email: None,
            address: Some("Lahore".to_string()),
            total_due_paisa: 0,
            created_at: Utc::now(),
        };
        store.insert_customer(&customer).await.unwrap();

        assert_eq!(store.adjust_due("c1", -5_000).await.unwrap(), -5_000);
        assert_eq!(store.adjust_due("c1", 15_000).await.unwrap(), 10_000);
    }

    #[tokio::test]
    async fn test_commit_invoice_is_all_or_nothing() {
        let store = MemoryStore::new();
        let in_stock = product(50);
        let scarce = product(1);
        store.insert_product(&in_stock).await.unwrap();
        store.insert_product(&scarce).await.unwrap();

        let invoice = Invoice {
            id: "inv-1".to_string(),
            invoice_number: "INV-000001".to_string(),
            customer_id: None,
            customer_name: "Walk-in Customer".to_string(),
            customer_phone: None,
            items: vec![],
            subtotal_paisa: 0,
            tax_paisa: 0,
            total_paisa: 0,
            paid_paisa: 0,
            due_paisa: 0,
            payment_method: PaymentMethod::Cash,
            status: InvoiceStatus::Paid,
            created_at: Utc::now(),
            created_by: "counter-1".to_string(),
            revision: 0,
        };

        // Second decrement fails its guard; the first must not apply either.
        let err = store
            .commit_invoice(&InvoiceCommit {
                invoice,
                stock_decrements: vec![
                    crate::store::StockDecrement {
                        product_id: in_stock.id.clone(),
                        quantity: 10,
                    },
                    crate::store::StockDecrement {
                        product_id: scarce.id.clone(),
                        quantity: 5,
                    },
                ],
                customer_delta: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InsufficientStock { .. }));
        assert!(store.invoice("inv-1").await.unwrap().is_none());
        assert_eq!(store.product(&in_stock.id).await.unwrap().unwrap().stock, 50);
    }
}
