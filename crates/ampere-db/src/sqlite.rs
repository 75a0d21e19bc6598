//! # SQLite Store
//!
//! The SQLite implementation of the [`Store`] trait.
//!
//! ## Transaction Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  The Two Atomic Commits                                 │
//! │                                                                         │
//! │  commit_invoice                      commit_payment                    │
//! │  ──────────────                      ──────────────                    │
//! │  BEGIN                               BEGIN                             │
//! │    INSERT invoice                      INSERT payment                  │
//! │    INSERT items (ordered)              UPDATE invoices                 │
//! │    UPDATE products                       SET paid, due, status,        │
//! │      SET stock = stock - qty             revision = revision + 1       │
//! │      WHERE stock >= qty  ◄─guard       WHERE revision = expected ◄─CAS │
//! │    UPDATE customers                    UPDATE customers                │
//! │      SET total_due += due                SET total_due -= amount       │
//! │  COMMIT                              COMMIT                            │
//! │                                                                         │
//! │  Any failed step rolls the whole transaction back — no orphan          │
//! │  invoice, no partial stock decrement, no lost settlement.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Queries use the runtime API (`sqlx::query` / `query_as`) with the derives
//! on the core types; guarded mutations check `rows_affected()` to tell a
//! missing row from a failed guard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use ampere_core::{
    Customer, Invoice, InvoiceItem, InvoiceStatus, Payment, PaymentMethod, Product,
};

use crate::error::{StoreError, StoreResult};
use crate::store::{InvoiceCommit, PaymentCommit, Store};

// =============================================================================
// Row Shapes
// =============================================================================

/// Flat invoice row; items are loaded separately and attached.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: String,
    invoice_number: String,
    customer_id: Option<String>,
    customer_name: String,
    customer_phone: Option<String>,
    subtotal_paisa: i64,
    tax_paisa: i64,
    total_paisa: i64,
    paid_paisa: i64,
    due_paisa: i64,
    payment_method: PaymentMethod,
    status: InvoiceStatus,
    created_at: DateTime<Utc>,
    created_by: String,
    revision: i64,
}

impl InvoiceRow {
    fn into_invoice(self, items: Vec<InvoiceItem>) -> Invoice {
        Invoice {
            id: self.id,
            invoice_number: self.invoice_number,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            items,
            subtotal_paisa: self.subtotal_paisa,
            tax_paisa: self.tax_paisa,
            total_paisa: self.total_paisa,
            paid_paisa: self.paid_paisa,
            due_paisa: self.due_paisa,
            payment_method: self.payment_method,
            status: self.status,
            created_at: self.created_at,
            created_by: self.created_by,
            revision: self.revision,
        }
    }
}

const INVOICE_COLUMNS: &str = "id, invoice_number, customer_id, customer_name, customer_phone, \
     subtotal_paisa, tax_paisa, total_paisa, paid_paisa, due_paisa, \
     payment_method, status, created_at, created_by, revision";

// =============================================================================
// SqliteStore
// =============================================================================

/// SQLite-backed store.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./ampere.db")).await?;
/// let store = db.store();
/// let products = store.products().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new SqliteStore over an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    /// Loads the ordered items of one invoice.
    async fn load_items(&self, invoice_id: &str) -> StoreResult<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(
            "SELECT product_id, product_name, quantity, unit, \
                    unit_price_paisa, unit_cost_paisa, total_paisa \
             FROM invoice_items \
             WHERE invoice_id = ?1 \
             ORDER BY position",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Attaches items to each invoice row.
    async fn hydrate(&self, rows: Vec<InvoiceRow>) -> StoreResult<Vec<Invoice>> {
        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let items = self.load_items(&row.id).await?;
            invoices.push(row.into_invoice(items));
        }
        Ok(invoices)
    }
}

#[async_trait]
impl Store for SqliteStore {
    // -------------------------------------------------------------------------
    // Products
    // -------------------------------------------------------------------------

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            "INSERT INTO products ( \
                 id, name, category, unit, \
                 unit_price_paisa, unit_cost_paisa, stock, watts, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.unit)
        .bind(product.unit_price_paisa)
        .bind(product.unit_cost_paisa)
        .bind(product.stock)
        .bind(&product.watts)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        debug!(id = %product.id, "Updating product");

        // Stock is deliberately absent: it changes only through the guarded
        // adjust_stock path or an invoice commit.
        let result = sqlx::query(
            "UPDATE products SET \
                 name = ?2, category = ?3, unit = ?4, \
                 unit_price_paisa = ?5, unit_cost_paisa = ?6, watts = ?7 \
             WHERE id = ?1",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.unit)
        .bind(product.unit_price_paisa)
        .bind(product.unit_cost_paisa)
        .bind(&product.watts)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", &product.id));
        }

        Ok(())
    }

    async fn delete_product(&self, id: &str) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Product", id));
        }

        Ok(())
    }

    async fn product(&self, id: &str) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, category, unit, \
                    unit_price_paisa, unit_cost_paisa, stock, watts, created_at \
             FROM products \
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn products(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, category, unit, \
                    unit_price_paisa, unit_cost_paisa, stock, watts, created_at \
             FROM products \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn adjust_stock(&self, product_id: &str, delta: i64) -> StoreResult<i64> {
        debug!(product_id = %product_id, delta = %delta, "Adjusting stock");

        // The guard lives in the WHERE clause: the update only applies when
        // the result stays non-negative, so two racing adjustments can never
        // combine into a negative level.
        let result = sqlx::query(
            "UPDATE products SET stock = stock + ?2 \
             WHERE id = ?1 AND stock + ?2 >= 0",
        )
        .bind(product_id)
        .bind(delta)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                    .bind(product_id)
                    .fetch_optional(&self.pool)
                    .await?;

            return Err(match available {
                None => StoreError::not_found("Product", product_id),
                Some(available) => StoreError::InsufficientStock {
                    product: product_id.to_string(),
                    available,
                    requested: -delta,
                },
            });
        }

        let stock: i64 = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(stock)
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    async fn insert_customer(&self, customer: &Customer) -> StoreResult<()> {
        debug!(id = %customer.id, name = %customer.name, "Inserting customer");

        sqlx::query(
            "INSERT INTO customers ( \
                 id, name, phone, email, address, total_due_paisa, created_at \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(customer.total_due_paisa)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_customer(&self, customer: &Customer) -> StoreResult<()> {
        debug!(id = %customer.id, "Updating customer");

        // total_due_paisa deliberately absent: the balance changes only
        // through adjust_due or a ledger commit.
        let result = sqlx::query(
            "UPDATE customers SET \
                 name = ?2, phone = ?3, email = ?4, address = ?5 \
             WHERE id = ?1",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Customer", &customer.id));
        }

        Ok(())
    }

    async fn customer(&self, id: &str) -> StoreResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, email, address, total_due_paisa, created_at \
             FROM customers \
             WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn customers(&self) -> StoreResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, email, address, total_due_paisa, created_at \
             FROM customers \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn customer_by_phone(&self, phone: &str) -> StoreResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, email, address, total_due_paisa, created_at \
             FROM customers \
             WHERE phone = ?1 \
             LIMIT 1",
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn adjust_due(&self, customer_id: &str, delta_paisa: i64) -> StoreResult<i64> {
        debug!(customer_id = %customer_id, delta = %delta_paisa, "Adjusting customer balance");

        let result = sqlx::query(
            "UPDATE customers SET total_due_paisa = total_due_paisa + ?2 \
             WHERE id = ?1",
        )
        .bind(customer_id)
        .bind(delta_paisa)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Customer", customer_id));
        }

        let balance: i64 =
            sqlx::query_scalar("SELECT total_due_paisa FROM customers WHERE id = ?1")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(balance)
    }

    // -------------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------------

    async fn invoice(&self, id: &str) -> StoreResult<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            None => Ok(None),
            Some(row) => {
                let items = self.load_items(&row.id).await?;
                Ok(Some(row.into_invoice(items)))
            }
        }
    }

    async fn invoices(&self) -> StoreResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn invoices_for_customer(&self, customer_id: &str) -> StoreResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE customer_id = ?1 \
             ORDER BY created_at DESC"
        ))
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn invoices_with_status(
        &self,
        statuses: &[InvoiceStatus],
    ) -> StoreResult<Vec<Invoice>> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = statuses
            .iter()
            .map(|_| "?")
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE status IN ({placeholders}) \
             ORDER BY created_at DESC"
        );

        let mut query = sqlx::query_as::<_, InvoiceRow>(&sql);
        for status in statuses {
            query = query.bind(*status);
        }

        let rows = query.fetch_all(&self.pool).await?;
        self.hydrate(rows).await
    }

    async fn invoices_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(&format!(
            "SELECT {INVOICE_COLUMNS} FROM invoices \
             WHERE created_at >= ?1 AND created_at < ?2 \
             ORDER BY created_at DESC"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    // -------------------------------------------------------------------------
    // Payments
    // -------------------------------------------------------------------------

    async fn payments_for_invoice(&self, invoice_id: &str) -> StoreResult<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT id, invoice_id, customer_id, amount_paisa, method, created_at, created_by \
             FROM payments \
             WHERE invoice_id = ?1 \
             ORDER BY created_at",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    // -------------------------------------------------------------------------
    // Transactional Multi-Writes
    // -------------------------------------------------------------------------

    async fn commit_invoice(&self, commit: &InvoiceCommit) -> StoreResult<()> {
        let invoice = &commit.invoice;
        debug!(
            id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            total = %invoice.total_paisa,
            "Committing invoice"
        );

        // Dropping the transaction without commit rolls everything back.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO invoices ( \
                 id, invoice_number, customer_id, customer_name, customer_phone, \
                 subtotal_paisa, tax_paisa, total_paisa, paid_paisa, due_paisa, \
                 payment_method, status, created_at, created_by, revision \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(&invoice.customer_id)
        .bind(&invoice.customer_name)
        .bind(&invoice.customer_phone)
        .bind(invoice.subtotal_paisa)
        .bind(invoice.tax_paisa)
        .bind(invoice.total_paisa)
        .bind(invoice.paid_paisa)
        .bind(invoice.due_paisa)
        .bind(invoice.payment_method)
        .bind(invoice.status)
        .bind(invoice.created_at)
        .bind(&invoice.created_by)
        .bind(invoice.revision)
        .execute(&mut *tx)
        .await?;

        for (position, item) in invoice.items.iter().enumerate() {
            sqlx::query(
                "INSERT INTO invoice_items ( \
                     invoice_id, position, product_id, product_name, quantity, \
                     unit, unit_price_paisa, unit_cost_paisa, total_paisa \
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )
            .bind(&invoice.id)
            .bind(position as i64)
            .bind(&item.product_id)
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit)
            .bind(item.unit_price_paisa)
            .bind(item.unit_cost_paisa)
            .bind(item.total_paisa)
            .execute(&mut *tx)
            .await?;
        }

        // Stock re-guard inside the transaction: the pre-check outside may
        // have raced a concurrent sale. A failed guard aborts the commit.
        for dec in &commit.stock_decrements {
            let result = sqlx::query(
                "UPDATE products SET stock = stock - ?2 \
                 WHERE id = ?1 AND stock >= ?2",
            )
            .bind(&dec.product_id)
            .bind(dec.quantity)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                let available: Option<i64> =
                    sqlx::query_scalar("SELECT stock FROM products WHERE id = ?1")
                        .bind(&dec.product_id)
                        .fetch_optional(&mut *tx)
                        .await?;

                return Err(match available {
                    None => StoreError::not_found("Product", &dec.product_id),
                    Some(available) => StoreError::InsufficientStock {
                        product: dec.product_id.clone(),
                        available,
                        requested: dec.quantity,
                    },
                });
            }
        }

        if let Some(delta) = &commit.customer_delta {
            let result = sqlx::query(
                "UPDATE customers SET total_due_paisa = total_due_paisa + ?2 \
                 WHERE id = ?1",
            )
            .bind(&delta.customer_id)
            .bind(delta.delta_paisa)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found("Customer", &delta.customer_id));
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn commit_payment(&self, commit: &PaymentCommit) -> StoreResult<()> {
        let payment = &commit.payment;
        debug!(
            invoice_id = %payment.invoice_id,
            amount = %payment.amount_paisa,
            "Committing payment"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO payments ( \
                 id, invoice_id, customer_id, amount_paisa, method, created_at, created_by \
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&payment.id)
        .bind(&payment.invoice_id)
        .bind(&payment.customer_id)
        .bind(payment.amount_paisa)
        .bind(payment.method)
        .bind(payment.created_at)
        .bind(&payment.created_by)
        .execute(&mut *tx)
        .await?;

        // Compare-and-set on the revision: a concurrent settlement bumped it,
        // and this update then matches zero rows. The caller reloads and
        // retries with fresh numbers.
        let result = sqlx::query(
            "UPDATE invoices SET \
                 paid_paisa = ?2, due_paisa = ?3, status = ?4, revision = revision + 1 \
             WHERE id = ?1 AND revision = ?5",
        )
        .bind(&payment.invoice_id)
        .bind(commit.new_paid_paisa)
        .bind(commit.new_due_paisa)
        .bind(commit.new_status)
        .bind(commit.expected_revision)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let exists: Option<i64> =
                sqlx::query_scalar("SELECT revision FROM invoices WHERE id = ?1")
                    .bind(&payment.invoice_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match exists {
                None => StoreError::not_found("Invoice", &payment.invoice_id),
                Some(_) => StoreError::conflict("Invoice", &payment.invoice_id),
            });
        }

        if let Some(delta) = &commit.customer_delta {
            let result = sqlx::query(
                "UPDATE customers SET total_due_paisa = total_due_paisa + ?2 \
                 WHERE id = ?1",
            )
            .bind(&delta.customer_id)
            .bind(delta.delta_paisa)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found("Customer", &delta.customer_id));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::store::StockDecrement;
    use ampere_core::Unit;
    use uuid::Uuid;

    async fn store() -> SqliteStore {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.store()
    }

    fn product(stock: i64) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
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

    fn invoice(id: &str, items: Vec<InvoiceItem>, total: i64, paid: i64) -> Invoice {
        let due = (total - paid).max(0);
        Invoice {
            id: id.to_string(),
            invoice_number: "INV-000123".to_string(),
            customer_id: None,
            customer_name: "Walk-in Customer".to_string(),
            customer_phone: None,
            items,
            subtotal_paisa: total,
            tax_paisa: 0,
            total_paisa: total,
            paid_paisa: paid,
            due_paisa: due,
            payment_method: PaymentMethod::Cash,
            status: if due == 0 {
                InvoiceStatus::Paid
            } else if paid > 0 {
                InvoiceStatus::Partial
            } else {
                InvoiceStatus::Unpaid
            },
            created_at: Utc::now(),
            created_by: "counter-1".to_string(),
            revision: 0,
        }
    }

    fn item_for(product: &Product, quantity: i64) -> InvoiceItem {
        InvoiceItem {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            unit: product.unit,
            unit_price_paisa: product.unit_price_paisa,
            unit_cost_paisa: product.unit_cost_paisa,
            total_paisa: product.unit_price_paisa * quantity,
        }
    }

    #[tokio::test]
    async fn test_product_round_trip() {
        let store = store().await;
        let p = product(10);

        store.insert_product(&p).await.unwrap();
        let loaded = store.product(&p.id).await.unwrap().unwrap();

        assert_eq!(loaded.name, "LED Bulb 12W");
        assert_eq!(loaded.unit, Unit::Piece);
        assert_eq!(loaded.stock, 10);
    }

    #[tokio::test]
    async fn test_adjust_stock_guard() {
        let store = store().await;
        let p = product(3);
        store.insert_product(&p).await.unwrap();

        // Delta that would go negative is rejected, stock untouched
        let err = store.adjust_stock(&p.id, -5).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientStock {
                available: 3,
                requested: 5,
                ..
            }
        ));
        assert_eq!(store.product(&p.id).await.unwrap().unwrap().stock, 3);

        // Valid decrement succeeds and returns the new level
        assert_eq!(store.adjust_stock(&p.id, -2).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_product_leaves_stock_alone() {
        let store = store().await;
        let mut p = product(10);
        store.insert_product(&p).await.unwrap();

        p.name = "LED Bulb 12W Cool White".to_string();
        p.stock = 999; // must be ignored
        store.update_product(&p).await.unwrap();

        let loaded = store.product(&p.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "LED Bulb 12W Cool White");
        assert_eq!(loaded.stock, 10);
    }

    #[tokio::test]
    async fn test_commit_invoice_insufficient_stock_rolls_back() {
        let store = store().await;
        let p = product(10);
        store.insert_product(&p).await.unwrap();

        let inv_id = Uuid::new_v4().to_string();
        let inv = invoice(&inv_id, vec![item_for(&p, 20)], 700_000, 0);
        let commit = InvoiceCommit {
            invoice: inv,
            stock_decrements: vec![StockDecrement {
                product_id: p.id.clone(),
                quantity: 20,
            }],
            customer_delta: None,
        };

        let err = store.commit_invoice(&commit).await.unwrap_err();
        assert!(matches!(err, StoreError::InsufficientStock { .. }));

        // Nothing persisted: no invoice row, stock untouched
        assert!(store.invoice(&inv_id).await.unwrap().is_none());
        assert_eq!(store.product(&p.id).await.unwrap().unwrap().stock, 10);
    }

    #[tokio::test]
    async fn test_commit_payment_revision_conflict() {
        let store = store().await;
        let p = product(10);
        store.insert_product(&p).await.unwrap();

        let inv_id = Uuid::new_v4().to_string();
        let inv = invoice(&inv_id, vec![item_for(&p, 2)], 70_000, 0);
        store
            .commit_invoice(&InvoiceCommit {
                invoice: inv,
                stock_decrements: vec![StockDecrement {
                    product_id: p.id.clone(),
                    quantity: 2,
                }],
                customer_delta: None,
            })
            .await
            .unwrap();

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            invoice_id: inv_id.clone(),
            customer_id: None,
            amount_paisa: 30_000,
            method: PaymentMethod::Cash,
            created_at: Utc::now(),
            created_by: "counter-1".to_string(),
        };

        // Stale expected_revision: the settlement must be refused
        let stale = PaymentCommit {
            payment: payment.clone(),
            expected_revision: 7,
            new_paid_paisa: 30_000,
            new_due_paisa: 40_000,
            new_status: InvoiceStatus::Partial,
            customer_delta: None,
        };
        let err = store.commit_payment(&stale).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        // The failed commit left no payment behind
        assert!(store
            .payments_for_invoice(&inv_id)
            .await
            .unwrap()
            .is_empty());

        // Correct revision applies and bumps it
        let fresh = PaymentCommit {
            payment,
            expected_revision: 0,
            new_paid_paisa: 30_000,
            new_due_paisa: 40_000,
            new_status: InvoiceStatus::Partial,
            customer_delta: None,
        };
        store.commit_payment(&fresh).await.unwrap();

        let reloaded = store.invoice(&inv_id).await.unwrap().unwrap();
        assert_eq!(reloaded.paid_paisa, 30_000);
        assert_eq!(reloaded.revision, 1);
        assert_eq!(reloaded.status, InvoiceStatus::Partial);
    }
}
