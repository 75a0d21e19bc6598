//! # ampere-db: Persistence Layer for Ampere POS
//!
//! This crate provides storage for the Ampere POS ledger behind a single
//! backend-agnostic trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Ampere POS Data Flow                              │
//! │                                                                         │
//! │  ampere-ledger (Ledger<S: Store>)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ampere-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Store trait  │    │   Backends    │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │    │ (sqlite.rs,   │    │  (embedded)  │  │   │
//! │  │   │               │    │  memory.rs)   │    │              │  │   │
//! │  │   │ reads, writes │◄───│ SqliteStore   │    │ 001_init.sql │  │   │
//! │  │   │ + two atomic  │    │ MemoryStore   │    │              │  │   │
//! │  │   │ multi-writes  │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (WAL, pooled) — or plain maps under an RwLock             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The Store trait and the two transactional commit units
//! - [`pool`] - Connection pool creation and configuration
//! - [`sqlite`] - SQLite implementation
//! - [`memory`] - In-memory implementation (tests, dev)
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ampere_db::{Database, DbConfig, Store};
//!
//! let db = Database::new(DbConfig::new("path/to/ampere.db")).await?;
//! let store = db.store();
//!
//! let products = store.products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pool::{Database, DbConfig};
pub use sqlite::SqliteStore;
pub use store::{CustomerDelta, InvoiceCommit, PaymentCommit, StockDecrement, Store};
