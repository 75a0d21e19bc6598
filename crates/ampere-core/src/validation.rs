//! # Validation Module
//!
//! Input validation rules for Ampere POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (billing screen / API)                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Ledger engine (Rust)                                         │
//! │  └── THIS MODULE: rule validation BEFORE any write                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storage backend                                              │
//! │  ├── NOT NULL / CHECK constraints (stock >= 0, amount > 0)             │
//! │  └── Transactional guards inside the commit                            │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ampere_core::validation::{validate_quantity, validate_payment_amount};
//!
//! validate_quantity(5).unwrap();
//! validate_payment_amount(40_000).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::CartLine;
use crate::{MAX_INVOICE_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a customer name.
///
/// Same shape as product names: required, at most 200 characters.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a customer phone number.
///
/// ## Rules
/// - Required — the phone is the lookup key for repeat customers
/// - 7 to 20 characters after trimming
/// - Digits, plus an optional leading `+` and common separators
///
/// ## Example
/// ```rust
/// use ampere_core::validation::validate_phone;
///
/// assert!(validate_phone("03001234567").is_ok());
/// assert!(validate_phone("+92 300 1234567").is_ok());
/// assert!(validate_phone("").is_err());
/// assert!(validate_phone("not a phone").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    if phone.len() < 7 || phone.len() > 20 {
        return Err(ValidationError::OutOfRange {
            field: "phone".to_string(),
            min: 7,
            max: 20,
        });
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, '+' and '-'".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (>= 1)
/// - Must not exceed MAX_LINE_QUANTITY (9,999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in paisa.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional giveaways)
pub fn validate_price_paisa(paisa: i64) -> ValidationResult<()> {
    if paisa < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an initial stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0); the non-negative-stock invariant holds
///   from the moment a product exists
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

/// Validates a payment amount in paisa.
///
/// ## Rules
/// - Must be positive (> 0); zero or negative payments are meaningless
pub fn validate_payment_amount(paisa: i64) -> ValidationResult<()> {
    if paisa <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates the amount received at invoice creation time.
///
/// ## Rules
/// - Must be non-negative; zero means a fully unpaid credit sale
pub fn validate_paid_amount(paisa: i64) -> ValidationResult<()> {
    if paisa < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "paid amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use ampere_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Cart Validator
// =============================================================================

/// Validates a cart before invoice creation.
///
/// ## Rules
/// - Must contain at least one line
/// - Must not exceed MAX_INVOICE_LINES (100) distinct lines
/// - Every line quantity passes [`validate_quantity`]
///
/// ## User Workflow
/// ```text
/// Billing screen submits cart
///      │
///      ▼
/// validate_cart(&lines) ← THIS FUNCTION
///      │
///      ├── empty? → Error: "cart must contain at least one line item"
///      ├── too many lines? → Error: out of range
///      ├── any qty <= 0 or > 9999? → Error on that line
///      │
///      └── OK → resolve products, snapshot items, commit
/// ```
pub fn validate_cart(lines: &[CartLine]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::EmptyCart);
    }

    if lines.len() > MAX_INVOICE_LINES {
        return Err(ValidationError::OutOfRange {
            field: "cart lines".to_string(),
            min: 1,
            max: MAX_INVOICE_LINES as i64,
        });
    }

    for line in lines {
        validate_quantity(line.quantity)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
