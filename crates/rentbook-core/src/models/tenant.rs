//! Tenant domain model.
//!
//! A tenant record belongs to exactly one landlord (`owner_user_id`) and
//! embeds its payment and rent-change logs. Both logs are append-only:
//! entries are inserted, never edited or removed, and live exactly as
//! long as the parent tenant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a rent payment was made.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PaymentMethod {
    Cash,
    Check,
    MoneyOrder,
    BankTransfer,
}

/// A single rent payment.
///
/// `date` is a plain calendar date: late-payment arithmetic reads the
/// day-of-month directly from it, so it must never be round-tripped
/// through a UTC timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub paid_by: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A historical rent amount, recorded when `monthly_rent` changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentChange {
    pub amount: f64,
    pub date: DateTime<Utc>,
}

/// A tenant record, owned by one landlord.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub name: String,
    pub apartment: String,
    pub unit_type: String,
    pub monthly_rent: f64,
    pub notes: String,
    pub payments: Vec<Payment>,
    pub rent_history: Vec<RentChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub apartment: String,
    pub unit_type: String,
    pub monthly_rent: f64,
    pub notes: Option<String>,
}

/// Fields that can be updated on an existing tenant.
///
/// Both fields are independently optional. Supplying a `monthly_rent`
/// that differs from the current value appends a [`RentChange`] entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTenant {
    pub notes: Option<String>,
    pub monthly_rent: Option<f64>,
}

/// Fields required to append a payment to a tenant.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePayment {
    pub amount: f64,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub paid_by: String,
    pub photo: Option<String>,
}
