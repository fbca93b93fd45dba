//! SurrealDB implementation of [`TenantRepository`].
//!
//! Every statement carries a `WHERE owner_user_id = $owner` guard, so a
//! lookup with the wrong owner and a lookup of a missing record produce
//! the same empty result — callers cannot distinguish the two. Payment
//! and rent-history entries are appended with `+=` and never rewritten.

use chrono::{DateTime, NaiveDate, Utc};
use rentbook_core::error::RentbookResult;
use rentbook_core::models::tenant::{
    CreatePayment, CreateTenant, Payment, PaymentMethod, RentChange, Tenant, UpdateTenant,
};
use rentbook_core::repository::TenantRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// Embedded payment entry as stored on the tenant document.
#[derive(Debug, SurrealValue)]
struct PaymentRecord {
    id: String,
    amount: f64,
    date: String,
    method: String,
    paid_by: String,
    photo: Option<String>,
    created_at: DateTime<Utc>,
}

impl PaymentRecord {
    fn try_into_payment(self) -> Result<Payment, DbError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| DbError::Migration(format!("invalid payment UUID: {e}")))?;
        let date = self
            .date
            .parse::<NaiveDate>()
            .map_err(|e| DbError::Migration(format!("invalid payment date: {e}")))?;
        Ok(Payment {
            id,
            amount: self.amount,
            date,
            method: parse_method(&self.method)?,
            paid_by: self.paid_by,
            photo: self.photo,
            created_at: self.created_at,
        })
    }
}

/// Embedded rent-history entry as stored on the tenant document.
#[derive(Debug, SurrealValue)]
struct RentChangeRecord {
    amount: f64,
    date: DateTime<Utc>,
}

impl RentChangeRecord {
    fn into_rent_change(self) -> RentChange {
        RentChange {
            amount: self.amount,
            date: self.date,
        }
    }
}

fn parse_method(s: &str) -> Result<PaymentMethod, DbError> {
    match s {
        "Cash" => Ok(PaymentMethod::Cash),
        "Check" => Ok(PaymentMethod::Check),
        "MoneyOrder" => Ok(PaymentMethod::MoneyOrder),
        "BankTransfer" => Ok(PaymentMethod::BankTransfer),
        other => Err(DbError::Migration(format!(
            "unknown payment method: {other}"
        ))),
    }
}

fn method_to_string(m: PaymentMethod) -> &'static str {
    match m {
        PaymentMethod::Cash => "Cash",
        PaymentMethod::Check => "Check",
        PaymentMethod::MoneyOrder => "MoneyOrder",
        PaymentMethod::BankTransfer => "BankTransfer",
    }
}

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    owner_user_id: String,
    name: String,
    apartment: String,
    unit_type: String,
    monthly_rent: f64,
    notes: String,
    payments: Vec<PaymentRecord>,
    rent_history: Vec<RentChangeRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TenantRow {
    fn try_into_tenant(self, id: Uuid) -> Result<Tenant, DbError> {
        let owner_user_id = Uuid::parse_str(&self.owner_user_id)
            .map_err(|e| DbError::Migration(format!("invalid owner UUID: {e}")))?;
        Ok(Tenant {
            id,
            owner_user_id,
            name: self.name,
            apartment: self.apartment,
            unit_type: self.unit_type,
            monthly_rent: self.monthly_rent,
            notes: self.notes,
            payments: self
                .payments
                .into_iter()
                .map(PaymentRecord::try_into_payment)
                .collect::<Result<Vec<_>, DbError>>()?,
            rent_history: self
                .rent_history
                .into_iter()
                .map(RentChangeRecord::into_rent_change)
                .collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TenantRowWithId {
    record_id: String,
    owner_user_id: String,
    name: String,
    apartment: String,
    unit_type: String,
    monthly_rent: f64,
    notes: String,
    payments: Vec<PaymentRecord>,
    rent_history: Vec<RentChangeRecord>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TenantRowWithId {
    fn try_into_tenant(self) -> Result<Tenant, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        TenantRow {
            owner_user_id: self.owner_user_id,
            name: self.name,
            apartment: self.apartment,
            unit_type: self.unit_type,
            monthly_rent: self.monthly_rent,
            notes: self.notes,
            payments: self.payments,
            rent_history: self.rent_history,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .try_into_tenant(id)
    }
}

/// SurrealDB implementation of the Tenant repository.
#[derive(Clone)]
pub struct SurrealTenantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch(&self, owner_user_id: Uuid, id: Uuid) -> Result<Tenant, DbError> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('tenant', $id) \
                 WHERE owner_user_id = $owner",
            )
            .bind(("id", id_str.clone()))
            .bind(("owner", owner_user_id.to_string()))
            .await?;

        let rows: Vec<TenantRow> = result.take(0)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        row.try_into_tenant(id)
    }
}

impl<C: Connection> TenantRepository for SurrealTenantRepository<C> {
    async fn create(&self, owner_user_id: Uuid, input: CreateTenant) -> RentbookResult<Tenant> {
        if input.name.trim().is_empty() {
            return Err(DbError::Validation("name is required".into()).into());
        }
        if input.apartment.trim().is_empty() {
            return Err(DbError::Validation("apartment is required".into()).into());
        }
        if input.unit_type.trim().is_empty() {
            return Err(DbError::Validation("unit_type is required".into()).into());
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('tenant', $id) SET \
                 owner_user_id = $owner, \
                 name = $name, apartment = $apartment, \
                 unit_type = $unit_type, \
                 monthly_rent = $monthly_rent, \
                 notes = $notes, \
                 payments = [], \
                 rent_history = []",
            )
            .bind(("id", id_str.clone()))
            .bind(("owner", owner_user_id.to_string()))
            .bind(("name", input.name))
            .bind(("apartment", input.apartment))
            .bind(("unit_type", input.unit_type))
            .bind(("monthly_rent", input.monthly_rent))
            .bind(("notes", input.notes.unwrap_or_default()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.try_into_tenant(id)?)
    }

    async fn get_by_id(&self, owner_user_id: Uuid, id: Uuid) -> RentbookResult<Tenant> {
        Ok(self.fetch(owner_user_id, id).await?)
    }

    async fn list(&self, owner_user_id: Uuid) -> RentbookResult<Vec<Tenant>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM tenant \
                 WHERE owner_user_id = $owner \
                 ORDER BY created_at ASC",
            )
            .bind(("owner", owner_user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRowWithId> = result.take(0).map_err(DbError::from)?;

        let tenants = rows
            .into_iter()
            .map(TenantRowWithId::try_into_tenant)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(tenants)
    }

    async fn update(
        &self,
        owner_user_id: Uuid,
        id: Uuid,
        input: UpdateTenant,
    ) -> RentbookResult<Tenant> {
        // Read-compare-write: the current rent decides whether this
        // update appends a rent-history entry.
        let current = self.fetch(owner_user_id, id).await?;

        let rent_changed = input
            .monthly_rent
            .is_some_and(|rent| rent != current.monthly_rent);

        if input.notes.is_none() && !rent_changed {
            return Ok(current);
        }

        let mut sets = Vec::new();
        if input.notes.is_some() {
            sets.push("notes = $notes");
        }
        if rent_changed {
            sets.push("monthly_rent = $monthly_rent");
            sets.push("rent_history += { amount: $monthly_rent, date: time::now() }");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('tenant', $id) SET {} \
             WHERE owner_user_id = $owner",
            sets.join(", ")
        );

        let id_str = id.to_string();
        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("owner", owner_user_id.to_string()));

        if let Some(notes) = input.notes {
            builder = builder.bind(("notes", notes));
        }
        if rent_changed {
            // rent_changed is only true when monthly_rent is Some.
            builder = builder.bind(("monthly_rent", input.monthly_rent.unwrap_or_default()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.try_into_tenant(id)?)
    }

    async fn append_payment(
        &self,
        owner_user_id: Uuid,
        id: Uuid,
        input: CreatePayment,
    ) -> RentbookResult<Tenant> {
        let id_str = id.to_string();
        let payment_id = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('tenant', $id) SET \
                 payments += { \
                     id: $payment_id, \
                     amount: $amount, \
                     date: $date, \
                     method: $method, \
                     paid_by: $paid_by, \
                     photo: $photo, \
                     created_at: time::now() \
                 }, \
                 updated_at = time::now() \
                 WHERE owner_user_id = $owner",
            )
            .bind(("id", id_str.clone()))
            .bind(("owner", owner_user_id.to_string()))
            .bind(("payment_id", payment_id))
            .bind(("amount", input.amount))
            .bind(("date", input.date.to_string()))
            .bind(("method", method_to_string(input.method).to_string()))
            .bind(("paid_by", input.paid_by))
            .bind(("photo", input.photo))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            id: id_str,
        })?;

        Ok(row.try_into_tenant(id)?)
    }

    async fn delete(&self, owner_user_id: Uuid, id: Uuid) -> RentbookResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "DELETE type::record('tenant', $id) \
                 WHERE owner_user_id = $owner \
                 RETURN BEFORE",
            )
            .bind(("id", id_str.clone()))
            .bind(("owner", owner_user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "tenant".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }
}
