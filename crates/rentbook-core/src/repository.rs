//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant operations require the
//! `owner_user_id` of the verified caller to enforce data isolation: a
//! lookup with the wrong owner is indistinguishable from a lookup of a
//! record that does not exist.

use uuid::Uuid;

use crate::error::RentbookResult;
use crate::models::{
    tenant::{CreatePayment, CreateTenant, Tenant, UpdateTenant},
    user::{CreateUser, User},
};

pub trait UserRepository: Send + Sync {
    /// Create a user. The raw password in [`CreateUser`] is hashed
    /// before storage; the plaintext is never persisted.
    fn create(&self, input: CreateUser) -> impl Future<Output = RentbookResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = RentbookResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = RentbookResult<User>> + Send;
}

pub trait TenantRepository: Send + Sync {
    /// Create a tenant owned by `owner_user_id`, with empty payment and
    /// rent-history logs.
    fn create(
        &self,
        owner_user_id: Uuid,
        input: CreateTenant,
    ) -> impl Future<Output = RentbookResult<Tenant>> + Send;

    fn get_by_id(
        &self,
        owner_user_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = RentbookResult<Tenant>> + Send;

    /// All tenants owned by `owner_user_id`, in insertion order.
    fn list(
        &self,
        owner_user_id: Uuid,
    ) -> impl Future<Output = RentbookResult<Vec<Tenant>>> + Send;

    /// Update notes and/or monthly rent. A monthly-rent value that
    /// differs from the current one appends a rent-history entry
    /// stamped now; an equal value appends nothing.
    fn update(
        &self,
        owner_user_id: Uuid,
        id: Uuid,
        input: UpdateTenant,
    ) -> impl Future<Output = RentbookResult<Tenant>> + Send;

    /// Append a payment to the tenant's log and return the updated
    /// tenant. Amount positivity is validated at the input boundary,
    /// not here.
    fn append_payment(
        &self,
        owner_user_id: Uuid,
        id: Uuid,
        input: CreatePayment,
    ) -> impl Future<Output = RentbookResult<Tenant>> + Send;

    /// Hard-delete the tenant and its embedded logs.
    fn delete(
        &self,
        owner_user_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = RentbookResult<()>> + Send;
}
