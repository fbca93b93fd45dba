//! Tenant CRUD and payment endpoints (auth required).

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use rentbook_core::finance;
use rentbook_core::models::tenant::{CreatePayment, CreateTenant, Tenant, UpdateTenant};
use rentbook_core::repository::{TenantRepository, UserRepository};
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

/// A tenant as serialized to the client, with its derived balance
/// attached. The balance is recomputed from the payment log on every
/// response; it is never read from storage.
#[derive(Debug, Serialize)]
pub struct TenantBody {
    #[serde(flatten)]
    pub tenant: Tenant,
    pub balance: f64,
}

impl From<Tenant> for TenantBody {
    fn from(tenant: Tenant) -> Self {
        let balance = finance::balance(&tenant);
        Self { tenant, balance }
    }
}

pub async fn list_tenants<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
) -> Result<Json<Vec<TenantBody>>, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let tenants = state.tenants.list(owner).await?;
    Ok(Json(tenants.into_iter().map(TenantBody::from).collect()))
}

pub async fn get_tenant<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<TenantBody>, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let tenant = state.tenants.get_by_id(owner, id).await?;
    Ok(Json(tenant.into()))
}

pub async fn create_tenant<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    Json(body): Json<CreateTenant>,
) -> Result<(StatusCode, Json<TenantBody>), ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let tenant = state.tenants.create(owner, body).await?;
    Ok((StatusCode::CREATED, Json(tenant.into())))
}

pub async fn update_tenant<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTenant>,
) -> Result<Json<TenantBody>, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let tenant = state.tenants.update(owner, id, body).await?;
    Ok(Json(tenant.into()))
}

/// The tenant's payment history grouped by calendar month, most
/// recent month first — the shape the payment-history view renders.
pub async fn list_payments<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<finance::MonthlyGroup>>, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let tenant = state.tenants.get_by_id(owner, id).await?;
    Ok(Json(finance::group_payments_by_month(&tenant.payments)))
}

pub async fn add_payment<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreatePayment>,
) -> Result<(StatusCode, Json<TenantBody>), ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    if body.amount <= 0.0 {
        return Err(ApiError::bad_request(
            "Payment amount must be greater than zero",
        ));
    }
    if body.paid_by.trim().is_empty() {
        return Err(ApiError::bad_request("paid_by is required"));
    }

    let tenant = state.tenants.append_payment(owner, id, body).await?;
    Ok((StatusCode::CREATED, Json(tenant.into())))
}

pub async fn delete_tenant<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    state.tenants.delete(owner, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
