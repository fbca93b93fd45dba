//! Collection dashboard endpoint (auth required).

use std::sync::Arc;

use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::Utc;
use rentbook_core::finance::{self, DashboardSummary};
use rentbook_core::repository::{TenantRepository, UserRepository};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::AppState;

/// Aggregate collection figures for the caller's portfolio, anchored
/// to the current calendar month in the configured reporting offset.
pub async fn get_dashboard<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
) -> Result<Json<DashboardSummary>, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let tenants = state.tenants.list(owner).await?;
    let today = Utc::now().with_timezone(&state.report_offset).date_naive();
    Ok(Json(finance::dashboard_summary(&tenants, today)))
}
