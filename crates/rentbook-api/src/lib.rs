//! Rentbook API — the access-controlled HTTP gateway.
//!
//! Each request presents a token via the `Authorization: Bearer`
//! header. The middleware verifies it and attaches an [`AuthUser`]
//! extension; every repository operation is scoped to that verified
//! user. A verification failure short-circuits to 401 before any
//! repository call, and the repository re-derives ownership on every
//! operation regardless.

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use chrono::FixedOffset;
use rentbook_auth::AuthService;
use rentbook_core::repository::{TenantRepository, UserRepository};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use middleware::auth::AuthUser;

/// Shared state for all request handlers.
///
/// Generic over the repository traits so the gateway has no dependency
/// on the database crate.
pub struct AppState<U: UserRepository, T: TenantRepository> {
    pub auth: AuthService<U>,
    pub tenants: T,
    /// Fixed offset applied to UTC to derive "today" for dashboard
    /// reporting. Deliberately not the ambient system timezone.
    pub report_offset: FixedOffset,
}

/// Build the API router.
///
/// `/api/auth/*` is public; every other `/api` route sits behind the
/// bearer-token gate.
pub fn build_router<U, T>(state: Arc<AppState<U, T>>) -> Router
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register::<U, T>))
        .route("/login", post(routes::auth::login::<U, T>));

    let protected = Router::new()
        .route(
            "/tenants",
            get(routes::tenants::list_tenants::<U, T>)
                .post(routes::tenants::create_tenant::<U, T>),
        )
        .route(
            "/tenants/:id",
            get(routes::tenants::get_tenant::<U, T>)
                .put(routes::tenants::update_tenant::<U, T>)
                .delete(routes::tenants::delete_tenant::<U, T>),
        )
        .route(
            "/tenants/:id/payments",
            get(routes::tenants::list_payments::<U, T>)
                .post(routes::tenants::add_payment::<U, T>),
        )
        .route("/dashboard", get(routes::dashboard::get_dashboard::<U, T>))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth::<U, T>,
        ));

    let api = Router::new().nest("/auth", auth_routes).merge(protected);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
