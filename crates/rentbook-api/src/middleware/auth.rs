//! Authentication middleware.
//!
//! Extracts the bearer token, verifies it, and attaches the resulting
//! [`AuthUser`] to the request. The repository layer is never reached
//! with an unverified identity.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use rentbook_auth::AuthError;
use rentbook_core::repository::{TenantRepository, UserRepository};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// The verified identity of the caller, inserted as a request
/// extension by [`require_auth`].
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Reject the request with 401 unless it carries a valid bearer token.
pub async fn require_auth<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| {
            let (scheme, rest) = header.split_once(' ')?;
            scheme
                .eq_ignore_ascii_case("bearer")
                .then(|| rest.trim())
        })
        .filter(|token| !token.is_empty());

    let Some(token) = token else {
        return Err(AuthError::TokenMissing.into());
    };

    let user_id = state.auth.verify_token(token)?;
    request.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(request).await)
}
