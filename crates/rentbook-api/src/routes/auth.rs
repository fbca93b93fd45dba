//! Registration and login endpoints (public).

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rentbook_auth::{LoginInput, RegisterInput};
use rentbook_core::models::user::UserPublic;
use rentbook_core::repository::{TenantRepository, UserRepository};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
}

pub async fn register<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Json(body): Json<Credentials>,
) -> Result<(StatusCode, Json<UserPublic>), ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let user = state
        .auth
        .register(RegisterInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login<U, T>(
    State(state): State<Arc<AppState<U, T>>>,
    Json(body): Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiError>
where
    U: UserRepository + 'static,
    T: TenantRepository + 'static,
{
    let output = state
        .auth
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        email: output.email,
    }))
}
