//! Authentication service — registration, login, and token
//! verification orchestration.

use rentbook_core::error::{RentbookError, RentbookResult};
use rentbook_core::models::user::{CreateUser, UserPublic};
use rentbook_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed JWT bearer token.
    pub token: String,
    /// Email of the authenticated user.
    pub email: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new landlord account and return its public
    /// projection. The password hash never leaves the repository.
    pub async fn register(&self, input: RegisterInput) -> RentbookResult<UserPublic> {
        if input.email.is_empty() {
            return Err(RentbookError::Validation {
                message: "Email is required".into(),
            });
        }
        if input.password.len() < self.config.min_password_length {
            return Err(RentbookError::Validation {
                message: format!(
                    "Password must be at least {} characters long",
                    self.config.min_password_length
                ),
            });
        }

        // Unique index on email is the backstop; this check turns the
        // common case into a clean conflict error.
        match self.user_repo.get_by_email(&input.email).await {
            Ok(_) => {
                return Err(RentbookError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(RentbookError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let user = self
            .user_repo
            .create(CreateUser {
                email: input.email,
                password: input.password,
            })
            .await?;

        Ok(UserPublic::from(&user))
    }

    /// Authenticate with email + password and issue a bearer token.
    ///
    /// An unknown email and a wrong password produce the same error,
    /// so a caller cannot probe which addresses are registered.
    pub async fn login(&self, input: LoginInput) -> RentbookResult<LoginOutput> {
        let user = self
            .user_repo
            .get_by_email(&input.email)
            .await
            .map_err(|_| AuthError::InvalidCredentials)?;

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = token::issue_access_token(user.id, &user.email, &self.config)?;

        Ok(LoginOutput {
            token,
            email: user.email,
            expires_in: self.config.token_lifetime_secs,
        })
    }

    /// Verify a bearer token and return the authenticated user ID.
    ///
    /// Side-effect-free: depends only on the token, the clock, and the
    /// configured secret.
    pub fn verify_token(&self, token: &str) -> Result<Uuid, AuthError> {
        let claims = token::validate_access_token(token, &self.config)?;
        Uuid::parse_str(&claims.0.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject: {e}")))
    }
}
