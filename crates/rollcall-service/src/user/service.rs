//! User self-service operations: registration, login, profile, password.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use rollcall_auth::jwt::{IssuedToken, JwtEncoder};
use rollcall_auth::password::PasswordHasher;
use rollcall_core::config::AuthConfig;
use rollcall_core::error::AppError;
use rollcall_core::result::AppResult;
use rollcall_database::repositories::UserRepository;
use rollcall_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;

/// Handles registration, login, and self-service profile operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token encoder.
    encoder: Arc<JwtEncoder>,
    /// Auth policy knobs (password length).
    auth_config: AuthConfig,
}

/// Data for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Email address (login identity).
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Trade label.
    pub trade: String,
    /// Department label; falls back to the trade when omitted or blank.
    pub department: Option<String>,
    /// Roll/registration number.
    pub roll_no: String,
}

/// A successful registration or login: the user plus their bearer token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutcome {
    /// The authenticated user.
    pub user: User,
    /// The issued bearer token.
    pub token: IssuedToken,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            auth_config,
        }
    }

    /// Registers a new standard account and logs it in.
    ///
    /// Duplicate email or roll number surfaces as `Conflict` from the
    /// repository's constraint mapping, not as a pre-check race.
    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthOutcome> {
        self.validate_registration(&req)?;

        let password_hash = self.hasher.hash_password(&req.password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                name: req.name.trim().to_string(),
                email: req.email.trim().to_lowercase(),
                password_hash,
                trade: req.trade.trim().to_string(),
                department: req.department,
                roll_no: req.roll_no.trim().to_string(),
                role: UserRole::Standard,
            })
            .await?;

        info!(user_id = %user.id, roll_no = %user.roll_no, "User registered");

        let token = self.encoder.issue(&user)?;
        Ok(AuthOutcome { user, token })
    }

    /// Authenticates a user by email and password.
    ///
    /// Unknown email, wrong password, and deactivated accounts all fail
    /// with the same `InvalidCredentials` error so responses cannot be
    /// used to probe which emails exist.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthOutcome> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(AppError::invalid_credentials)?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::invalid_credentials());
        }

        if !user.can_login() {
            return Err(AppError::invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in");

        let token = self.encoder.issue(&user)?;
        Ok(AuthOutcome { user, token })
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<User> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(&self, ctx: &RequestContext, data: UpdateUser) -> AppResult<User> {
        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name cannot be empty"));
            }
        }
        if let Some(trade) = &data.trade {
            if trade.trim().is_empty() {
                return Err(AppError::validation("Trade cannot be empty"));
            }
        }

        let user = self.user_repo.update(ctx.user_id, &data).await?;
        info!(user_id = %ctx.user_id, "Profile updated");
        Ok(user)
    }

    /// Changes the current user's password after verifying the old one.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.get_profile(ctx).await?;

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        self.check_password_policy(new_password)?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.user_repo
            .update_password(ctx.user_id, &password_hash)
            .await?;

        info!(user_id = %ctx.user_id, "Password changed");
        Ok(())
    }

    fn validate_registration(&self, req: &RegisterRequest) -> AppResult<()> {
        let mut fields = Vec::new();

        if req.name.trim().is_empty() {
            fields.push("name".to_string());
        }
        if !req.email.contains('@') || !req.email.contains('.') {
            fields.push("email".to_string());
        }
        if req.trade.trim().is_empty() {
            fields.push("trade".to_string());
        }
        if req.roll_no.trim().is_empty() {
            fields.push("roll_no".to_string());
        }
        if self.check_password_policy(&req.password).is_err() {
            fields.push("password".to_string());
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation_fields(
                "Registration data is invalid",
                fields,
            ))
        }
    }

    fn check_password_policy(&self, password: &str) -> AppResult<()> {
        if password.len() < self.auth_config.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.auth_config.password_min_length
            )));
        }
        Ok(())
    }
}
