use std::collections::BTreeMap;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use windowshop_domain::role::Role;

use crate::domain::repository::UserRepository;
use crate::domain::types::{CurrentUser, User};
use crate::error::{FieldErrors, StorefrontError};
use crate::infra::password::hash_password_async;

pub const MIN_PASSWORD_LEN: usize = 6;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, current: &CurrentUser) -> Result<User, StorefrontError> {
        self.repo
            .find_user(&current.key)
            .await?
            .ok_or(StorefrontError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, StorefrontError> {
        self.repo.list_users().await
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl CreateUserInput {
    /// Parse the new-user form. The password is never echoed back.
    pub fn parse(form: &BTreeMap<String, String>) -> Result<Self, StorefrontError> {
        let mut errors = FieldErrors::new();
        let text = |key: &str| form.get(key).map(|v| v.trim()).unwrap_or_default();

        let username = text("username");
        if username.is_empty() {
            errors.insert("username".into(), "must not be empty".into());
        }
        let password = form.get("password").map(String::as_str).unwrap_or_default();
        if password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password".into(),
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        let role = match text("role") {
            "" => Role::Customer,
            raw => raw.parse::<Role>().unwrap_or_else(|_| {
                errors.insert("role".into(), "unknown role".into());
                Role::Customer
            }),
        };
        let phone_number = text("phone_number");
        if phone_number.is_empty() {
            errors.insert("phone_number".into(), "must not be empty".into());
        }

        if !errors.is_empty() {
            let mut echo = form.clone();
            echo.remove("password");
            return Err(StorefrontError::validation(errors, echo));
        }
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
            role,
            first_name: text("first_name").to_owned(),
            last_name: text("last_name").to_owned(),
            phone_number: phone_number.to_owned(),
        })
    }
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, StorefrontError> {
        if self
            .repo
            .find_user_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(StorefrontError::UserAlreadyExists);
        }
        let user = User {
            key: Uuid::now_v7().to_string(),
            username: input.username,
            password_hash: hash_password_async(input.password).await?,
            role: input.role,
            first_name: input.first_name,
            last_name: input.last_name,
            phone_number: input.phone_number,
            is_active: true,
            created_at: Utc::now(),
        };
        self.repo.create_user(&user).await?;
        info!(user = %user.key, username = %user.username, role = %user.role, "user created");
        Ok(user)
    }
}

// ── ChangeUserRole ───────────────────────────────────────────────────────────

pub struct ChangeUserRoleUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ChangeUserRoleUseCase<R> {
    /// Checks, in order: self-change, missing role, unknown role, missing user.
    pub async fn execute(
        &self,
        actor: &CurrentUser,
        target_key: &str,
        new_role: Option<&str>,
    ) -> Result<Role, StorefrontError> {
        if actor.key == target_key {
            return Err(StorefrontError::SelfRoleChange);
        }
        let raw = new_role
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(StorefrontError::MissingData)?;
        let role = raw
            .parse::<Role>()
            .map_err(|e| StorefrontError::InvalidRole(e.0))?;

        if !self.repo.update_user_role(target_key, role).await? {
            return Err(StorefrontError::UserNotFound);
        }
        info!(actor = %actor.username, target = %target_key, role = %role, "role changed");
        Ok(role)
    }
}
