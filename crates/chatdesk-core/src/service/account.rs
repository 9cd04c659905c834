//! Account management service.
//!
//! Orchestrates registration, login, and bearer-token authentication over
//! the user repository and the credential service.

use chatdesk_types::auth::AccessToken;
use chatdesk_types::error::{AccountError, RepositoryError};
use chatdesk_types::user::{RegisterRequest, User, UserId};
use tracing::info;

use crate::repository::user::UserRepository;
use crate::service::credentials::CredentialService;
use crate::service::hasher::PasswordHasher;
use crate::service::token::TokenSigner;

/// Service orchestrating the account lifecycle.
///
/// Generic over repository and credential traits to maintain clean
/// architecture -- chatdesk-core never depends on chatdesk-infra.
pub struct AccountService<U: UserRepository, H: PasswordHasher, S: TokenSigner> {
    user_repo: U,
    credentials: CredentialService<H, S>,
}

impl<U: UserRepository, H: PasswordHasher, S: TokenSigner> AccountService<U, H, S> {
    /// Create a new AccountService.
    pub fn new(user_repo: U, credentials: CredentialService<H, S>) -> Self {
        Self {
            user_repo,
            credentials,
        }
    }

    /// Access the user repository.
    pub fn user_repo(&self) -> &U {
        &self.user_repo
    }

    /// Register a new account.
    ///
    /// The password is hashed before anything touches storage; a taken
    /// username surfaces as `UsernameTaken` via the repository's UNIQUE
    /// constraint, with no separate existence pre-check.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, AccountError> {
        let password_hash = self.credentials.hash_password(&request.password)?;
        let user = User {
            id: UserId::new(),
            username: request.username,
            email: request.email,
            password_hash,
            created_at: chrono::Utc::now(),
        };

        let user = self.user_repo.insert(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AccountError::UsernameTaken(user.username.clone()),
            other => AccountError::Storage(other.to_string()),
        })?;

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Log in with username and password, returning a bearer token.
    ///
    /// Unknown usernames and wrong passwords are deliberately
    /// indistinguishable: both produce `InvalidCredentials`.
    pub async fn login(&self, username: &str, password: &str) -> Result<AccessToken, AccountError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self
            .credentials
            .verify_password(password, &user.password_hash)?
        {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.credentials.issue_token(&user.username)?;
        info!(user_id = %user.id, "User logged in");
        Ok(AccessToken::bearer(token))
    }

    /// Resolve a bearer token to the account it belongs to.
    ///
    /// The token subject is the username. A valid signature whose subject no
    /// longer maps to a user is treated the same as bad credentials.
    pub async fn authenticate(&self, token: &str) -> Result<User, AccountError> {
        let subject = self.credentials.validate_token(token)?;

        self.user_repo
            .find_by_username(&subject)
            .await
            .map_err(|e| AccountError::Storage(e.to_string()))?
            .ok_or(AccountError::InvalidCredentials)
    }
}
