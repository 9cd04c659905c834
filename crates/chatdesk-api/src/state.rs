//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository/hasher/signer traits, but AppState
//! pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use chatdesk_core::chat::service::ChatService;
use chatdesk_core::service::account::AccountService;
use chatdesk_core::service::credentials::CredentialService;
use chatdesk_infra::config::{apply_env_overrides, load_config, resolve_data_dir};
use chatdesk_infra::crypto::password::Argon2PasswordHasher;
use chatdesk_infra::crypto::token::JwtTokenSigner;
use chatdesk_infra::sqlite::chat::SqliteChatRepository;
use chatdesk_infra::sqlite::pool::DatabasePool;
use chatdesk_infra::sqlite::user::SqliteUserRepository;
use chatdesk_types::config::AppConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteAccountService =
    AccountService<SqliteUserRepository, Argon2PasswordHasher, JwtTokenSigner>;

pub type ConcreteChatService = ChatService<SqliteChatRepository>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub account: Arc<ConcreteAccountService>,
    pub chat: Arc<ConcreteChatService>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        // Load config.toml, then let the environment override the signing key
        let mut config = load_config(&data_dir).await;
        apply_env_overrides(&mut config);
        if config.auth.uses_dev_key() {
            tracing::warn!(
                "Using the built-in development signing key; set CHATDESK_SECRET_KEY before exposing this server"
            );
        }

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("chatdesk.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        // Wire account service
        let account = AccountService::new(
            SqliteUserRepository::new(db_pool.clone()),
            CredentialService::new(
                Argon2PasswordHasher::new(),
                JwtTokenSigner::from_config(&config.auth),
            ),
        );

        // Wire chat service
        let chat = ChatService::new(SqliteChatRepository::new(db_pool.clone()));

        Ok(Self {
            account: Arc::new(account),
            chat: Arc::new(chat),
            config,
            data_dir,
            db_pool,
        })
    }
}
