//! Service wiring over PostgreSQL repositories.

use std::sync::Arc;

use photobank_auth::jwt::TokenSigner;
use photobank_auth::password::PasswordHasher;
use photobank_core::config::AppConfig;
use photobank_core::error::AppError;
use photobank_database::DatabasePool;
use photobank_database::repositories::{
    PgProfileRepository, PgSingleUseTokenRepository, PgUserRepository,
};
use photobank_mailer::{LogTransport, MailOutbox};
use photobank_service::{AccountService, AuthService, ProfileService, UserAdminService};

/// Every service, sharing one pool, hasher, signer, and outbox.
#[derive(Debug, Clone)]
pub struct App {
    pub db: DatabasePool,
    pub outbox: MailOutbox,
    pub auth: AuthService,
    pub accounts: AccountService,
    pub admin: UserAdminService,
    pub profiles: ProfileService,
}

impl App {
    /// Connects to the database and builds the services.
    pub async fn build(config: &AppConfig) -> Result<Self, AppError> {
        tracing::info!("Connecting to database...");
        let db = DatabasePool::connect(&config.database).await?;
        let pool = db.pool().clone();

        let users = Arc::new(PgUserRepository::new(pool.clone()));
        let tokens = Arc::new(PgSingleUseTokenRepository::new(pool.clone()));
        let profiles = Arc::new(PgProfileRepository::new(pool));

        let hasher = Arc::new(PasswordHasher::new());
        let signer = Arc::new(TokenSigner::new(&config.auth));
        let outbox = MailOutbox::new(Arc::new(LogTransport::new(&config.mailer)));

        Ok(Self {
            auth: AuthService::new(users.clone(), hasher.clone(), signer),
            accounts: AccountService::new(users.clone(), tokens, hasher.clone(), outbox.clone()),
            admin: UserAdminService::new(users.clone(), hasher),
            profiles: ProfileService::new(profiles, users),
            outbox,
            db,
        })
    }

    /// Waits for queued mail and closes the pool.
    pub async fn shutdown(&self) {
        self.outbox.flush().await;
        self.db.close().await;
    }
}
