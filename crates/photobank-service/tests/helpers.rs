//! Shared wiring for service integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use photobank_auth::jwt::TokenSigner;
use photobank_auth::password::PasswordHasher;
use photobank_core::config::AuthConfig;
use photobank_core::traits::MailDispatcher;
use photobank_database::memory::{
    MemoryProfileRepository, MemorySingleUseTokenRepository, MemoryUserRepository,
};
use photobank_database::repositories::UserRepository;
use photobank_entity::user::{CreateUser, PublicUser, UserRole};
use photobank_mailer::{MailOutbox, MemoryMailbox};
use photobank_service::{
    AccountService, AuthService, ProfileService, RequestContext, UserAdminService,
};

/// Every service wired to in-memory repositories and a capturing mailbox.
pub struct TestApp {
    pub users: MemoryUserRepository,
    pub tokens: MemorySingleUseTokenRepository,
    pub mailbox: MemoryMailbox,
    pub outbox: MailOutbox,
    pub hasher: Arc<PasswordHasher>,
    pub auth: AuthService,
    pub accounts: AccountService,
    pub admin: UserAdminService,
    pub profiles: ProfileService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_mailbox(MemoryMailbox::new())
    }

    pub fn with_mailbox(mailbox: MemoryMailbox) -> Self {
        let dispatcher: Arc<dyn MailDispatcher> = Arc::new(mailbox.clone());
        Self::build(mailbox, dispatcher)
    }

    /// Delivers through `dispatcher`; `mailbox` stays empty.
    pub fn with_dispatcher(dispatcher: Arc<dyn MailDispatcher>) -> Self {
        Self::build(MemoryMailbox::new(), dispatcher)
    }

    fn build(mailbox: MemoryMailbox, dispatcher: Arc<dyn MailDispatcher>) -> Self {
        let users = MemoryUserRepository::new();
        let tokens = MemorySingleUseTokenRepository::new();
        let profiles = MemoryProfileRepository::new();
        let outbox = MailOutbox::new(dispatcher);
        let hasher = Arc::new(PasswordHasher::new());
        let signer = Arc::new(TokenSigner::new(&AuthConfig::with_secret(
            "integration-test-secret",
        )));

        let auth = AuthService::new(Arc::new(users.clone()), hasher.clone(), signer);
        let accounts = AccountService::new(
            Arc::new(users.clone()),
            Arc::new(tokens.clone()),
            hasher.clone(),
            outbox.clone(),
        );
        let admin = UserAdminService::new(Arc::new(users.clone()), hasher.clone());
        let profiles = ProfileService::new(Arc::new(profiles), Arc::new(users.clone()));

        Self {
            users,
            tokens,
            mailbox,
            outbox,
            hasher,
            auth,
            accounts,
            admin,
            profiles,
        }
    }

    /// Inserts a user directly, bypassing registration.
    pub async fn create_user(&self, username: &str, password: &str, role: UserRole) -> PublicUser {
        self.users
            .create(CreateUser {
                username: username.to_string(),
                email: format!("{username}@x.com"),
                password_hash: self.hasher.hash(password).await.unwrap(),
                role,
            })
            .await
            .unwrap()
            .into_public()
    }

    /// `alice` / `secret1`, role `USER`.
    pub async fn create_test_user_default(&self) -> PublicUser {
        self.create_user("alice", "secret1", UserRole::User).await
    }

    pub fn context(&self, user: &PublicUser) -> RequestContext {
        RequestContext::new(user)
    }

    /// Token value from the most recent mail to `to`. Flushes the outbox first.
    pub async fn last_mailed_token(&self, to: &str) -> String {
        self.outbox.flush().await;
        let messages = self.mailbox.messages_to(to).await;
        let last = messages.last().expect("no mail sent");
        last.body
            .rsplit(": ")
            .next()
            .expect("mail body carries a token")
            .to_string()
    }
}
