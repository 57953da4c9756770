//! Admin user management — creation, updates, role changes, listing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use photobank_auth::password::{PasswordHasher, PasswordPolicy};
use photobank_auth::rbac::require_role;
use photobank_core::error::AppError;
use photobank_core::result::AppResult;
use photobank_core::types::UserId;
use photobank_database::repositories::UserRepository;
use photobank_entity::user::{CreateUser, PublicUser, UpdateUser, UserRole};

use crate::account::NewAccount;
use crate::context::RequestContext;
use crate::validation::{require_present, validate};

/// Roles allowed to use this service.
const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Request to update a user. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New username.
    pub username: Option<String>,
    /// New email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct UserAdminService {
    /// User repository.
    users: Arc<dyn UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password policy.
    policy: PasswordPolicy,
}

impl UserAdminService {
    /// Creates a new admin user service.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<PasswordHasher>) -> Self {
        Self {
            users,
            hasher,
            policy: PasswordPolicy::new(),
        }
    }

    /// Lists all users.
    pub async fn list_users(&self, ctx: &RequestContext) -> AppResult<Vec<PublicUser>> {
        require_role(ADMIN_ONLY, ctx.role)?;

        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: UserId) -> AppResult<PublicUser> {
        require_role(ADMIN_ONLY, ctx.role)?;

        self.users
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates an account directly, without a confirmation mail.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        candidate: NewAccount,
        role: UserRole,
    ) -> AppResult<PublicUser> {
        require_role(ADMIN_ONLY, ctx.role)?;

        require_present(&candidate.username, "username")?;
        require_present(&candidate.email, "email")?;
        validate(&candidate)?;
        self.policy.check(&candidate.password)?;

        let password_hash = self.hasher.hash(&candidate.password).await?;

        let user = self
            .users
            .create(CreateUser {
                username: candidate.username,
                email: candidate.email,
                password_hash,
                role,
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            new_user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User created by admin"
        );

        Ok(user.into_public())
    }

    /// Applies a partial update to `user_id`.
    ///
    /// An admin may not change their own role. A request that omits the
    /// role, or restates the current one, is not a role change.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        req: UpdateUserRequest,
    ) -> AppResult<PublicUser> {
        require_role(ADMIN_ONLY, ctx.role)?;

        if ctx.user_id == user_id && req.role.is_some_and(|role| role != ctx.role) {
            return Err(AppError::forbidden("You cannot update your own role"));
        }

        validate(&req)?;

        let password_hash = match &req.password {
            Some(password) => {
                self.policy.check(password)?;
                Some(self.hasher.hash(password).await?)
            }
            None => None,
        };

        let changes = UpdateUser {
            username: req.username,
            email: req.email,
            password_hash,
            role: req.role,
        };

        let user = self
            .users
            .update(user_id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(
            admin_id = %ctx.user_id,
            target_id = %user_id,
            role = %user.role,
            password_changed = changes.password_hash.is_some(),
            "User updated by admin"
        );

        Ok(user.into_public())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photobank_core::error::ErrorKind;
    use photobank_database::memory::MemoryUserRepository;

    async fn seed(users: &MemoryUserRepository, username: &str, role: UserRole) -> PublicUser {
        users
            .create(CreateUser {
                username: username.to_string(),
                email: format!("{username}@x.com"),
                password_hash: "$argon2id$placeholder".to_string(),
                role,
            })
            .await
            .unwrap()
            .into_public()
    }

    fn service(users: &MemoryUserRepository) -> UserAdminService {
        UserAdminService::new(Arc::new(users.clone()), Arc::new(PasswordHasher::new()))
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let users = MemoryUserRepository::new();
        let alice = seed(&users, "alice", UserRole::User).await;
        let ctx = RequestContext::new(&alice);
        let service = service(&users);

        assert_eq!(
            service.list_users(&ctx).await.unwrap_err().kind,
            ErrorKind::Forbidden
        );
        assert_eq!(
            service.get_user(&ctx, alice.id).await.unwrap_err().kind,
            ErrorKind::Forbidden
        );
        let err = service
            .create_user(&ctx, NewAccount::new("bob", "b@x.com", "secret1"), UserRole::User)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_admin_cannot_change_own_role() {
        let users = MemoryUserRepository::new();
        let root = seed(&users, "root", UserRole::Admin).await;
        let ctx = RequestContext::new(&root);
        let service = service(&users);

        let demote = UpdateUserRequest {
            role: Some(UserRole::User),
            ..UpdateUserRequest::default()
        };
        let err = service.update_user(&ctx, root.id, demote).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        // restating the current role, or omitting it, is allowed
        let same = UpdateUserRequest {
            role: Some(UserRole::Admin),
            username: Some("root2".to_string()),
            ..UpdateUserRequest::default()
        };
        let updated = service.update_user(&ctx, root.id, same).await.unwrap();
        assert_eq!(updated.username, "root2");

        let email_only = UpdateUserRequest {
            email: Some("root@y.com".to_string()),
            ..UpdateUserRequest::default()
        };
        assert!(service.update_user(&ctx, root.id, email_only).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_validates_input() {
        let users = MemoryUserRepository::new();
        let root = seed(&users, "root", UserRole::Admin).await;
        let alice = seed(&users, "alice", UserRole::User).await;
        let ctx = RequestContext::new(&root);
        let service = service(&users);

        let short = UpdateUserRequest {
            password: Some("12345".to_string()),
            ..UpdateUserRequest::default()
        };
        let err = service.update_user(&ctx, alice.id, short).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::WeakCredential);

        let bad_email = UpdateUserRequest {
            email: Some("nope".to_string()),
            ..UpdateUserRequest::default()
        };
        let err = service.update_user(&ctx, alice.id, bad_email).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = service
            .update_user(&ctx, UserId::generate(), UpdateUserRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_password_update_is_hashed() {
        let users = MemoryUserRepository::new();
        let root = seed(&users, "root", UserRole::Admin).await;
        let alice = seed(&users, "alice", UserRole::User).await;
        let ctx = RequestContext::new(&root);

        let req = UpdateUserRequest {
            password: Some("newpass1".to_string()),
            ..UpdateUserRequest::default()
        };
        service(&users).update_user(&ctx, alice.id, req).await.unwrap();

        let stored = users.find_by_id(alice.id).await.unwrap().unwrap();
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert!(PasswordHasher::new()
            .verify_password("newpass1", &stored.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let users = MemoryUserRepository::new();
        let root = seed(&users, "root", UserRole::Admin).await;
        let ctx = RequestContext::new(&root);
        let service = service(&users);

        let bob = service
            .create_user(&ctx, NewAccount::new("bob", "b@x.com", "secret1"), UserRole::Admin)
            .await
            .unwrap();
        assert_eq!(bob.role, UserRole::Admin);
        assert!(!bob.email_confirmed);

        let all = service.list_users(&ctx).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(service.get_user(&ctx, bob.id).await.unwrap(), bob);
    }
}
