//! CLI command definitions and dispatch.

use clap::{Parser, Subcommand};

use photobank_core::config::AppConfig;
use photobank_core::error::AppError;
use photobank_core::types::UserId;
use photobank_entity::user::UserRole;
use photobank_service::{NewAccount, RequestContext, UpdateUserRequest};

use crate::app::App;
use crate::output;

/// Photobank identity administration
#[derive(Debug, Parser)]
#[command(name = "photobank", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment; selects `config/<env>.toml`
    #[arg(short, long, env = "PHOTOBANK_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Register a new account and send its confirmation token
    Register {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log in by username or email and print the token pair
    Login {
        /// Username or email
        identifier: String,
        #[arg(short, long)]
        password: String,
    },
    /// Exchange a refresh token for a new access token
    Refresh {
        /// Refresh token
        token: String,
    },
    /// Redeem an email confirmation token
    ConfirmEmail {
        /// Confirmation token
        token: String,
    },
    /// Request a password reset token by username or email
    RequestReset {
        /// Username or email
        identifier: String,
    },
    /// Redeem a password reset token with a new password
    ResetPassword {
        /// Reset token
        token: String,
        #[arg(short, long)]
        password: String,
    },
    /// Show the account behind an access token
    Whoami {
        /// Access token
        #[arg(short, long)]
        token: String,
    },
    /// Show the profile of the account behind an access token
    Profile {
        /// Access token
        #[arg(short, long)]
        token: String,
    },
    /// Change a user's role (requires an admin access token)
    SetRole {
        /// Admin access token
        #[arg(short, long)]
        token: String,
        /// Target user ID
        user_id: UserId,
        /// New role (USER or ADMIN)
        role: UserRole,
    },
    /// Apply pending database migrations
    Migrate,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let app = App::build(config).await?;
        let result = self.dispatch(&app).await;
        app.shutdown().await;
        result
    }

    async fn dispatch(&self, app: &App) -> Result<(), AppError> {
        match &self.command {
            Commands::Register {
                username,
                email,
                password,
            } => {
                let user = app
                    .accounts
                    .register(NewAccount::new(username, email, password))
                    .await?;
                output::print_item(&user);
            }
            Commands::Login {
                identifier,
                password,
            } => {
                let login = app.auth.login(identifier, password).await?;
                output::print_item(&login);
            }
            Commands::Refresh { token } => {
                let issued = app.auth.refresh(token).await?;
                output::print_item(&issued);
            }
            Commands::ConfirmEmail { token } => {
                app.accounts.confirm_email(token).await?;
                output::print_success("Email confirmed");
            }
            Commands::RequestReset { identifier } => {
                app.accounts.request_password_reset(identifier).await?;
                output::print_success("If the account exists, a reset token has been sent");
            }
            Commands::ResetPassword { token, password } => {
                let user = app.accounts.confirm_password_reset(token, password).await?;
                output::print_item(&user);
            }
            Commands::Whoami { token } => {
                let user = app.auth.authenticate(token).await?;
                output::print_item(&user);
            }
            Commands::Profile { token } => {
                let user = app.auth.authenticate(token).await?;
                let profile = app.profiles.get_own(&RequestContext::new(&user)).await?;
                output::print_item(&profile);
            }
            Commands::SetRole {
                token,
                user_id,
                role,
            } => {
                let actor = app.auth.authenticate(token).await?;
                let request = UpdateUserRequest {
                    role: Some(*role),
                    ..UpdateUserRequest::default()
                };
                let user = app
                    .admin
                    .update_user(&RequestContext::new(&actor), *user_id, request)
                    .await?;
                output::print_item(&user);
            }
            Commands::Migrate => {
                app.db.migrate().await?;
                output::print_success("Migrations applied");
            }
        }
        Ok(())
    }
}
