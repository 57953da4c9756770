//! Registration, email confirmation, and password reset.

pub mod request;
pub mod service;

pub use request::NewAccount;
pub use service::AccountService;
