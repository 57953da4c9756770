//! [`MailDispatcher`](photobank_core::traits::MailDispatcher) implementations.

pub mod log;
pub mod memory;

pub use log::LogTransport;
pub use memory::MemoryMailbox;
