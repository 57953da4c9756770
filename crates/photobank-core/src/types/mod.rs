//! Core type definitions used across the Photobank workspace.

pub mod id;

pub use id::*;
