//! Core types and services for vacay
//!
//! Configuration, logging, the error type shared by every crate, and the
//! TTL-bounded session cache that keeps one conversation alive per user.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod utils;

pub use error::{Error, Result};
