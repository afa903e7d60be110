//! # gamelink common library
//!
//! Shared code for the gamelink crates:
//! - Error type
//! - TOML configuration resolution and loading
//! - Logging bootstrap

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
