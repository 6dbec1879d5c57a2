//! Core types and utilities shared by the handheld console crates.

pub mod config;
pub mod error;

pub use config::*;
pub use error::{Error, Result};
