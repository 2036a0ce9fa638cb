//! Configuration module for the till ledger
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::TillPaths;
pub use settings::Settings;
