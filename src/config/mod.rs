//! Configuration module for BudgetLens
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LensPaths;
pub use settings::Settings;
