//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - A wiremock-backed admin API server
//! - JSON fixtures for admin API records
//! - Custom assertion macros

pub mod assertions;
pub mod fixtures;
pub mod mock_admin;

// Re-export commonly used utilities
pub use fixtures::*;
pub use mock_admin::*;
