//! Test suite for synadmin
//!
//! This module organizes all tests

pub mod common;
pub mod property;
