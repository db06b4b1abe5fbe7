//! Property-based tests

mod encoding_proptest;
mod views_proptest;
