//! Shared integration-test helpers.

pub mod parse_helpers;
