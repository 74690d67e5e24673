//! Test utilities for Roster services.
//!
//! Provides sequenced user factories and session-cookie helpers.
//! Import in `#[cfg(test)]` blocks and integration tests only.

pub mod factory;
pub mod session;
