//! Web plumbing shared by Roster services: errors, health probes, request ids,
//! tracing setup, config loading and serde helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
