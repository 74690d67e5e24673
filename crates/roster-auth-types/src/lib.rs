//! Session types shared across Roster services.
//!
//! Provides session-token issuing and validation, cookie builders, and the
//! `UserSession` / `AdminSession` extractors.

pub mod cookie;
pub mod session;
pub mod token;
