//! Domain types shared across Roster services.
//!
//! Pure types and rules: ids, enums, validation and its messages, and the
//! company-id allocator. No framework or database dependencies.

pub mod allocator;
pub mod id;
pub mod messages;
pub mod user;
pub mod validation;
