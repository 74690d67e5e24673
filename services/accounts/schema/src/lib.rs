//! sea-orm entities for the accounts service.

pub mod admins;
pub mod companies;
pub mod outbox_events;
pub mod users;
