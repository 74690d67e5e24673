pub mod admin;
pub mod confirmation;
pub mod password;
pub mod profile;
pub mod registration;
pub mod session;
pub mod token;
