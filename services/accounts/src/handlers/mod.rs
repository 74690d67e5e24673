pub mod admin;
pub mod confirmation;
pub mod health;
pub mod password;
pub mod profile;
pub mod registration;
pub mod response;
pub mod session;
