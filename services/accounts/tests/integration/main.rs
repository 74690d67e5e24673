
mod admin_test;
mod confirmation_test;
mod http_test;
mod password_test;
mod registration_test;
