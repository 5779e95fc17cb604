pub mod analyzing;
pub mod auth;
pub mod dashboard;
pub mod login;
pub mod upload;
