pub mod auth;
pub mod health;
pub mod items;
pub mod upload;
pub mod users;
