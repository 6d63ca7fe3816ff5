//! JSON route handlers

pub mod auth;
pub mod budget;
pub mod health;
pub mod transaction;
pub mod user;
