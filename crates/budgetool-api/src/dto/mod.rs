//! Request and response bodies for the JSON surface

pub mod auth;
pub mod budget;
pub mod transaction;
pub mod user;

pub use auth::*;
pub use budget::*;
pub use transaction::*;
pub use user::*;
