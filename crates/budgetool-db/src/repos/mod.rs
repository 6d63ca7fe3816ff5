//! Repository implementations

mod budget;
mod transaction;
mod user;

pub use budget::BudgetRepo;
pub use transaction::TransactionRepo;
pub use user::UserRepo;
