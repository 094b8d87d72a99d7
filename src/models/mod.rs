//! Data models for the lending server

pub mod author;
pub mod book;
pub mod borrower;
pub mod transaction;

// Re-export commonly used types
pub use author::{Author, CreateAuthor};
pub use book::{Book, CreateBook};
pub use borrower::{Borrower, CreateBorrower};
pub use transaction::{CreateTransaction, Transaction, TransactionType};
