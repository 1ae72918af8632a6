//! # Storage Module
//!
//! Persistence for users, incomes and expenses behind the traits in
//! [`traits`]. The domain layer only sees those traits; [`SqliteConnection`]
//! backs the server and [`InMemoryConnection`] backs service tests.

pub mod traits;
pub mod sqlite;
pub mod memory;

pub use traits::{Connection, ExpenseStorage, IncomeStorage, UserStorage};
pub use sqlite::SqliteConnection;
pub use memory::InMemoryConnection;
