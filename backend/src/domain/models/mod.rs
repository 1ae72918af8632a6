pub mod user;
pub mod income;
pub mod expense;
pub mod balance;
