pub mod use_finance_data;
pub mod use_notification;
pub mod use_users;

pub use use_finance_data::use_finance_data;
pub use use_notification::use_notification;
pub use use_users::use_users;
