pub mod account_service;
pub mod balance;
pub mod balance_history_service;
pub mod transaction_service;
pub mod user_service;
