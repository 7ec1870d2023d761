pub mod account_queries;
pub mod balance_history_queries;
pub mod transaction_queries;
pub mod user_queries;
