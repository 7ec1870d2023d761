pub(crate) mod accounts;
pub(crate) mod auth;
pub(crate) mod balance;
pub(crate) mod health;
pub(crate) mod transactions;
pub(crate) mod users;
