pub mod builders;
pub mod config;
pub mod handlers;
pub mod persistence;
