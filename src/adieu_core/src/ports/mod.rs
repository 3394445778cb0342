pub mod registry;
pub mod session_store;
