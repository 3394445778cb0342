pub mod logout_service;
pub mod tracing;

pub use crate::tracing::init_tracing;
pub use logout_service::LogoutService;
