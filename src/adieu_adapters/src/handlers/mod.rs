pub mod logout;

pub use logout::{handle_logout, handle_logout_with_url_policy};
