pub mod client;
pub mod logout_outcome;
pub mod logout_policy;
pub mod profile;
