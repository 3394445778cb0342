pub mod action_adapter;
pub mod logout_action_builder;
