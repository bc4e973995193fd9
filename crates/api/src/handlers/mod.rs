pub mod auth;
pub mod riders;
pub mod teams;
