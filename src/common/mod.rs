pub mod axum_ip;
pub mod context;
pub mod env;
pub mod error;
pub mod extract;
pub mod init;
pub mod raw_field;
pub mod state;
