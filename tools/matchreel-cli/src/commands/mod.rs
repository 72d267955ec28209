pub mod config;
pub mod info;
pub mod init;
pub mod resolve;
pub mod simulate;
pub mod validate;
