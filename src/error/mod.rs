pub mod config;
pub mod init;
pub mod log_init;
pub mod transport;
