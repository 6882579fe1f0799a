pub mod config;
pub mod init;
pub mod rules;
pub mod scan;
