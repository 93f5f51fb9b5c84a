//! Environment-driven configuration.

pub mod db;
pub mod join_codes;
pub mod server;
