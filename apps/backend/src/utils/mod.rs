pub mod join_code;
pub mod retry;
