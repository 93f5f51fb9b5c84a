//! Domain services composed from repos. Generic over the connection so
//! handlers pass a transaction and tests may pass a bare pool.

pub mod games;
pub mod join_codes;
