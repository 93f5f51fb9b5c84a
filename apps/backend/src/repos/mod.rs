//! Repository functions: adapters plus `DbErr` -> `DomainError` mapping.

pub mod games;
