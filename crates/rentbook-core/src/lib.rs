//! Rentbook Core — domain models, error taxonomy, repository trait
//! definitions, and the pure financial calculator.
//!
//! This crate performs no I/O. Persistence lives in `rentbook-db`,
//! authentication in `rentbook-auth`, and the HTTP surface in
//! `rentbook-api`.

pub mod error;
pub mod finance;
pub mod models;
pub mod repository;

pub use error::{RentbookError, RentbookResult};
