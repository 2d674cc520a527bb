//! Shared types and models for the Kisan Express advisory platform
//!
//! This crate contains the wire types exchanged between the backend and
//! any client of the advisory API.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
