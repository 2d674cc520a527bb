//! Domain models for the Kisan Express advisory platform

mod advisory;
mod query;
mod weather;

pub use advisory::*;
pub use query::*;
pub use weather::*;
