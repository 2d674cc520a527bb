//! HTTP handlers for the Kisan Express advisory API

pub mod advisory;
pub mod expert;
pub mod health;
pub mod weather;

pub use advisory::*;
pub use expert::*;
pub use health::*;
pub use weather::*;
