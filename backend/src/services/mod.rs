//! Business logic services for the Kisan Express advisory backend

pub mod advisory;
pub mod expert;
pub mod weather;

pub use advisory::AdvisoryService;
pub use expert::ExpertService;
pub use weather::WeatherService;
