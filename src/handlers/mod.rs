//! HTTP request handlers

pub mod health;
pub mod trades;

pub use health::HealthHandlers;
pub use trades::TradeHandlers;
