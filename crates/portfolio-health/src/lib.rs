//! Asset health scoring for property management portfolios.
//!
//! [`portfolio::HealthEngine`] turns KPI history and open work orders into a
//! score, band and trend per asset. The remaining modules carry the service
//! plumbing around it.

pub mod config;
pub mod error;
pub mod plans;
pub mod portfolio;
pub mod telemetry;
