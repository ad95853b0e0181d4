//! Repair estimate fair-price judgement: the judgement engine, the estimate workflow around
//! it, and the shared configuration, error, and telemetry plumbing used by the API service.

pub mod config;
pub mod error;
pub mod estimates;
pub mod judgement;
pub mod telemetry;
