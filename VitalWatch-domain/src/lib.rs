// VitalWatch Domain
// This crate contains the business logic for the vitals alert pipeline

// Services that implement business logic
pub mod services;

// Messaging provider abstraction
pub mod messaging;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the repository module from the data layer for convenience
pub use vital_watch_data::repository;

// Testing utilities - only available with mock feature
#[cfg(feature = "mock")]
pub mod testing;
