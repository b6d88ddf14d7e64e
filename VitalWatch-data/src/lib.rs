// VitalWatch Data
// This crate handles data access for vitals readings, alerts and contacts

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
