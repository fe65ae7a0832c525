// Vitalog Domain
// This crate contains the business logic for the Vitalog service

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Health checks and system status
pub mod health;

// Re-export the repository module from vitalog-data for convenience
pub use vitalog_data::repository;
