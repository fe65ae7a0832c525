// Vitalog Data
// This crate handles access to the remote record store

// PostgREST client and store configuration
pub mod client;

// Repository implementations for record access
pub mod repository;

// Row models for the store's tables
pub mod models;
