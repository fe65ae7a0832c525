pub mod health;
pub mod readings;
pub mod statistics;
