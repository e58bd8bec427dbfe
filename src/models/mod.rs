//! Database models shared across the customer repository.

pub mod config;
pub mod customer;
pub mod location;
