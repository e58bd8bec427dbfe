//! Domain aggregates exposed by the customer service layer.

pub mod customer;
pub mod location;
pub mod types;
