//! Core domain for the storefront service.
//!
//! This crate holds everything that does not talk to the outside world: the
//! partition-key/row-key table abstraction, the Product and Review domain
//! types with their pure operations, and the response envelope every service
//! operation returns.

pub mod catalog;
pub mod response;
pub mod review;
pub mod table;
