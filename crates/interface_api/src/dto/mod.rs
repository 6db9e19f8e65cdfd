//! Request and response bodies that differ from the domain types

pub mod auth;
pub mod claims;
pub mod policy;
