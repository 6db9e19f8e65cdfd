//! Request handlers

pub mod account;
pub mod claims;
pub mod health;
pub mod items;
pub mod medical;
pub mod policy;
