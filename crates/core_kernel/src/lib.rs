//! Core Kernel - Foundational types for the health portal backend
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Strongly typed identifiers
//! - The port error type and adapter health reporting
//! - The owned-resource capability that scopes data to its owning user
//! - Clock abstractions so wall-clock reads can be injected

pub mod identifiers;
pub mod ports;
pub mod access;
pub mod temporal;

pub use identifiers::{
    UserId, PolicyId, ClaimId, DocumentId, MedicalRecordId, ItemId,
};
pub use ports::{
    PortError, FieldError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use access::{Caller, OwnedResource, OwnedResourcePort, reveal};
pub use temporal::{Clock, SystemClock, FixedClock};
