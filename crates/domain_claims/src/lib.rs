//! Claims Domain
//!
//! A claim is a request for reimbursement filed by a user against one of
//! their own policies. Claims carry supporting documents and move through a
//! small status lifecycle:
//!
//! ```text
//! pending -> approved
//!         \-> rejected
//! ```
//!
//! The processing history shown to the claimant is not stored; it is derived
//! on read by [`timeline::derive_timeline`] from the claim's timestamps and
//! status.

pub mod claim;
pub mod document;
pub mod timeline;
pub mod error;
pub mod ports;

pub use claim::{Claim, ClaimFields, ClaimStatus, ClaimSubmission};
pub use document::{Attachment, Document, DEFAULT_DOCUMENT_TYPE};
pub use timeline::{derive_timeline, Actor, Milestone, TimelineEvent};
pub use error::ClaimError;
pub use ports::ClaimPort;
