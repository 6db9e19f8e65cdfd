//! Party Domain
//!
//! Users of the portal and the personal data attached to them:
//!
//! - **Users and profiles**: account identity plus an optional bio and
//!   picture, created together at registration
//! - **Registration**: field validation, password confirmation and a
//!   pluggable password strength policy
//! - **Credentials**: PBKDF2 password hashing and verification
//! - **Medical history**: caller-scoped records of diagnosed conditions
//!
//! Account workflows (register, authenticate) live in [`AccountService`],
//! which sits on top of [`UserPort`].

pub mod user;
pub mod registration;
pub mod password;
pub mod medical;
pub mod service;
pub mod error;
pub mod ports;

pub use user::{User, Profile, UserChanges, NewAccount, StoredCredentials};
pub use registration::{RegistrationRequest, MAX_PASSWORD_LENGTH};
pub use password::{PasswordPolicy, DefaultPasswordPolicy, CredentialHasher};
pub use medical::{MedicalRecord, MedicalRecordDraft};
pub use service::AccountService;
pub use error::PartyError;
pub use ports::{UserPort, MedicalHistoryPort};
