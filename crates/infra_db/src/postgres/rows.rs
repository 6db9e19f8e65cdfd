//! Row types and their conversion into domain models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use domain_catalog::Item;
use domain_claims::{Claim, ClaimStatus, Document};
use domain_party::{MedicalRecord, Profile, User};
use domain_policy::{CoverageDetails, Exclusions, Policy};

use crate::error::DatabaseError;

pub(crate) const USER_COLUMNS: &str = "u.id, u.username, u.email, u.first_name, u.last_name, \
     u.date_joined, p.bio, p.profile_picture, p.created_at AS profile_created_at";

pub(crate) const POLICY_COLUMNS: &str = "id, policy_number, coverage_details, exclusions, \
     start_date, end_date, document_url, user_id, created_at, updated_at";

pub(crate) const CLAIM_COLUMNS: &str = "id, treatment, treatment_date, cause, status, \
     treatment_money, user_id, policy_id, created_at, updated_at";

pub(crate) const DOCUMENT_COLUMNS: &str =
    "id, claim_id, document_type, file_path, created_at, updated_at";

pub(crate) const MEDICAL_COLUMNS: &str =
    "id, condition, diagnosis_date, treatment, user_id, created_at, updated_at";

pub(crate) const ITEM_COLUMNS: &str = "id, name, description, created_at";

/// A user joined with their profile
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub date_joined: DateTime<Utc>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub profile_created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id.into(),
            username: row.username,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            profile: Profile {
                bio: row.bio,
                profile_picture: row.profile_picture,
                created_at: row.profile_created_at,
            },
            date_joined: row.date_joined,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct CredentialsRow {
    pub id: Uuid,
    pub password_hash: String,
}

#[derive(Debug, FromRow)]
pub(crate) struct PolicyRow {
    pub id: Uuid,
    pub policy_number: String,
    pub coverage_details: Json<CoverageDetails>,
    pub exclusions: Json<Exclusions>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub document_url: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PolicyRow> for Policy {
    fn from(row: PolicyRow) -> Self {
        Policy {
            id: row.id.into(),
            policy_number: row.policy_number,
            coverage_details: row.coverage_details.0,
            exclusions: row.exclusions.0,
            start_date: row.start_date,
            end_date: row.end_date,
            document_url: row.document_url,
            user_id: row.user_id.into(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ClaimRow {
    pub id: Uuid,
    pub treatment: String,
    pub treatment_date: DateTime<Utc>,
    pub cause: Option<String>,
    pub status: String,
    pub treatment_money: Option<Decimal>,
    pub user_id: Uuid,
    pub policy_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClaimRow {
    pub fn into_claim(self, documents: Vec<Document>) -> Result<Claim, DatabaseError> {
        let status: ClaimStatus = self
            .status
            .parse()
            .map_err(|e: domain_claims::ClaimError| DatabaseError::SerializationError(e.to_string()))?;

        Ok(Claim {
            id: self.id.into(),
            treatment: self.treatment,
            treatment_date: self.treatment_date,
            cause: self.cause,
            status,
            treatment_money: self.treatment_money,
            policy_id: self.policy_id.into(),
            user_id: self.user_id.into(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            documents,
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub document_type: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id.into(),
            claim_id: row.claim_id.into(),
            document_type: row.document_type,
            file_path: row.file_path,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct MedicalRow {
    pub id: Uuid,
    pub condition: String,
    pub diagnosis_date: DateTime<Utc>,
    pub treatment: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MedicalRow> for MedicalRecord {
    fn from(row: MedicalRow) -> Self {
        MedicalRecord {
            id: row.id.into(),
            condition: row.condition,
            diagnosis_date: row.diagnosis_date,
            treatment: row.treatment,
            user_id: row.user_id.into(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ItemRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id.into(),
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}
