//! Tests for registration, password rules, accounts and medical history

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use tokio::sync::RwLock;

use core_kernel::{DomainPort, OwnedResource, PortError, UserId};

use domain_party::{
    AccountService, CredentialHasher, DefaultPasswordPolicy, MedicalRecord, MedicalRecordDraft,
    NewAccount, PasswordPolicy, Profile, RegistrationRequest, StoredCredentials, User, UserChanges,
    UserPort, MAX_PASSWORD_LENGTH,
};

fn request(password: &str, password2: &str) -> RegistrationRequest {
    RegistrationRequest {
        username: "jdoe".to_string(),
        password: password.to_string(),
        password2: password2.to_string(),
        email: "jane@example.com".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
    }
}

fn password_messages(err: &PortError) -> Vec<String> {
    err.field_errors()
        .iter()
        .filter(|e| e.field == "password")
        .map(|e| e.message.clone())
        .collect()
}

// ============================================================================
// Registration Tests
// ============================================================================

mod registration_tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        let policy = DefaultPasswordPolicy::default();
        assert!(request("Tr0ub4dor&3", "Tr0ub4dor&3").check(&policy).is_ok());
    }

    #[test]
    fn test_password_mismatch() {
        let policy = DefaultPasswordPolicy::default();
        let err = request("Tr0ub4dor&3", "Tr0ub4dor&4").check(&policy).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(password_messages(&err), vec!["Password fields didn't match.".to_string()]);
    }

    #[test]
    fn test_blank_username_and_bad_email() {
        let policy = DefaultPasswordPolicy::default();
        let mut req = request("Tr0ub4dor&3", "Tr0ub4dor&3");
        req.username = String::new();
        req.email = "nope".to_string();

        let err = req.check(&policy).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"username"));
        assert!(fields.contains(&"email"));
    }

    #[test]
    fn test_email_limited_to_column_width() {
        let policy = DefaultPasswordPolicy::default();
        let mut req = request("Tr0ub4dor&3", "Tr0ub4dor&3");
        req.email = format!("{}@{}.example.com", "j".repeat(60), "mail".repeat(50));

        let err = req.check(&policy).unwrap_err();
        assert!(err.field_errors().iter().any(|e| e.field == "email"));
    }

    #[test]
    fn test_optional_fields_may_be_empty() {
        let policy = DefaultPasswordPolicy::default();
        let req: RegistrationRequest = serde_json::from_value(serde_json::json!({
            "username": "minimal",
            "password": "Tr0ub4dor&3",
            "password2": "Tr0ub4dor&3"
        }))
        .unwrap();

        assert!(req.email.is_empty());
        assert!(req.check(&policy).is_ok());
    }

    #[test]
    fn test_overlong_password_rejected_before_strength_rules() {
        let policy = DefaultPasswordPolicy::default();
        let long = format!("Xq7!{}", "z".repeat(MAX_PASSWORD_LENGTH));

        let err = request(&long, &long).check(&policy).unwrap_err();
        let messages = password_messages(&err);

        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("no more than 128 characters"));
    }

    #[test]
    fn test_password_at_limit_accepted() {
        let policy = DefaultPasswordPolicy::default();
        let password = format!("Xq7!{}", "mountain".repeat(15));
        assert_eq!(password.chars().count(), 124);

        assert!(request(&password, &password).check(&policy).is_ok());
    }

    #[test]
    fn test_debug_hides_passwords() {
        let rendered = format!("{:?}", request("Tr0ub4dor&3", "Tr0ub4dor&3"));
        assert!(!rendered.contains("Tr0ub4dor"));
        assert!(rendered.contains("jdoe"));
    }
}

// ============================================================================
// Password Policy Tests
// ============================================================================

mod password_policy_tests {
    use super::*;

    fn violations(password: &str) -> Vec<String> {
        DefaultPasswordPolicy::default().violations(password, &[("username", "jdoe")])
    }

    #[test]
    fn test_short_password() {
        let messages = violations("x7#kq");
        assert_eq!(
            messages,
            vec!["This password is too short. It must contain at least 8 characters.".to_string()]
        );
    }

    #[test]
    fn test_common_password() {
        assert!(violations("Password").contains(&"This password is too common.".to_string()));
    }

    #[test]
    fn test_numeric_password() {
        assert!(violations("80417395").contains(&"This password is entirely numeric.".to_string()));
    }

    #[test]
    fn test_similar_to_username() {
        let messages = DefaultPasswordPolicy::default()
            .violations("janedoe1", &[("username", "janedoe")]);
        assert_eq!(messages, vec!["The password is too similar to the username.".to_string()]);
    }

    #[test]
    fn test_email_domain_is_ignored() {
        let messages = DefaultPasswordPolicy::default()
            .violations("example.com!", &[("email address", "zz@example.com")]);
        assert!(messages.is_empty());
    }

    #[test]
    fn test_strength_errors_attributed_to_password() {
        let err = request("12345678", "12345678")
            .check(&DefaultPasswordPolicy::default())
            .unwrap_err();
        let messages = password_messages(&err);
        assert!(messages.contains(&"This password is too common.".to_string()));
        assert!(messages.contains(&"This password is entirely numeric.".to_string()));
    }

    proptest! {
        #[test]
        fn prop_numeric_passwords_always_rejected(password in "[0-9]{1,20}") {
            let messages = DefaultPasswordPolicy::default().violations(&password, &[]);
            prop_assert!(messages.contains(&"This password is entirely numeric.".to_string()));
        }
    }
}

// ============================================================================
// Medical History Tests
// ============================================================================

mod medical_tests {
    use super::*;

    fn draft() -> MedicalRecordDraft {
        MedicalRecordDraft {
            condition: "Asthma".to_string(),
            diagnosis_date: Utc.with_ymd_and_hms(2019, 5, 4, 0, 0, 0).unwrap(),
            treatment: Some("Inhaler".to_string()),
        }
    }

    #[test]
    fn test_condition_length() {
        assert!(draft().check().is_ok());

        let mut blank = draft();
        blank.condition = String::new();
        assert_eq!(blank.check().unwrap_err().field_errors()[0].field, "condition");

        let mut long = draft();
        long.condition = "x".repeat(201);
        assert!(long.check().is_err());
    }

    #[test]
    fn test_record_owner_and_update() {
        let owner = UserId::new_v7();
        let now = Utc::now();
        let mut record = MedicalRecord::from_draft(owner, draft(), now);
        assert_eq!(record.owner(), owner);

        let mut changed = draft();
        changed.treatment = None;
        record.apply(changed, now + Duration::hours(1));

        assert!(record.treatment.is_none());
        assert_eq!(record.created_at, now);
        assert_eq!(record.updated_at, now + Duration::hours(1));
    }
}

// ============================================================================
// Account Service Tests
// ============================================================================

/// Minimal user store for exercising the service
#[derive(Default)]
struct MockUsers {
    users: RwLock<HashMap<UserId, (User, String)>>,
}

impl DomainPort for MockUsers {}

#[async_trait]
impl UserPort for MockUsers {
    async fn insert_user(&self, account: NewAccount) -> Result<User, PortError> {
        let mut users = self.users.write().await;
        if users.values().any(|(u, _)| u.username == account.username) {
            return Err(PortError::conflict("A user with that username already exists."));
        }
        let now = Utc::now();
        let user = User {
            id: UserId::new_v7(),
            username: account.username,
            email: account.email,
            first_name: account.first_name,
            last_name: account.last_name,
            profile: Profile {
                bio: None,
                profile_picture: None,
                created_at: now,
            },
            date_joined: now,
        };
        users.insert(user.id, (user.clone(), account.password_hash));
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>, PortError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|(u, _)| u.username == username)
            .map(|(u, hash)| StoredCredentials {
                user_id: u.id,
                password_hash: hash.clone(),
            }))
    }

    async fn update_user(&self, id: UserId, changes: UserChanges) -> Result<User, PortError> {
        let mut users = self.users.write().await;
        let (user, _) = users.get_mut(&id).ok_or_else(|| PortError::not_found("User", id))?;
        changes.apply_to(user);
        Ok(user.clone())
    }
}

fn service() -> (AccountService, Arc<MockUsers>) {
    let users = Arc::new(MockUsers::default());
    let service = AccountService::new(users.clone()).with_hasher(CredentialHasher::new(1_000));
    (service, users)
}

mod account_service_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let (service, users) = service();

        let user = service.register(request("Tr0ub4dor&3", "Tr0ub4dor&3")).await.unwrap();
        assert_eq!(user.full_name(), "Jane Doe");
        assert!(user.profile.bio.is_none());

        let stored = users.find_credentials("jdoe").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Tr0ub4dor&3");

        let id = service.authenticate("jdoe", "Tr0ub4dor&3").await.unwrap();
        assert_eq!(id, user.id);
    }

    #[tokio::test]
    async fn test_invalid_registration_stores_nothing() {
        let (service, users) = service();

        let err = service.register(request("Tr0ub4dor&3", "different")).await.unwrap_err();
        assert!(err.is_validation());
        assert!(users.find_credentials("jdoe").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let (service, _) = service();

        service.register(request("Tr0ub4dor&3", "Tr0ub4dor&3")).await.unwrap();
        let err = service.register(request("Tr0ub4dor&3", "Tr0ub4dor&3")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_alike() {
        let (service, _) = service();
        service.register(request("Tr0ub4dor&3", "Tr0ub4dor&3")).await.unwrap();

        let wrong = service.authenticate("jdoe", "nope").await.unwrap_err();
        let unknown = service.authenticate("ghost", "nope").await.unwrap_err();

        assert!(matches!(wrong, PortError::Unauthorized { .. }));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_oversized_login_password_is_invalid_credentials() {
        let (service, _) = service();
        service.register(request("Tr0ub4dor&3", "Tr0ub4dor&3")).await.unwrap();

        let oversized = "Tr0ub4dor&3".repeat(20);
        let err = service.authenticate("jdoe", &oversized).await.unwrap_err();

        assert!(matches!(err, PortError::Unauthorized { .. }));
    }
}
