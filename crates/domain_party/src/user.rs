//! Users and profiles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateEmail};

use core_kernel::{FieldError, PortError, UserId};

/// Optional personal details shown on the account page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A registered portal user
///
/// The password hash is deliberately absent; it is only ever read through
/// [`StoredCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: Profile,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// `"{first} {last}"`, used as the policy holder name on claims
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A validated registration ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// PHC-formatted PBKDF2 hash
    pub password_hash: String,
}

/// What login needs to check a password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user_id: UserId,
    pub password_hash: String,
}

/// Partial update of a user and their profile
///
/// Absent fields are left unchanged. The profile fields are doubly optional:
/// an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserChanges {
    #[validate(length(min = 1, max = 150, message = "must be between 1 and 150 characters"))]
    pub username: Option<String>,
    #[validate(length(max = 254, message = "must be at most 254 characters"))]
    pub email: Option<String>,
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[validate(
        url(message = "must be a valid URL"),
        length(max = 200, message = "must be at most 200 characters")
    )]
    pub profile_picture: Option<Option<String>>,
}

/// Maps a present key to `Some`, keeping `null` apart from absence
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UserChanges {
    pub fn check(&self) -> Result<(), PortError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => PortError::from(e).field_errors().to_vec(),
        };
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::invalid_fields(errors))
        }
    }

    /// Applies the present fields to `user`
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(bio) = self.bio {
            user.profile.bio = bio;
        }
        if let Some(picture) = self.profile_picture {
            user.profile.profile_picture = picture;
        }
    }
}

/// Email is optional, so only a non-empty address is checked
pub(crate) fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if !email.is_empty() && !email.validate_email() {
        errors.push(FieldError::new("email", "Enter a valid email address."));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: UserId::new_v7(),
            username: "jdoe".to_string(),
            email: String::new(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            profile: Profile::default(),
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(user().full_name(), "Jane Doe");
    }

    #[test]
    fn test_partial_changes_keep_other_fields() {
        let mut u = user();
        UserChanges {
            bio: Some(Some("Runner".to_string())),
            ..Default::default()
        }
        .apply_to(&mut u);

        assert_eq!(u.username, "jdoe");
        assert_eq!(u.profile.bio.as_deref(), Some("Runner"));
    }

    #[test]
    fn test_empty_email_is_allowed() {
        let changes = UserChanges {
            email: Some(String::new()),
            ..Default::default()
        };
        assert!(changes.check().is_ok());

        let bad = UserChanges {
            email: Some("not-an-email".to_string()),
            ..Default::default()
        };
        assert_eq!(bad.check().unwrap_err().field_errors()[0].field, "email");
    }

    #[test]
    fn test_profile_picture_limited_to_column_width() {
        let fits = UserChanges {
            profile_picture: Some(Some(format!("https://cdn.example.com/{}.png", "p".repeat(150)))),
            ..Default::default()
        };
        assert!(fits.check().is_ok());

        let too_long = UserChanges {
            profile_picture: Some(Some(format!("https://cdn.example.com/{}.png", "p".repeat(200)))),
            ..Default::default()
        };
        assert_eq!(too_long.check().unwrap_err().field_errors()[0].field, "profile_picture");
    }

    #[test]
    fn test_null_clears_profile_fields_and_absence_keeps_them() {
        let mut u = user();
        u.profile.bio = Some("Runner".to_string());
        u.profile.profile_picture = Some("https://cdn.example.com/me.png".to_string());

        let keep: UserChanges = serde_json::from_str(r#"{"first_name": "Janet"}"#).unwrap();
        keep.apply_to(&mut u);
        assert_eq!(u.profile.bio.as_deref(), Some("Runner"));

        let clear: UserChanges =
            serde_json::from_str(r#"{"bio": null, "profile_picture": null}"#).unwrap();
        assert!(clear.check().is_ok());
        clear.apply_to(&mut u);

        assert_eq!(u.first_name, "Janet");
        assert!(u.profile.bio.is_none());
        assert!(u.profile.profile_picture.is_none());
    }
}
