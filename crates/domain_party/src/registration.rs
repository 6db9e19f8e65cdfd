//! Registration input and its validation

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{FieldError, PortError};

use crate::password::PasswordPolicy;
use crate::user::check_email;

/// Longest password accepted at sign-up and login
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Sign-up form submitted by a prospective user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, max = 150, message = "must be between 1 and 150 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
    /// Confirmation of `password`
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password2: String,
    #[serde(default)]
    #[validate(length(max = 254, message = "must be at most 254 characters"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub last_name: String,
}

impl std::fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

impl RegistrationRequest {
    /// Validates every field, the password confirmation and password strength
    ///
    /// All failures are reported together. Mismatched passwords and policy
    /// violations are attributed to the `password` field.
    pub fn check(&self, policy: &dyn PasswordPolicy) -> Result<(), PortError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => PortError::from(e).field_errors().to_vec(),
        };
        check_email(&self.email, &mut errors);

        let length = self.password.chars().count();
        if length > MAX_PASSWORD_LENGTH {
            errors.push(FieldError::new(
                "password",
                format!("Ensure this field has no more than {MAX_PASSWORD_LENGTH} characters."),
            ));
        } else if length > 0 {
            let attributes = [
                ("username", self.username.as_str()),
                ("first name", self.first_name.as_str()),
                ("last name", self.last_name.as_str()),
                ("email address", self.email.as_str()),
            ];
            errors.extend(
                policy
                    .violations(&self.password, &attributes)
                    .into_iter()
                    .map(|message| FieldError::new("password", message)),
            );
        }

        if self.password != self.password2 {
            errors.push(FieldError::new("password", "Password fields didn't match."));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PortError::invalid_fields(errors))
        }
    }
}
