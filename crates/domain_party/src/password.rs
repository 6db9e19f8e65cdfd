//! Password strength rules and credential hashing

use pbkdf2::password_hash::rand_core::OsRng;
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::{Params, Pbkdf2};

use crate::error::PartyError;

/// Decides whether a password is strong enough
///
/// `attributes` pairs a human readable attribute name with the user's value
/// for it, e.g. `("username", "jdoe")`, so a policy can reject passwords
/// that resemble the account itself.
pub trait PasswordPolicy: Send + Sync {
    /// Returns one message per rule the password breaks
    fn violations(&self, password: &str, attributes: &[(&'static str, &str)]) -> Vec<String>;
}

const COMMON_PASSWORDS: &[&str] = &[
    "123456", "123456789", "12345678", "password", "qwerty", "qwerty123",
    "1q2w3e4r", "111111", "1234567890", "abc123", "password1", "iloveyou",
    "sunshine", "princess", "football", "baseball", "welcome", "admin123",
    "letmein", "monkey", "dragon", "trustno1", "passw0rd", "superman",
    "whatever", "starwars", "computer", "michelle", "jennifer", "00000000",
];

/// Length, numeric, common-password and similarity rules
#[derive(Debug, Clone)]
pub struct DefaultPasswordPolicy {
    pub min_length: usize,
    /// Similarity ratio at or above which a password is rejected
    pub max_similarity: f64,
}

impl Default for DefaultPasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_similarity: 0.7,
        }
    }
}

impl PasswordPolicy for DefaultPasswordPolicy {
    fn violations(&self, password: &str, attributes: &[(&'static str, &str)]) -> Vec<String> {
        let mut messages = Vec::new();

        for (name, value) in attributes {
            if value.is_empty() {
                continue;
            }
            let value = match *name {
                "email address" => value.split('@').next().unwrap_or(value),
                _ => value,
            };
            if similarity(password, value) >= self.max_similarity {
                messages.push(format!("The password is too similar to the {name}."));
                break;
            }
        }

        if password.chars().count() < self.min_length {
            messages.push(format!(
                "This password is too short. It must contain at least {} characters.",
                self.min_length
            ));
        }

        let lowered = password.trim().to_lowercase();
        if COMMON_PASSWORDS.contains(&lowered.as_str()) {
            messages.push("This password is too common.".to_string());
        }

        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            messages.push("This password is entirely numeric.".to_string());
        }

        messages
    }
}

/// Case-insensitive similarity in `[0, 1]`: twice the longest common
/// subsequence over the combined length
fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }

    let mut row = vec![0usize; b.len() + 1];
    for ca in &a {
        let mut diagonal = 0;
        for (j, cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }

    (2 * row[b.len()]) as f64 / total as f64
}

/// Hashes and verifies passwords as PBKDF2-SHA256 PHC strings
#[derive(Debug, Clone, Copy)]
pub struct CredentialHasher {
    params: Params,
}

impl CredentialHasher {
    /// Hasher using a custom iteration count; verification always reads the
    /// count stored in the hash itself
    pub fn new(rounds: u32) -> Self {
        Self {
            params: Params {
                rounds,
                ..Params::default()
            },
        }
    }

    pub fn hash(&self, password: &str) -> Result<String, PartyError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Pbkdf2.hash_password_customized(
            password.as_bytes(),
            None,
            None,
            self.params,
            &salt,
        )?;
        Ok(hash.to_string())
    }

    /// Whether `password` matches the stored hash; a malformed hash never matches
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match PasswordHash::new(stored) {
            Ok(parsed) => Pbkdf2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_bounds() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
        assert_eq!(similarity("", ""), 0.0);
        assert!(similarity("JaneDoe1", "janedoe") > 0.9);
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = CredentialHasher::new(1_000);
        let first = hasher.hash("correct horse").unwrap();
        let second = hasher.hash("correct horse").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$pbkdf2-sha256$"));
        assert!(hasher.verify("correct horse", &first));
        assert!(hasher.verify("correct horse", &second));
    }

    #[test]
    fn test_verify_rejects_wrong_or_malformed() {
        let hasher = CredentialHasher::new(1_000);
        let hash = hasher.hash("correct horse").unwrap();

        assert!(!hasher.verify("wrong horse", &hash));
        assert!(!hasher.verify("correct horse", "not a phc string"));
    }
}
