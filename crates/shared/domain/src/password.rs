//! Password strength rules and the password hash value object.
//!
//! Hashing belongs to the account store; [`Password`] is what it uses to turn
//! a raw password into the stored hash and to check a raw password against it.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    msg_too_short, MIN_PASSWORD_LENGTH, MSG_FIELD_BLANK, MSG_PASSWORD_MISSING_DIGIT,
    MSG_PASSWORD_MISSING_LOWERCASE, MSG_PASSWORD_MISSING_SPECIAL, MSG_PASSWORD_MISSING_UPPERCASE,
};
use crate::error::{DomainError, DomainResult};

/// Character-class rules, checked in order; the first miss is reported.
static PASSWORD_RULES: Lazy<[(Regex, &'static str); 4]> = Lazy::new(|| {
    [
        (Regex::new(r"[0-9]").expect("static regex"), MSG_PASSWORD_MISSING_DIGIT),
        (Regex::new(r"[A-Z]").expect("static regex"), MSG_PASSWORD_MISSING_UPPERCASE),
        (Regex::new(r"[a-z]").expect("static regex"), MSG_PASSWORD_MISSING_LOWERCASE),
        (Regex::new(r"[^A-Za-z0-9]").expect("static regex"), MSG_PASSWORD_MISSING_SPECIAL),
    ]
});

/// Check a raw password against the strength rules.
///
/// Rejects blank and short (< 5 characters) passwords, then requires a digit,
/// an uppercase letter, a lowercase letter and a special character, in that
/// order. Returns the candidate untouched.
pub fn check_strength(candidate: &str) -> DomainResult<&str> {
    if candidate.is_empty() {
        return Err(DomainError::validation(MSG_FIELD_BLANK));
    }

    if candidate.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::validation(msg_too_short(MIN_PASSWORD_LENGTH)));
    }

    for (rule, message) in PASSWORD_RULES.iter() {
        if !rule.is_match(candidate) {
            return Err(DomainError::validation(*message));
        }
    }

    Ok(candidate)
}

/// Hash compared against when no account matches, so a lookup miss costs the
/// same as a wrong password.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$ZHVtbXloYXNoMTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMg";

/// Argon2 password hash.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Never print the hash
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a raw password with a fresh salt.
    ///
    /// Strength rules are not checked here; callers validate before hashing.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap a hash loaded from storage.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Check a raw password against this hash. A malformed hash never matches.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_strength_reports_first_rule() {
        assert_eq!(
            check_strength("abcdef!"),
            Err(DomainError::validation(MSG_PASSWORD_MISSING_DIGIT))
        );
        assert_eq!(
            check_strength("Abc1"),
            Err(DomainError::validation("Ensure this field has at least 5 characters."))
        );
        assert_eq!(check_strength(" A1b! "), Ok(" A1b! "));
    }

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "Abc123!@";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("Abc123!"));
    }

    #[test]
    fn test_whitespace_is_significant() {
        let password = Password::new("  Pass1! ").unwrap();

        assert!(password.verify("  Pass1! "));
        assert!(!password.verify("Pass1!"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "NewPass1!";
        let hash = Password::new(plain).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("Same1!pw").unwrap();
        let pass2 = Password::new("Same1!pw").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
    }

    #[test]
    fn test_dummy_hash_never_verifies() {
        let dummy = Password::from_hash(DUMMY_PASSWORD_HASH);
        assert!(!dummy.verify(""));
        assert!(!dummy.verify("Abc123!@"));
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("Abc123!@").unwrap();
        let debug = format!("{:?}", password);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(password.as_str()));
    }
}
