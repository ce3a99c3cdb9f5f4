// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// Caller-supplied input rejected before any provider call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid email address")]
    Email,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

impl ValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::PasswordTooShort { .. } => "password",
        }
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email_pattern().is_match(email.trim()) {
        Ok(())
    } else {
        Err(ValidationError::Email)
    }
}

/// Length is counted in characters, not bytes.
pub fn validate_password(password: &str, min_len: usize) -> Result<(), ValidationError> {
    if password.chars().count() >= min_len {
        Ok(())
    } else {
        Err(ValidationError::PasswordTooShort { min: min_len })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{validate_email, validate_password, ValidationError, DEFAULT_MIN_PASSWORD_LEN};

    #[rstest]
    #[case("a@b.com", true)]
    #[case("  ana.perez@platonia.lab ", true)]
    #[case("a@b", false)]
    #[case("no-at-sign.com", false)]
    #[case("a b@c.com", false)]
    #[case("", false)]
    fn email_pattern_cases(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(validate_email(email).is_ok(), valid, "email {email:?}");
    }

    #[test]
    fn password_minimum_counts_characters() {
        assert!(validate_password("abcdef", DEFAULT_MIN_PASSWORD_LEN).is_ok());
        assert!(validate_password("ñandús", DEFAULT_MIN_PASSWORD_LEN).is_ok());

        let err = validate_password("abc", DEFAULT_MIN_PASSWORD_LEN).unwrap_err();
        assert_eq!(err, ValidationError::PasswordTooShort { min: 6 });
        assert_eq!(err.field(), "password");
    }
}
