// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::provider::ProviderError;
use super::validate::ValidationError;

/// Provider message fragments with a dedicated user-facing classification.
const INVALID_CREDENTIALS_MARKER: &str = "Invalid login credentials";
const EMAIL_NOT_CONFIRMED_MARKER: &str = "Email not confirmed";

/// Coarse failure taxonomy callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorKind {
    Validation,
    ProviderRejected,
    Network,
    NotFound,
    Unknown,
}

/// Failure result of every `SessionStore` operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid email or password")]
    BadCredentials,
    #[error("email address has not been confirmed yet")]
    EmailUnconfirmed,
    /// Provider declined for a reason without a dedicated category; message is passed through.
    #[error("{message}")]
    Rejected { message: String },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("no active session")]
    NotFound,
    #[error("{message}")]
    Unknown { message: String },
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::Validation(_) => AuthErrorKind::Validation,
            Self::BadCredentials | Self::EmailUnconfirmed | Self::Rejected { .. } => {
                AuthErrorKind::ProviderRejected
            }
            Self::Network { .. } => AuthErrorKind::Network,
            Self::NotFound => AuthErrorKind::NotFound,
            Self::Unknown { .. } => AuthErrorKind::Unknown,
        }
    }

    pub(crate) fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Sign-in specific mapping of provider rejections to the two friendly categories.
    pub(crate) fn from_sign_in(error: ProviderError) -> Self {
        match error {
            ProviderError::Rejected { message } if message.contains(INVALID_CREDENTIALS_MARKER) => {
                Self::BadCredentials
            }
            ProviderError::Rejected { message } if message.contains(EMAIL_NOT_CONFIRMED_MARKER) => {
                Self::EmailUnconfirmed
            }
            other => other.into(),
        }
    }
}

impl From<ProviderError> for AuthError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Rejected { message } => Self::Rejected { message },
            ProviderError::Transport { message } => Self::Network { message },
        }
    }
}
