// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Boundary to the hosted auth provider.
//!
//! Implementations own all token handling and persistence. Every call is a single attempt; the
//! store never retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::session::{ProviderAuth, User};

/// Errors arrive as message text; transport failures are kept apart from remote rejections.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("{message}")]
    Rejected { message: String },
    #[error("{message}")]
    Transport { message: String },
}

impl ProviderError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Optional profile fields sent along with a sign-up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SignUpMetadata {
    pub(crate) fn into_map(self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(name) = self.name {
            map.insert("name".to_owned(), Value::String(name));
        }
        if let Some(role) = self.role {
            map.insert("role".to_owned(), Value::String(role));
        }
        map
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub metadata: Option<SignUpMetadata>,
    /// Where the confirmation link should land.
    pub email_redirect_to: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordSignIn {
    pub email: String,
    pub password: String,
}

/// Partial user update; `None` fields are left untouched by the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub data: Option<Map<String, Value>>,
}

/// Provider-pushed notifications, delivered to `SessionStore::handle_provider_event`.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(ProviderAuth),
    TokenRefreshed(ProviderAuth),
    UserUpdated(User),
    SignedOut,
}

/// The remote auth backend.
///
/// `?Send`: the store runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait AuthProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<ProviderAuth, ProviderError>;

    async fn sign_in_with_password(
        &self,
        request: &PasswordSignIn,
    ) -> Result<ProviderAuth, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;

    /// The provider's currently persisted session, empty if none.
    async fn get_session(&self) -> Result<ProviderAuth, ProviderError>;

    async fn get_user(&self) -> Result<Option<User>, ProviderError>;

    async fn refresh_session(&self) -> Result<ProviderAuth, ProviderError>;

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), ProviderError>;

    async fn update_user(&self, update: &UserUpdate) -> Result<Option<User>, ProviderError>;
}
