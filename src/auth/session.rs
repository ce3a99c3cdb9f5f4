// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::UserId;

/// Identity record as returned by the auth provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    /// Free-form profile fields (`name`, `role`, `avatar_url`, ...).
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl User {
    pub fn new(id: UserId, email: Option<String>) -> Self {
        Self {
            id,
            email,
            metadata: Map::new(),
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }
}

/// Opaque token bundle owned by the provider.
///
/// The store only tracks presence; contents are never inspected or logged.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credentials(Value);

impl Credentials {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}

/// A complete session: both halves are required by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: User,
    credentials: Credentials,
}

impl Session {
    pub fn new(user: User, credentials: Credentials) -> Self {
        Self { user, credentials }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn with_user(&self, user: User) -> Self {
        Self {
            user,
            credentials: self.credentials.clone(),
        }
    }
}

/// Provider response shape. Either half may be missing (e.g. sign-up awaiting confirmation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderAuth {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, rename = "session")]
    pub credentials: Option<Credentials>,
}

impl ProviderAuth {
    pub fn complete(user: User, credentials: Credentials) -> Self {
        Self {
            user: Some(user),
            credentials: Some(credentials),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.credentials.is_none()
    }

    /// Returns a session only when both user and credentials are present. A JSON `null`
    /// credential bundle counts as absent.
    pub fn into_session(self) -> Option<Session> {
        match (self.user, self.credentials) {
            (Some(user), Some(credentials)) if !credentials.is_null() => {
                Some(Session::new(user, credentials))
            }
            _ => None,
        }
    }
}

/// Snapshot of "who is logged in", handed to observers and readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(Rc<Session>),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Rc<Session>> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Unauthenticated => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.session().map(|session| session.user())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Credentials, ProviderAuth, User};
    use crate::model::UserId;

    #[test]
    fn credentials_debug_is_redacted() {
        let credentials = Credentials::new(json!({"access_token": "secret-token"}));
        let rendered = format!("{credentials:?}");
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn partial_provider_auth_is_not_a_session() {
        let user = User::new(UserId::new("u1").expect("user id"), None);
        let partial = ProviderAuth {
            user: Some(user.clone()),
            credentials: None,
        };
        assert!(partial.into_session().is_none());

        let complete = ProviderAuth::complete(user, Credentials::new(json!({"t": 1})));
        assert!(complete.into_session().is_some());
    }

    #[test]
    fn null_credentials_are_not_a_session() {
        let user = User::new(UserId::new("u1").expect("user id"), None);
        let null = ProviderAuth::complete(user, Credentials::new(serde_json::Value::Null));
        assert!(null.into_session().is_none());
    }

    #[test]
    fn provider_auth_reads_provider_json_shape() {
        let auth: ProviderAuth = serde_json::from_value(json!({
            "user": {"id": "u1", "email": "a@b.com", "metadata": {"name": "Ana"}},
            "session": {"access_token": "t", "refresh_token": "r"}
        }))
        .expect("provider auth");

        let session = auth.into_session().expect("session");
        assert_eq!(session.user().display_name(), Some("Ana"));
    }
}
