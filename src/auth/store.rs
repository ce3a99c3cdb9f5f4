// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::rc::Rc;

use serde_json::{Map, Value};

use super::error::AuthError;
use super::provider::{
    AuthEvent, AuthProvider, PasswordSignIn, SignUpMetadata, SignUpRequest, UserUpdate,
};
use super::session::{AuthState, ProviderAuth, Session, User};
use super::subscription::{Listeners, Subscription};
use super::validate::{validate_email, validate_password, DEFAULT_MIN_PASSWORD_LEN};

/// Knobs the store needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    pub min_password_len: usize,
    pub email_redirect_to: Option<String>,
    pub password_reset_redirect_to: Option<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            email_redirect_to: None,
            password_reset_redirect_to: None,
        }
    }
}

/// Profile edit; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub data: Option<Map<String, Value>>,
}

/// Single source of truth for "who is logged in".
///
/// State only changes after the one awaited provider call of an operation resolves
/// successfully. Failures leave the cached state untouched and notify nobody; every successful
/// mutation notifies each subscriber exactly once, after the state is updated.
pub struct SessionStore<P> {
    provider: P,
    options: StoreOptions,
    state: AuthState,
    listeners: Listeners,
}

impl<P: AuthProvider> SessionStore<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, StoreOptions::default())
    }

    pub fn with_options(provider: P, options: StoreOptions) -> Self {
        Self {
            provider,
            options,
            state: AuthState::Unauthenticated,
            listeners: Listeners::default(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Snapshot of the cached state. Never touches the provider.
    pub fn state(&self) -> AuthState {
        self.state.clone()
    }

    pub fn current_session(&self) -> Option<Rc<Session>> {
        self.state.session().cloned()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Initial session check against the provider's persisted session.
    ///
    /// An absent session is not an error and produces no notification.
    pub async fn restore(&mut self) -> Result<AuthState, AuthError> {
        let auth = self.provider.get_session().await.map_err(|err| {
            tracing::warn!(error = %err, "session restore failed");
            AuthError::from(err)
        })?;

        match auth.into_session() {
            Some(session) => {
                let session = self.install(session);
                tracing::info!(user_id = %session.user().id, "restored session");
            }
            None => tracing::debug!("no persisted session"),
        }
        Ok(self.state())
    }

    pub async fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        metadata: Option<SignUpMetadata>,
    ) -> Result<Rc<Session>, AuthError> {
        validate_email(email)?;
        validate_password(password, self.options.min_password_len)?;

        let request = SignUpRequest {
            email: email.trim().to_owned(),
            password: password.to_owned(),
            metadata,
            email_redirect_to: self.options.email_redirect_to.clone(),
        };
        let auth = self.provider.sign_up(&request).await.map_err(|err| {
            tracing::warn!(error = %err, "sign-up failed");
            AuthError::from(err)
        })?;

        // A user without credentials means the account exists but awaits e-mail confirmation.
        let session = match auth {
            ProviderAuth {
                user: Some(_),
                credentials: None,
            } => return Err(AuthError::EmailUnconfirmed),
            auth => auth
                .into_session()
                .ok_or_else(|| AuthError::unknown("provider returned an incomplete sign-up"))?,
        };

        let session = self.install(session);
        tracing::info!(user_id = %session.user().id, "signed up");
        Ok(session)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<Rc<Session>, AuthError> {
        validate_email(email)?;
        validate_password(password, self.options.min_password_len)?;

        let request = PasswordSignIn {
            email: email.trim().to_owned(),
            password: password.to_owned(),
        };
        let auth = self
            .provider
            .sign_in_with_password(&request)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "sign-in failed");
                AuthError::from_sign_in(err)
            })?;

        let session = auth
            .into_session()
            .ok_or_else(|| AuthError::unknown("provider returned no session"))?;
        let session = self.install(session);
        tracing::info!(user_id = %session.user().id, "signed in");
        Ok(session)
    }

    /// Clears the session once the provider confirms.
    ///
    /// A provider failure is reported and the local session is kept: the provider may still
    /// hold a live session.
    pub async fn sign_out(&mut self) -> Result<(), AuthError> {
        self.provider.sign_out().await.map_err(|err| {
            tracing::warn!(error = %err, "sign-out failed; keeping local session");
            AuthError::from(err)
        })?;

        self.state = AuthState::Unauthenticated;
        self.listeners.notify(&self.state);
        tracing::info!("signed out");
        Ok(())
    }

    /// Renews credentials. Failure keeps the existing session; it is not a sign-out.
    pub async fn refresh(&mut self) -> Result<Rc<Session>, AuthError> {
        let auth = self.provider.refresh_session().await.map_err(|err| {
            tracing::warn!(error = %err, "session refresh failed; keeping current session");
            AuthError::from(err)
        })?;

        let session = auth
            .into_session()
            .ok_or_else(|| AuthError::unknown("provider returned no session on refresh"))?;
        let session = self.install(session);
        tracing::debug!(user_id = %session.user().id, "session refreshed");
        Ok(session)
    }

    /// Re-reads the user record and swaps it into the active session.
    pub async fn fetch_user(&mut self) -> Result<User, AuthError> {
        let current = self.current_session().ok_or(AuthError::NotFound)?;
        let user = self
            .provider
            .get_user()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "user fetch failed");
                AuthError::from(err)
            })?
            .ok_or(AuthError::NotFound)?;

        self.install(current.with_user(user.clone()));
        Ok(user)
    }

    /// Asks the provider to e-mail a reset link. Does not touch session state.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        validate_email(email)?;
        self.provider
            .reset_password_for_email(
                email.trim(),
                self.options.password_reset_redirect_to.as_deref(),
            )
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "password reset request failed");
                AuthError::from(err)
            })
    }

    pub async fn update_password(&mut self, password: &str) -> Result<User, AuthError> {
        validate_password(password, self.options.min_password_len)?;
        let update = UserUpdate {
            password: Some(password.to_owned()),
            ..UserUpdate::default()
        };
        self.update_user(update).await
    }

    pub async fn update_profile(&mut self, profile: ProfileUpdate) -> Result<User, AuthError> {
        if let Some(email) = profile.email.as_deref() {
            validate_email(email)?;
        }
        let update = UserUpdate {
            email: profile.email.map(|email| email.trim().to_owned()),
            password: None,
            data: profile.data,
        };
        self.update_user(update).await
    }

    async fn update_user(&mut self, update: UserUpdate) -> Result<User, AuthError> {
        let current = self.current_session().ok_or(AuthError::NotFound)?;
        let user = self
            .provider
            .update_user(&update)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "user update failed");
                AuthError::from(err)
            })?
            .ok_or_else(|| AuthError::unknown("provider returned no user after update"))?;

        self.install(current.with_user(user.clone()));
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    /// Applies a provider-pushed notification.
    ///
    /// `SignedOut` only notifies when a session was actually held. Partial payloads, user
    /// updates without a session and echoes of the session already held are ignored.
    pub fn handle_provider_event(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::SignedIn(auth) | AuthEvent::TokenRefreshed(auth) => {
                match auth.into_session() {
                    Some(session) => self.install_if_changed(session),
                    None => tracing::warn!("ignoring incomplete session from provider event"),
                }
            }
            AuthEvent::UserUpdated(user) => match self.current_session() {
                Some(current) => self.install_if_changed(current.with_user(user)),
                None => tracing::debug!("ignoring user update without a session"),
            },
            AuthEvent::SignedOut => {
                if self.state.is_authenticated() {
                    self.state = AuthState::Unauthenticated;
                    self.listeners.notify(&self.state);
                    tracing::info!("session ended by provider");
                }
            }
        }
    }

    fn install_if_changed(&mut self, session: Session) {
        if self.state.session().is_some_and(|held| **held == session) {
            tracing::trace!("provider event matches held session");
            return;
        }
        self.install(session);
    }

    fn install(&mut self, session: Session) -> Rc<Session> {
        let session = Rc::new(session);
        self.state = AuthState::Authenticated(Rc::clone(&session));
        self.listeners.notify(&self.state);
        session
    }
}
