// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process auth provider.
//!
//! Mirrors the hosted provider's observable behavior (including its error texts) closely enough
//! for local runs and tests: an account table, one current session with rotating tokens, pushed
//! events, and failure injection.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc;

use super::provider::{
    AuthEvent, AuthProvider, PasswordSignIn, ProviderError, SignUpRequest, UserUpdate,
};
use super::session::{Credentials, ProviderAuth, User};
use crate::model::UserId;

pub const INVALID_LOGIN_MESSAGE: &str = "Invalid login credentials";
pub const EMAIL_NOT_CONFIRMED_MESSAGE: &str = "Email not confirmed";
pub const ALREADY_REGISTERED_MESSAGE: &str = "User already registered";
pub const SESSION_MISSING_MESSAGE: &str = "Auth session missing!";
pub const OFFLINE_MESSAGE: &str = "network unreachable";

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
    confirmed: bool,
}

#[derive(Debug)]
struct CurrentSession {
    email: String,
    token_generation: u64,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: BTreeMap<String, Account>,
    current: Option<CurrentSession>,
    next_user: u64,
    next_token: u64,
    require_confirmation: bool,
    offline: bool,
    injected: VecDeque<ProviderError>,
    calls: usize,
    reset_requests: Vec<(String, Option<String>)>,
}

pub struct MemoryProvider {
    inner: RefCell<Inner>,
    events_tx: mpsc::UnboundedSender<AuthEvent>,
    events_rx: RefCell<Option<mpsc::UnboundedReceiver<AuthEvent>>>,
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProvider {
    pub fn new() -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            inner: RefCell::new(Inner::default()),
            events_tx,
            events_rx: RefCell::new(Some(events_rx)),
        }
    }

    /// New sign-ups get a user but no session until `confirm_email`.
    pub fn with_email_confirmation(self, required: bool) -> Self {
        self.inner.borrow_mut().require_confirmation = required;
        self
    }

    pub fn seed_account(&self, email: &str, password: &str) -> Result<User, ProviderError> {
        let mut inner = self.inner.borrow_mut();
        let user = inner.new_user(email)?;
        inner.accounts.insert(
            email.to_owned(),
            Account {
                user: user.clone(),
                password: password.to_owned(),
                confirmed: true,
            },
        );
        Ok(user)
    }

    pub fn confirm_email(&self, email: &str) -> bool {
        match self.inner.borrow_mut().accounts.get_mut(email) {
            Some(account) => {
                account.confirmed = true;
                true
            }
            None => false,
        }
    }

    /// Every call fails with a transport error while offline.
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    /// The next provider call fails with `error`.
    pub fn fail_next(&self, error: ProviderError) {
        self.inner.borrow_mut().injected.push_back(error);
    }

    /// Ends the current session remotely and pushes `AuthEvent::SignedOut`.
    pub fn revoke_session(&self) {
        self.inner.borrow_mut().current = None;
        self.push(AuthEvent::SignedOut);
    }

    /// Receiver for pushed events. Only the first caller gets it.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<AuthEvent>> {
        self.events_rx.borrow_mut().take()
    }

    pub fn has_session(&self) -> bool {
        self.inner.borrow().current.is_some()
    }

    /// Number of provider calls attempted, including failed ones.
    pub fn calls(&self) -> usize {
        self.inner.borrow().calls
    }

    pub fn reset_requests(&self) -> Vec<(String, Option<String>)> {
        self.inner.borrow().reset_requests.clone()
    }

    fn push(&self, event: AuthEvent) {
        // Nobody listening is fine.
        let _ = self.events_tx.send(event);
    }

    fn begin(&self) -> Result<(), ProviderError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls += 1;
        if inner.offline {
            return Err(ProviderError::transport(OFFLINE_MESSAGE));
        }
        match inner.injected.pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Inner {
    fn new_user(&mut self, email: &str) -> Result<User, ProviderError> {
        self.next_user += 1;
        let id = UserId::new(format!("user-{}", self.next_user))
            .map_err(|err| ProviderError::rejected(err.to_string()))?;
        Ok(User::new(id, Some(email.to_owned())))
    }

    fn open_session(&mut self, email: &str) -> Credentials {
        self.next_token += 1;
        let generation = self.next_token;
        self.current = Some(CurrentSession {
            email: email.to_owned(),
            token_generation: generation,
        });
        credentials_for(generation)
    }

    fn current_account_mut(&mut self) -> Result<&mut Account, ProviderError> {
        let email = self
            .current
            .as_ref()
            .map(|current| current.email.clone())
            .ok_or_else(|| ProviderError::rejected(SESSION_MISSING_MESSAGE))?;
        self.accounts
            .get_mut(&email)
            .ok_or_else(|| ProviderError::rejected(SESSION_MISSING_MESSAGE))
    }
}

fn credentials_for(generation: u64) -> Credentials {
    Credentials::new(json!({
        "access_token": format!("mem-at-{generation}"),
        "refresh_token": format!("mem-rt-{generation}"),
        "token_type": "bearer",
    }))
}

#[async_trait(?Send)]
impl AuthProvider for MemoryProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<ProviderAuth, ProviderError> {
        self.begin()?;
        let mut inner = self.inner.borrow_mut();
        if inner.accounts.contains_key(&request.email) {
            return Err(ProviderError::rejected(ALREADY_REGISTERED_MESSAGE));
        }

        let mut user = inner.new_user(&request.email)?;
        if let Some(metadata) = request.metadata.clone() {
            user.metadata = metadata.into_map();
        }
        let confirmed = !inner.require_confirmation;
        inner.accounts.insert(
            request.email.clone(),
            Account {
                user: user.clone(),
                password: request.password.clone(),
                confirmed,
            },
        );

        if !confirmed {
            return Ok(ProviderAuth {
                user: Some(user),
                credentials: None,
            });
        }
        let credentials = inner.open_session(&request.email);
        drop(inner);
        let auth = ProviderAuth::complete(user, credentials);
        self.push(AuthEvent::SignedIn(auth.clone()));
        Ok(auth)
    }

    async fn sign_in_with_password(
        &self,
        request: &PasswordSignIn,
    ) -> Result<ProviderAuth, ProviderError> {
        self.begin()?;
        let mut inner = self.inner.borrow_mut();
        let account = match inner.accounts.get(&request.email) {
            Some(account) if account.password == request.password => account.clone(),
            _ => return Err(ProviderError::rejected(INVALID_LOGIN_MESSAGE)),
        };
        if !account.confirmed {
            return Err(ProviderError::rejected(EMAIL_NOT_CONFIRMED_MESSAGE));
        }

        let credentials = inner.open_session(&request.email);
        drop(inner);
        let auth = ProviderAuth::complete(account.user, credentials);
        self.push(AuthEvent::SignedIn(auth.clone()));
        Ok(auth)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.begin()?;
        self.inner.borrow_mut().current = None;
        Ok(())
    }

    async fn get_session(&self) -> Result<ProviderAuth, ProviderError> {
        self.begin()?;
        let inner = self.inner.borrow();
        let Some(current) = inner.current.as_ref() else {
            return Ok(ProviderAuth::default());
        };
        let user = inner.accounts.get(&current.email).map(|a| a.user.clone());
        Ok(ProviderAuth {
            user,
            credentials: Some(credentials_for(current.token_generation)),
        })
    }

    async fn get_user(&self) -> Result<Option<User>, ProviderError> {
        self.begin()?;
        let inner = self.inner.borrow();
        Ok(inner
            .current
            .as_ref()
            .and_then(|current| inner.accounts.get(&current.email))
            .map(|account| account.user.clone()))
    }

    async fn refresh_session(&self) -> Result<ProviderAuth, ProviderError> {
        self.begin()?;
        let mut inner = self.inner.borrow_mut();
        let user = inner.current_account_mut()?.user.clone();
        let email = user.email.clone().unwrap_or_default();
        let credentials = inner.open_session(&email);
        Ok(ProviderAuth::complete(user, credentials))
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<(), ProviderError> {
        self.begin()?;
        // Unknown addresses succeed too, so the endpoint does not leak account existence.
        self.inner
            .borrow_mut()
            .reset_requests
            .push((email.to_owned(), redirect_to.map(str::to_owned)));
        Ok(())
    }

    async fn update_user(&self, update: &UserUpdate) -> Result<Option<User>, ProviderError> {
        self.begin()?;
        let mut inner = self.inner.borrow_mut();
        let old_email = inner
            .current
            .as_ref()
            .map(|current| current.email.clone())
            .ok_or_else(|| ProviderError::rejected(SESSION_MISSING_MESSAGE))?;

        let account = inner.current_account_mut()?;
        if let Some(password) = update.password.as_ref() {
            account.password = password.clone();
        }
        if let Some(data) = update.data.as_ref() {
            for (key, value) in data {
                account.user.metadata.insert(key.clone(), value.clone());
            }
        }
        if let Some(email) = update.email.as_ref() {
            account.user.email = Some(email.clone());
        }
        let user = account.user.clone();

        if let Some(new_email) = update.email.as_ref().filter(|email| **email != old_email) {
            if let Some(account) = inner.accounts.remove(&old_email) {
                inner.accounts.insert(new_email.clone(), account);
            }
            if let Some(current) = inner.current.as_mut() {
                current.email = new_email.clone();
            }
        }
        drop(inner);
        self.push(AuthEvent::UserUpdated(user.clone()));
        Ok(Some(user))
    }
}
