// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::RefCell;
use std::rc::Rc;

use rstest::{fixture, rstest};
use serde_json::{json, Map};

use super::{
    AuthError, AuthErrorKind, AuthEvent, AuthState, MemoryProvider, ProfileUpdate,
    ProviderError, SessionStore, SignUpMetadata, StoreOptions, Subscription, ValidationError,
};

const EMAIL: &str = "a@b.com";
const PASSWORD: &str = "abcdef";
const RESET_URL: &str = "https://platonia.example/platonia-lab/reset-password";

struct Recorder {
    seen: Rc<RefCell<Vec<AuthState>>>,
    _sub: Subscription,
}

impl Recorder {
    fn attach(store: &SessionStore<MemoryProvider>) -> Self {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = store.subscribe({
            let seen = Rc::clone(&seen);
            move |state| seen.borrow_mut().push(state.clone())
        });
        Self { seen, _sub: sub }
    }

    fn count(&self) -> usize {
        self.seen.borrow().len()
    }

    fn last(&self) -> Option<AuthState> {
        self.seen.borrow().last().cloned()
    }
}

#[fixture]
fn store() -> SessionStore<MemoryProvider> {
    SessionStore::new(MemoryProvider::new())
}

async fn signed_in() -> SessionStore<MemoryProvider> {
    let provider = MemoryProvider::new();
    provider.seed_account(EMAIL, PASSWORD).expect("seed");
    let mut store = SessionStore::new(provider);
    store.sign_in(EMAIL, PASSWORD).await.expect("sign in");
    store
}

#[rstest]
#[tokio::test]
async fn sign_up_authenticates_and_notifies_once(mut store: SessionStore<MemoryProvider>) {
    let recorder = Recorder::attach(&store);
    assert_eq!(store.state(), AuthState::Unauthenticated);

    let session = store.sign_up(EMAIL, PASSWORD, None).await.expect("sign up");

    assert_eq!(session.user().email.as_deref(), Some(EMAIL));
    assert!(store.is_authenticated());
    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.last(), Some(AuthState::Authenticated(session)));
}

#[rstest]
#[tokio::test]
async fn sign_in_notifies_every_observer_exactly_once(mut store: SessionStore<MemoryProvider>) {
    store.provider().seed_account(EMAIL, PASSWORD).expect("seed");
    let first = Recorder::attach(&store);
    let second = Recorder::attach(&store);

    let session = store.sign_in(EMAIL, PASSWORD).await.expect("sign in");

    assert_eq!(store.current_user().as_ref(), Some(session.user()));
    assert!(session.credentials().as_value().is_object());
    for recorder in [&first, &second] {
        assert_eq!(recorder.count(), 1);
        assert!(recorder.last().is_some_and(|state| state.is_authenticated()));
    }
}

#[rstest]
#[tokio::test]
async fn bad_credentials_are_classified_and_state_is_kept(
    mut store: SessionStore<MemoryProvider>,
) {
    store.provider().seed_account(EMAIL, PASSWORD).expect("seed");
    let recorder = Recorder::attach(&store);

    let err = store.sign_in(EMAIL, "wrong-password").await.unwrap_err();

    assert_eq!(err, AuthError::BadCredentials);
    assert_eq!(err.kind(), AuthErrorKind::ProviderRejected);
    assert_eq!(store.state(), AuthState::Unauthenticated);
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn failed_sign_in_leaves_existing_session_untouched() {
    let mut store = signed_in().await;
    let before = store.current_session().expect("session");
    let recorder = Recorder::attach(&store);

    store
        .provider()
        .fail_next(ProviderError::rejected("Invalid login credentials"));
    let err = store.sign_in(EMAIL, PASSWORD).await.unwrap_err();

    assert_eq!(err, AuthError::BadCredentials);
    let after = store.current_session().expect("session");
    assert!(Rc::ptr_eq(&before, &after));
    assert_eq!(recorder.count(), 0);
}

#[rstest]
#[tokio::test]
async fn unconfirmed_email_is_classified(mut store: SessionStore<MemoryProvider>) {
    store
        .provider()
        .fail_next(ProviderError::rejected("Email not confirmed"));

    let err = store.sign_in(EMAIL, PASSWORD).await.unwrap_err();

    assert_eq!(err, AuthError::EmailUnconfirmed);
}

#[rstest]
#[tokio::test]
async fn other_rejections_pass_through_verbatim(mut store: SessionStore<MemoryProvider>) {
    store
        .provider()
        .fail_next(ProviderError::rejected("Signups not allowed for this instance"));

    let err = store.sign_up(EMAIL, PASSWORD, None).await.unwrap_err();

    assert_eq!(err.to_string(), "Signups not allowed for this instance");
    assert_eq!(err.kind(), AuthErrorKind::ProviderRejected);
}

#[tokio::test]
async fn sign_up_awaiting_confirmation_reports_unconfirmed() {
    let provider = MemoryProvider::new().with_email_confirmation(true);
    let mut store = SessionStore::new(provider);
    let recorder = Recorder::attach(&store);

    let err = store.sign_up(EMAIL, PASSWORD, None).await.unwrap_err();
    assert_eq!(err, AuthError::EmailUnconfirmed);
    assert!(!store.is_authenticated());
    assert_eq!(recorder.count(), 0);

    let err = store.sign_in(EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(err, AuthError::EmailUnconfirmed);

    assert!(store.provider().confirm_email(EMAIL));
    store.sign_in(EMAIL, PASSWORD).await.expect("sign in after confirmation");
    assert_eq!(recorder.count(), 1);
}

#[rstest]
#[case("not-an-email", PASSWORD, ValidationError::Email)]
#[case(EMAIL, "abc", ValidationError::PasswordTooShort { min: 6 })]
#[tokio::test]
async fn invalid_input_never_reaches_the_provider(
    mut store: SessionStore<MemoryProvider>,
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: ValidationError,
) {
    let err = store.sign_in(email, password).await.unwrap_err();
    assert_eq!(err, AuthError::Validation(expected.clone()));

    let err = store.sign_up(email, password, None).await.unwrap_err();
    assert_eq!(err, AuthError::Validation(expected));
    assert_eq!(err.kind(), AuthErrorKind::Validation);

    assert_eq!(store.provider().calls(), 0);
}

#[tokio::test]
async fn configured_minimum_password_length_applies() {
    let options = StoreOptions {
        min_password_len: 10,
        ..StoreOptions::default()
    };
    let mut store = SessionStore::with_options(MemoryProvider::new(), options);

    let err = store.sign_up(EMAIL, PASSWORD, None).await.unwrap_err();
    assert_eq!(
        err,
        AuthError::Validation(ValidationError::PasswordTooShort { min: 10 })
    );
}

#[rstest]
#[tokio::test]
async fn sign_up_metadata_reaches_the_user_record(mut store: SessionStore<MemoryProvider>) {
    let metadata = SignUpMetadata {
        name: Some("Ana".to_owned()),
        role: Some("student".to_owned()),
    };

    let session = store
        .sign_up(EMAIL, PASSWORD, Some(metadata))
        .await
        .expect("sign up");

    assert_eq!(session.user().display_name(), Some("Ana"));
    assert_eq!(session.user().metadata.get("role"), Some(&json!("student")));
}

#[tokio::test]
async fn sign_out_clears_session_and_notifies() {
    let mut store = signed_in().await;
    let recorder = Recorder::attach(&store);

    store.sign_out().await.expect("sign out");

    assert_eq!(store.state(), AuthState::Unauthenticated);
    assert!(store.current_user().is_none());
    assert!(!store.provider().has_session());
    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.last(), Some(AuthState::Unauthenticated));
}

#[tokio::test]
async fn failed_sign_out_keeps_local_session() {
    let mut store = signed_in().await;
    let recorder = Recorder::attach(&store);
    store.provider().set_offline(true);

    let err = store.sign_out().await.unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::Network);
    assert!(store.is_authenticated());
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn refresh_replaces_credentials_and_notifies() {
    let mut store = signed_in().await;
    let before = store.current_session().expect("session");
    let recorder = Recorder::attach(&store);

    let after = store.refresh().await.expect("refresh");

    assert_eq!(before.user(), after.user());
    assert_ne!(before.credentials(), after.credentials());
    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn failed_refresh_is_not_a_sign_out() {
    let mut store = signed_in().await;
    let before = store.current_session().expect("session");
    let recorder = Recorder::attach(&store);
    store.provider().set_offline(true);

    let err = store.refresh().await.unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::Network);
    let after = store.current_session().expect("session kept");
    assert!(Rc::ptr_eq(&before, &after));
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn restore_picks_up_provider_session_from_cold_start() {
    let provider = MemoryProvider::new();
    provider.seed_account(EMAIL, PASSWORD).expect("seed");
    let mut warm = SessionStore::new(provider);
    warm.sign_in(EMAIL, PASSWORD).await.expect("sign in");

    // Same provider, fresh store: nothing cached until the first check resolves.
    let cold_provider = warm.into_provider();
    let mut cold = SessionStore::new(cold_provider);
    let recorder = Recorder::attach(&cold);
    assert!(!cold.is_authenticated());

    let state = cold.restore().await.expect("restore");

    assert!(state.is_authenticated());
    assert_eq!(state.user().and_then(|u| u.email.as_deref()), Some(EMAIL));
    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn refresh_from_cold_start_authenticates() {
    let provider = MemoryProvider::new();
    provider.seed_account(EMAIL, PASSWORD).expect("seed");
    let mut warm = SessionStore::new(provider);
    warm.sign_in(EMAIL, PASSWORD).await.expect("sign in");

    let mut cold = SessionStore::new(warm.into_provider());
    let recorder = Recorder::attach(&cold);

    let session = cold.refresh().await.expect("refresh");

    assert_eq!(session.user().email.as_deref(), Some(EMAIL));
    assert_eq!(cold.state(), AuthState::Authenticated(session));
    assert_eq!(recorder.count(), 1);
}

#[rstest]
#[tokio::test]
async fn refresh_without_provider_session_is_rejected(mut store: SessionStore<MemoryProvider>) {
    let recorder = Recorder::attach(&store);

    let err = store.refresh().await.unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::ProviderRejected);
    assert_eq!(store.state(), AuthState::Unauthenticated);
    assert_eq!(recorder.count(), 0);
}

#[rstest]
#[tokio::test]
async fn restore_without_session_is_silent(mut store: SessionStore<MemoryProvider>) {
    let recorder = Recorder::attach(&store);

    let state = store.restore().await.expect("restore");

    assert_eq!(state, AuthState::Unauthenticated);
    assert_eq!(recorder.count(), 0);
}

#[rstest]
#[tokio::test]
async fn session_bound_operations_require_a_session(mut store: SessionStore<MemoryProvider>) {
    assert_eq!(store.fetch_user().await.unwrap_err(), AuthError::NotFound);
    assert_eq!(
        store.update_password("new-password").await.unwrap_err(),
        AuthError::NotFound
    );
    assert_eq!(
        store
            .update_profile(ProfileUpdate::default())
            .await
            .unwrap_err()
            .kind(),
        AuthErrorKind::NotFound
    );
    assert_eq!(store.provider().calls(), 0);
}

#[tokio::test]
async fn update_profile_swaps_user_and_keeps_credentials() {
    let mut store = signed_in().await;
    let before = store.current_session().expect("session");
    let recorder = Recorder::attach(&store);

    let mut data = Map::new();
    data.insert("name".to_owned(), json!("Sócrates"));
    let user = store
        .update_profile(ProfileUpdate {
            email: None,
            data: Some(data),
        })
        .await
        .expect("update profile");

    assert_eq!(user.display_name(), Some("Sócrates"));
    let after = store.current_session().expect("session");
    assert_eq!(after.user(), &user);
    assert_eq!(after.credentials(), before.credentials());
    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn update_password_allows_signing_in_with_the_new_one() {
    let mut store = signed_in().await;

    store.update_password("nueva-clave").await.expect("update password");
    store.sign_out().await.expect("sign out");

    assert_eq!(
        store.sign_in(EMAIL, PASSWORD).await.unwrap_err(),
        AuthError::BadCredentials
    );
    store.sign_in(EMAIL, "nueva-clave").await.expect("sign in");
}

#[tokio::test]
async fn password_reset_uses_configured_redirect_and_keeps_state() {
    let options = StoreOptions {
        password_reset_redirect_to: Some(RESET_URL.to_owned()),
        ..StoreOptions::default()
    };
    let store = SessionStore::with_options(MemoryProvider::new(), options);
    let recorder = Recorder::attach(&store);

    store.request_password_reset(EMAIL).await.expect("reset");

    assert_eq!(
        store.provider().reset_requests(),
        vec![(EMAIL.to_owned(), Some(RESET_URL.to_owned()))]
    );
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn provider_pushed_sign_out_ends_session_once() {
    let mut store = signed_in().await;
    let mut events = store.provider().take_events().expect("events");
    let recorder = Recorder::attach(&store);

    store.provider().revoke_session();
    while let Ok(event) = events.try_recv() {
        store.handle_provider_event(event);
    }

    // The SignedIn echo matches the held session, so only the SignedOut is observed.
    assert_eq!(store.state(), AuthState::Unauthenticated);
    assert_eq!(recorder.last(), Some(AuthState::Unauthenticated));
    assert_eq!(recorder.count(), 1);

    store.handle_provider_event(AuthEvent::SignedOut);
    assert_eq!(recorder.count(), 1);
}

#[rstest]
#[tokio::test]
async fn sign_in_with_event_pump_notifies_once(mut store: SessionStore<MemoryProvider>) {
    store.provider().seed_account(EMAIL, PASSWORD).expect("seed");
    let mut events = store.provider().take_events().expect("events");
    let recorder = Recorder::attach(&store);

    let session = store.sign_in(EMAIL, PASSWORD).await.expect("sign in");
    while let Ok(event) = events.try_recv() {
        store.handle_provider_event(event);
    }

    assert_eq!(recorder.count(), 1);
    assert_eq!(recorder.last(), Some(AuthState::Authenticated(session)));
}

#[tokio::test]
async fn profile_update_echo_does_not_notify_again() {
    let mut store = signed_in().await;
    let mut events = store.provider().take_events().expect("events");
    while events.try_recv().is_ok() {}
    let recorder = Recorder::attach(&store);

    let mut data = Map::new();
    data.insert("name".to_owned(), json!("Sócrates"));
    store
        .update_profile(ProfileUpdate {
            email: None,
            data: Some(data),
        })
        .await
        .expect("update profile");
    while let Ok(event) = events.try_recv() {
        store.handle_provider_event(event);
    }

    assert_eq!(recorder.count(), 1);
}

#[tokio::test]
async fn failed_user_fetch_keeps_session() {
    let mut store = signed_in().await;
    let before = store.current_session().expect("session");
    let recorder = Recorder::attach(&store);
    store
        .provider()
        .fail_next(ProviderError::transport("connection reset"));

    let err = store.fetch_user().await.unwrap_err();

    assert_eq!(err.kind(), AuthErrorKind::Network);
    let after = store.current_session().expect("session kept");
    assert!(Rc::ptr_eq(&before, &after));
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn partial_provider_events_are_ignored() {
    let mut store = signed_in().await;
    let recorder = Recorder::attach(&store);

    store.handle_provider_event(AuthEvent::TokenRefreshed(Default::default()));

    assert!(store.is_authenticated());
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn dropped_subscription_stops_notifications() {
    let mut store = signed_in().await;
    let recorder = Recorder::attach(&store);
    assert_eq!(store.subscriber_count(), 1);

    drop(recorder);
    assert_eq!(store.subscriber_count(), 0);
    store.sign_out().await.expect("sign out");
}
