// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side auth session state.
//!
//! `SessionStore` caches the provider's session, mediates every auth call and fans out change
//! notifications. Cryptography, token handling and persistence stay with the provider.

pub mod error;
pub mod memory;
pub mod provider;
pub mod session;
pub mod store;
pub mod subscription;
pub mod validate;

#[cfg(test)]
mod tests;

pub use error::{AuthError, AuthErrorKind};
pub use memory::MemoryProvider;
pub use provider::{
    AuthEvent, AuthProvider, PasswordSignIn, ProviderError, SignUpMetadata, SignUpRequest,
    UserUpdate,
};
pub use session::{AuthState, Credentials, ProviderAuth, Session, User};
pub use store::{ProfileUpdate, SessionStore, StoreOptions};
pub use subscription::Subscription;
pub use validate::{ValidationError, DEFAULT_MIN_PASSWORD_LEN};
