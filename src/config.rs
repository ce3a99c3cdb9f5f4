// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration from `PLATONIA_*` environment variables.

use std::path::PathBuf;

use crate::auth::{StoreOptions, DEFAULT_MIN_PASSWORD_LEN};

pub const SITE_URL_VAR: &str = "PLATONIA_SITE_URL";
pub const MIN_PASSWORD_LEN_VAR: &str = "PLATONIA_MIN_PASSWORD_LEN";
pub const NODES_VAR: &str = "PLATONIA_NODES";
pub const QUESTIONS_VAR: &str = "PLATONIA_QUESTIONS";
pub const EPISODES_VAR: &str = "PLATONIA_EPISODES";
pub const DIAGRAM_VAR: &str = "PLATONIA_DIAGRAM";
pub const LOG_VAR: &str = "PLATONIA_LOG";

pub const DEFAULT_LOG_FILTER: &str = "warn,platonia=info";

/// Path under the site root where the lab is served.
const LAB_PATH: &str = "platonia-lab";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Site origin used to build auth redirect links; no redirects when unset.
    pub site_url: Option<String>,
    pub min_password_len: usize,
    /// Fixture overrides; the embedded fixtures are used when unset.
    pub nodes_path: Option<PathBuf>,
    pub questions_path: Option<PathBuf>,
    pub episodes_path: Option<PathBuf>,
    /// External diagram document; the generated diagram is used when unset.
    pub diagram_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: None,
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            nodes_path: None,
            questions_path: None,
            episodes_path: None,
            diagram_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get(SITE_URL_VAR) {
            config.site_url = Some(parse_site_url(&raw)?);
        }
        if let Some(raw) = get(MIN_PASSWORD_LEN_VAR) {
            config.min_password_len = parse_min_password_len(&raw)?;
        }
        config.nodes_path = get(NODES_VAR).map(PathBuf::from);
        config.questions_path = get(QUESTIONS_VAR).map(PathBuf::from);
        config.episodes_path = get(EPISODES_VAR).map(PathBuf::from);
        config.diagram_path = get(DIAGRAM_VAR).map(PathBuf::from);
        if let Some(filter) = get(LOG_VAR) {
            config.log_filter = filter;
        }

        Ok(config)
    }

    /// Sign-up confirmation link target: `<site>/platonia-lab/`.
    pub fn email_redirect_to(&self) -> Option<String> {
        self.site_url
            .as_deref()
            .map(|site| format!("{site}/{LAB_PATH}/"))
    }

    /// Password reset link target: `<site>/platonia-lab/reset-password`.
    pub fn password_reset_redirect_to(&self) -> Option<String> {
        self.site_url
            .as_deref()
            .map(|site| format!("{site}/{LAB_PATH}/reset-password"))
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            min_password_len: self.min_password_len,
            email_redirect_to: self.email_redirect_to(),
            password_reset_redirect_to: self.password_reset_redirect_to(),
        }
    }
}

fn parse_site_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match host {
        Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
            Ok(trimmed.to_owned())
        }
        _ => Err(ConfigError::InvalidEnv {
            var: SITE_URL_VAR,
            reason: format!("expected an http(s) origin, got {raw:?}"),
        }),
    }
}

fn parse_min_password_len(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(len) if len > 0 => Ok(len),
        _ => Err(ConfigError::InvalidEnv {
            var: MIN_PASSWORD_LEN_VAR,
            reason: format!("expected a positive integer, got {raw:?}"),
        }),
    }
}
