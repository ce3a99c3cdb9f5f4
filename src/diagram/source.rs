// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("no diagram document at {location}")]
    NotFound { location: String },
    #[error("failed to read diagram document {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },
}

/// Where an external diagram document comes from.
#[async_trait(?Send)]
pub trait DiagramSource {
    async fn fetch(&self) -> Result<String, FetchError>;

    fn location(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait(?Send)]
impl DiagramSource for FileSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => FetchError::NotFound {
                    location: self.location(),
                },
                _ => FetchError::Io {
                    location: self.location(),
                    source,
                },
            })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document held in memory; `None` behaves like an absent document.
#[derive(Debug, Clone, Default)]
pub struct InlineSource {
    text: Option<String>,
}

impl InlineSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl DiagramSource for InlineSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        self.text.clone().ok_or_else(|| FetchError::NotFound {
            location: self.location(),
        })
    }

    fn location(&self) -> String {
        "<inline>".to_owned()
    }
}
