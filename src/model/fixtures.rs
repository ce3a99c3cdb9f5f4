// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static fixtures loaded once at startup.
//!
//! The default data set is embedded in the binary; any file with the same JSON shape can be
//! loaded instead.

use std::fs;
use std::path::{Path, PathBuf};

use super::episodes::EpisodeBank;
use super::map::{ConceptMap, MapError, MapFile};
use super::questions::QuestionBank;

const DEFAULT_NODES_JSON: &str = include_str!("../../data/nodes.json");
const DEFAULT_QUESTIONS_JSON: &str = include_str!("../../data/questions.json");
const DEFAULT_EPISODES_JSON: &str = include_str!("../../data/episodes.json");

/// Label used in errors for the embedded data set.
const EMBEDDED: &str = "<embedded>";

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixture {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse fixture {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("fixture {path:?} is not a valid concept map: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: MapError,
    },
}

pub fn default_map() -> Result<ConceptMap, FixtureError> {
    parse_map(DEFAULT_NODES_JSON, Path::new(EMBEDDED))
}

pub fn default_questions() -> Result<QuestionBank, FixtureError> {
    parse_questions(DEFAULT_QUESTIONS_JSON, Path::new(EMBEDDED))
}

pub fn default_episodes() -> Result<EpisodeBank, FixtureError> {
    parse_json(DEFAULT_EPISODES_JSON, Path::new(EMBEDDED))
}

pub fn load_map(path: impl AsRef<Path>) -> Result<ConceptMap, FixtureError> {
    let path = path.as_ref();
    let text = read(path)?;
    parse_map(&text, path)
}

pub fn load_questions(path: impl AsRef<Path>) -> Result<QuestionBank, FixtureError> {
    let path = path.as_ref();
    let text = read(path)?;
    parse_questions(&text, path)
}

pub fn load_episodes(path: impl AsRef<Path>) -> Result<EpisodeBank, FixtureError> {
    let path = path.as_ref();
    let text = read(path)?;
    parse_json(&text, path)
}

fn read(path: &Path) -> Result<String, FixtureError> {
    fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_map(text: &str, path: &Path) -> Result<ConceptMap, FixtureError> {
    let file: MapFile = serde_json::from_str(text).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    ConceptMap::new(file.nodes, file.edges).map_err(|source| FixtureError::Map {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_questions(text: &str, path: &Path) -> Result<QuestionBank, FixtureError> {
    parse_json(text, path)
}

fn parse_json<T: serde::de::DeserializeOwned>(text: &str, path: &Path) -> Result<T, FixtureError> {
    serde_json::from_str(text).map_err(|source| FixtureError::Json {
        path: path.to_path_buf(),
        source,
    })
}
