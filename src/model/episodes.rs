// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{EpisodeId, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpisodeState {
    Published,
    Draft,
}

/// A podcast episode and the concept nodes it explores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    id: EpisodeId,
    title: String,
    description: String,
    /// Display duration as authored, e.g. `"42:15"`.
    duration: String,
    /// ISO `YYYY-MM-DD` publication date.
    date: String,
    #[serde(default)]
    nodes: Vec<NodeId>,
    state: EpisodeState,
}

impl Episode {
    pub fn id(&self) -> &EpisodeId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn is_published(&self) -> bool {
        self.state == EpisodeState::Published
    }

    /// Sequence number shown to listeners: the id without its `ep` prefix.
    pub fn number(&self) -> &str {
        let id = self.id.as_str();
        id.strip_prefix("ep").unwrap_or(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeBank {
    episodes: Vec<Episode>,
}

impl EpisodeBank {
    pub fn new(episodes: Vec<Episode>) -> Self {
        Self { episodes }
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Published episodes in fixture order. Drafts never reach listeners.
    pub fn published(&self) -> impl Iterator<Item = &Episode> {
        self.episodes.iter().filter(|episode| episode.is_published())
    }

    /// Looks up any episode, drafts included.
    pub fn find(&self, id: &str) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.id.as_str() == id)
    }

    /// Published episodes that explore `node_id`.
    pub fn related_to<'a>(&'a self, node_id: &'a NodeId) -> impl Iterator<Item = &'a Episode> + 'a {
        self.published()
            .filter(move |episode| episode.nodes.contains(node_id))
    }
}
