// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static content model.
//!
//! The concept map (nodes + undirected weighted edges), the Socratic question bank and the
//! podcast episode list are loaded once from fixtures and never mutated afterwards.

pub mod episodes;
pub mod fixtures;
pub mod ids;
pub mod map;
pub mod questions;

pub use episodes::{Episode, EpisodeBank, EpisodeState};
pub use fixtures::FixtureError;
pub use ids::{EpisodeId, Id, IdError, NodeId, QuestionId, UserId};
pub use map::{ConceptMap, DiagramEdge, DiagramNode, MapError, NodeState, StateStats};
pub use questions::{QuestionBank, SocraticQuestion};
