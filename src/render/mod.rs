// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Output for the two render modes.
//!
//! Both consume [`crate::diagram::SceneVisuals`]; neither decides colors or sizes on its own.

pub mod patch;
pub mod svg;
mod text;

pub use patch::{external_patches, ElementPatch, PatchTarget};
pub use svg::{render_generated, VIEW_BOX};
