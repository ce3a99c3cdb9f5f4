// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interactive concept-map diagram: hover/selection state, derived visuals and the
//! generated/external render modes.

pub mod binding;
pub mod controller;
pub mod document;
pub mod interaction;
pub mod source;
pub mod style;


pub use binding::{BindError, Binding, InteractionTarget, ListenerKey, ListenerRegistry, PointerEvent};
pub use controller::{DiagramController, ExternalBinding, RenderMode, RenderModeKind, SceneVisuals};
pub use document::{DocumentError, Element, ExternalDocument};
pub use interaction::{InteractionState, SelectionChange};
pub use source::{DiagramSource, FetchError, FileSource, InlineSource};
pub use style::{palette, EdgeTier, EdgeVisual, Hsl, NodeVisual};
