// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::NodeId;

/// Ephemeral hover/selection state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<NodeId>,
    selected: Option<NodeId>,
}

/// Result of a click toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
}

impl InteractionState {
    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn is_hovered(&self, node_id: &NodeId) -> bool {
        self.hovered.as_ref() == Some(node_id)
    }

    pub fn is_selected(&self, node_id: &NodeId) -> bool {
        self.selected.as_ref() == Some(node_id)
    }

    pub fn enter(&mut self, node_id: NodeId) {
        self.hovered = Some(node_id);
    }

    /// Clears the hover only if `node_id` is the current hover.
    ///
    /// Returns `false` for stale leave events (pointer already moved on to another node).
    pub fn leave(&mut self, node_id: &NodeId) -> bool {
        if self.is_hovered(node_id) {
            self.hovered = None;
            true
        } else {
            false
        }
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Single-selection toggle: clicking the selected node deselects it, any other node
    /// replaces the selection.
    pub fn toggle(&mut self, node_id: &NodeId) -> SelectionChange {
        if self.is_selected(node_id) {
            self.selected = None;
            SelectionChange::Deselected
        } else {
            self.selected = Some(node_id.clone());
            SelectionChange::Selected
        }
    }

    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }
}
