// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use super::controller::DiagramController;
use crate::model::NodeId;

/// Pointer interactions the controller listens for on each node marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerEvent {
    Enter,
    Leave,
    Click,
}

impl PointerEvent {
    pub const ALL: [Self; 3] = [Self::Enter, Self::Leave, Self::Click];
}

/// Handle for one attached listener, issued by the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerKey(u64);

impl ListenerKey {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("no element carries a marker for node {node_id}")]
    MissingElement { node_id: NodeId },
    #[error("target refused listener for node {node_id}: {reason}")]
    Rejected { node_id: NodeId, reason: String },
}

/// Host capability: elements of an external document that listeners can be bound to.
///
/// The controller records every key it receives and detaches all of them on teardown; the
/// host must not rely on anything else to release listeners.
pub trait InteractionTarget {
    fn attach(&mut self, node_id: &NodeId, event: PointerEvent) -> Result<ListenerKey, BindError>;

    fn detach(&mut self, key: ListenerKey);
}

/// One listener owned by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub node_id: NodeId,
    pub event: PointerEvent,
    pub key: ListenerKey,
}

/// In-memory `InteractionTarget` that keeps a listener table and routes events back.
///
/// Doubles as handler-count instrumentation: `len` is the number of live listeners.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next_key: u64,
    listeners: BTreeMap<ListenerKey, (NodeId, PointerEvent)>,
    elements: Option<BTreeSet<NodeId>>,
    attached_total: usize,
    detached_total: usize,
}

impl ListenerRegistry {
    /// Accepts listeners for any node id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only nodes in `elements` exist on the host; attaching to others fails.
    pub fn with_elements(elements: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            elements: Some(elements.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn listeners_for(&self, node_id: &NodeId) -> usize {
        self.listeners
            .values()
            .filter(|(bound, _)| bound == node_id)
            .count()
    }

    pub fn attached_total(&self) -> usize {
        self.attached_total
    }

    pub fn detached_total(&self) -> usize {
        self.detached_total
    }

    /// Delivers `event` to `controller` if a listener for it is attached.
    pub fn dispatch(
        &self,
        controller: &mut DiagramController,
        node_id: &NodeId,
        event: PointerEvent,
    ) -> bool {
        let bound = self
            .listeners
            .values()
            .any(|(bound_id, bound_event)| bound_id == node_id && *bound_event == event);
        if bound {
            controller.handle_pointer(node_id.as_str(), event);
        }
        bound
    }
}

impl InteractionTarget for ListenerRegistry {
    fn attach(&mut self, node_id: &NodeId, event: PointerEvent) -> Result<ListenerKey, BindError> {
        if let Some(elements) = &self.elements {
            if !elements.contains(node_id) {
                return Err(BindError::MissingElement {
                    node_id: node_id.clone(),
                });
            }
        }

        let key = ListenerKey::new(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.listeners.insert(key, (node_id.clone(), event));
        self.attached_total += 1;
        Ok(key)
    }

    fn detach(&mut self, key: ListenerKey) {
        if self.listeners.remove(&key).is_some() {
            self.detached_total += 1;
        }
    }
}
