// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{ConceptMap, DiagramEdge, DiagramNode, NodeId};

use super::binding::{BindError, Binding, InteractionTarget, PointerEvent};
use super::document::{DocumentError, ExternalDocument};
use super::interaction::{InteractionState, SelectionChange};
use super::source::{DiagramSource, FetchError};
use super::style::{self, EdgeVisual, Hsl, NodeVisual};

type SelectCallback = Box<dyn FnMut(Option<&DiagramNode>)>;

/// An external document plus every listener bound to it.
#[derive(Debug)]
pub struct ExternalBinding {
    document: ExternalDocument,
    bindings: Vec<Binding>,
}

impl ExternalBinding {
    pub fn document(&self) -> &ExternalDocument {
        &self.document
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

#[derive(Debug, Default)]
pub enum RenderMode {
    #[default]
    Generated,
    External(ExternalBinding),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderModeKind {
    Generated,
    External,
}

impl RenderMode {
    pub fn kind(&self) -> RenderModeKind {
        match self {
            Self::Generated => RenderModeKind::Generated,
            Self::External(_) => RenderModeKind::External,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Visuals for the whole map, computed with one pass of the style functions.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneVisuals {
    pub nodes: Vec<(NodeId, NodeVisual)>,
    pub edges: Vec<EdgeVisual>,
}

/// Interaction state and derived visuals for one concept map.
pub struct DiagramController {
    map: ConceptMap,
    interaction: InteractionState,
    mode: RenderMode,
    fallback_locked: bool,
    on_select: Option<SelectCallback>,
}

impl fmt::Debug for DiagramController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramController")
            .field("nodes", &self.map.nodes().len())
            .field("interaction", &self.interaction)
            .field("mode", &self.mode.kind())
            .field("fallback_locked", &self.fallback_locked)
            .finish_non_exhaustive()
    }
}

impl DiagramController {
    pub fn new(map: ConceptMap) -> Self {
        Self {
            map,
            interaction: InteractionState::default(),
            mode: RenderMode::Generated,
            fallback_locked: false,
            on_select: None,
        }
    }

    /// Called with the node on select and with `None` on deselect.
    pub fn on_select(mut self, callback: impl FnMut(Option<&DiagramNode>) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn map(&self) -> &ConceptMap {
        &self.map
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn hovered(&self) -> Option<&NodeId> {
        self.interaction.hovered()
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.interaction.selected()
    }

    pub fn selected_node(&self) -> Option<&DiagramNode> {
        self.selected().and_then(|id| self.map.node(id.as_str()))
    }

    pub fn mode(&self) -> &RenderMode {
        &self.mode
    }

    pub fn mode_kind(&self) -> RenderModeKind {
        self.mode.kind()
    }

    pub fn is_fallback_locked(&self) -> bool {
        self.fallback_locked
    }

    /// Single attempt to switch to an external document.
    ///
    /// Any failure leaves the controller in generated mode for good; nothing is reported to the
    /// caller beyond the resulting mode. Already bound documents are kept as they are.
    pub async fn load_diagram(
        &mut self,
        source: &dyn DiagramSource,
        target: &mut dyn InteractionTarget,
    ) -> RenderModeKind {
        if matches!(self.mode, RenderMode::External(_)) || self.fallback_locked {
            return self.mode_kind();
        }

        match self.try_load(source, target).await {
            Ok(binding) => {
                tracing::debug!(
                    location = %source.location(),
                    listeners = binding.bindings.len(),
                    "bound external diagram"
                );
                self.mode = RenderMode::External(binding);
            }
            Err(err) => {
                tracing::debug!(
                    location = %source.location(),
                    error = %err,
                    "external diagram unavailable; using generated diagram"
                );
                self.fallback_locked = true;
            }
        }
        self.mode_kind()
    }

    async fn try_load(
        &self,
        source: &dyn DiagramSource,
        target: &mut dyn InteractionTarget,
    ) -> Result<ExternalBinding, LoadError> {
        let text = source.fetch().await?;
        let document = ExternalDocument::parse(&text)?;
        document.validate_against(&self.map)?;
        let bindings = self.bind_all(target)?;
        Ok(ExternalBinding { document, bindings })
    }

    fn bind_all(&self, target: &mut dyn InteractionTarget) -> Result<Vec<Binding>, BindError> {
        let mut bindings = Vec::with_capacity(self.map.nodes().len() * PointerEvent::ALL.len());
        for node in self.map.nodes() {
            for event in PointerEvent::ALL {
                match target.attach(node.id(), event) {
                    Ok(key) => bindings.push(Binding {
                        node_id: node.id().clone(),
                        event,
                        key,
                    }),
                    Err(err) => {
                        for binding in bindings.drain(..) {
                            target.detach(binding.key);
                        }
                        return Err(err);
                    }
                }
            }
        }
        Ok(bindings)
    }

    /// Releases every listener of an external document and returns how many were detached.
    pub fn teardown(&mut self, target: &mut dyn InteractionTarget) -> usize {
        let RenderMode::External(binding) = std::mem::take(&mut self.mode) else {
            return 0;
        };
        let released = binding.bindings.len();
        for bound in binding.bindings {
            target.detach(bound.key);
        }
        self.interaction.clear_hover();
        tracing::debug!(released, "unbound external diagram");
        released
    }

    pub fn handle_pointer(&mut self, node_id: &str, event: PointerEvent) {
        match event {
            PointerEvent::Enter => self.on_node_enter(node_id),
            PointerEvent::Leave => self.on_node_leave(node_id),
            PointerEvent::Click => self.on_node_click(node_id),
        }
    }

    pub fn on_node_enter(&mut self, node_id: &str) {
        if let Some(node) = self.map.node(node_id) {
            self.interaction.enter(node.id().clone());
        }
    }

    /// Ignored unless `node_id` is the current hover.
    pub fn on_node_leave(&mut self, node_id: &str) {
        if let Some(node) = self.map.node(node_id) {
            if !self.interaction.leave(node.id()) {
                tracing::trace!(node_id, "stale leave ignored");
            }
        }
    }

    pub fn on_blur(&mut self) {
        self.interaction.clear_hover();
    }

    pub fn on_node_click(&mut self, node_id: &str) {
        let Some(node) = self.map.node(node_id) else {
            return;
        };
        let change = self.interaction.toggle(node.id());
        tracing::debug!(node_id, ?change, "selection toggled");
        if let Some(callback) = self.on_select.as_mut() {
            match change {
                SelectionChange::Selected => callback(Some(node)),
                SelectionChange::Deselected => callback(None),
            }
        }
    }

    pub fn clear_selection(&mut self) {
        if self.interaction.clear_selection() {
            if let Some(callback) = self.on_select.as_mut() {
                callback(None);
            }
        }
    }

    pub fn color_for(&self, node: &DiagramNode) -> Hsl {
        style::color_for(
            node,
            self.interaction.is_hovered(node.id()),
            self.interaction.is_selected(node.id()),
        )
    }

    pub fn edge_opacity_for(&self, edge: &DiagramEdge) -> f64 {
        style::edge_opacity_for(edge, self.interaction.hovered(), self.interaction.selected())
    }

    pub fn node_visual(&self, node: &DiagramNode) -> NodeVisual {
        style::node_visual(node, &self.interaction)
    }

    pub fn edge_visual(&self, edge: &DiagramEdge) -> EdgeVisual {
        style::edge_visual(edge, &self.interaction)
    }

    pub fn visuals(&self) -> SceneVisuals {
        SceneVisuals {
            nodes: self
                .map
                .nodes()
                .iter()
                .map(|node| (node.id().clone(), self.node_visual(node)))
                .collect(),
            edges: self
                .map
                .edges()
                .iter()
                .map(|edge| self.edge_visual(edge))
                .collect(),
        }
    }
}
