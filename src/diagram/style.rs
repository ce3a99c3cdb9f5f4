// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Derived visual attributes.
//!
//! These functions are the only place colors, sizes and opacities are decided. Both render modes
//! consume their output unchanged.

use std::fmt;

use crate::model::{DiagramEdge, DiagramNode, NodeId, NodeState};

use super::interaction::InteractionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub const fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

pub mod palette {
    use super::Hsl;

    pub const SELECTED: Hsl = Hsl::new(38, 80, 60);
    pub const HOVERED: Hsl = Hsl::new(38, 70, 55);
    pub const ACTIVE: Hsl = Hsl::new(38, 70, 50);
    pub const LATENT: Hsl = Hsl::new(220, 40, 45);
    pub const SATURATED: Hsl = Hsl::new(0, 50, 45);
    pub const FALLBACK: Hsl = Hsl::new(45, 5, 55);
    pub const EDGE_STROKE: Hsl = Hsl::new(38, 50, 40);
    pub const HIGHLIGHT: Hsl = Hsl::new(0, 0, 95);
}

/// Edge emphasis, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeTier {
    Hovered,
    Selected,
    Default,
}

impl EdgeTier {
    pub fn opacity(self) -> f64 {
        match self {
            Self::Hovered => 0.8,
            Self::Selected => 0.6,
            Self::Default => 0.15,
        }
    }
}

/// Default color for a lifecycle state.
pub fn state_color(state: &NodeState) -> Hsl {
    match state {
        NodeState::Active => palette::ACTIVE,
        NodeState::Latent => palette::LATENT,
        NodeState::Saturated => palette::SATURATED,
        NodeState::Unknown(_) => palette::FALLBACK,
    }
}

/// Priority: selected > hovered > lifecycle state.
pub fn color_for(node: &DiagramNode, is_hovered: bool, is_selected: bool) -> Hsl {
    if is_selected {
        palette::SELECTED
    } else if is_hovered {
        palette::HOVERED
    } else {
        state_color(node.state())
    }
}

/// Priority: incident to hovered > incident to selected > default.
pub fn edge_tier(
    edge: &DiagramEdge,
    hovered: Option<&NodeId>,
    selected: Option<&NodeId>,
) -> EdgeTier {
    if hovered.is_some_and(|id| edge.touches(id)) {
        EdgeTier::Hovered
    } else if selected.is_some_and(|id| edge.touches(id)) {
        EdgeTier::Selected
    } else {
        EdgeTier::Default
    }
}

pub fn edge_opacity_for(
    edge: &DiagramEdge,
    hovered: Option<&NodeId>,
    selected: Option<&NodeId>,
) -> f64 {
    edge_tier(edge, hovered, selected).opacity()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeVisual {
    pub fill: Hsl,
    /// Outer ring; grows while emphasized.
    pub ring_radius: f64,
    pub ring_opacity: f64,
    pub core_radius: f64,
    pub highlight_opacity: f64,
    pub glow: bool,
    /// Slow pulse halo, only for active nodes.
    pub pulse: bool,
    pub label_size: f64,
    pub label_weight: u16,
    pub label_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVisual {
    pub tier: EdgeTier,
    pub opacity: f64,
    pub stroke_width: f64,
    /// Edges are dashed unless they touch the hovered node.
    pub dashed: bool,
}

pub fn node_visual(node: &DiagramNode, interaction: &InteractionState) -> NodeVisual {
    let is_hovered = interaction.is_hovered(node.id());
    let is_selected = interaction.is_selected(node.id());
    let emphasized = is_hovered || is_selected;

    NodeVisual {
        fill: color_for(node, is_hovered, is_selected),
        ring_radius: if emphasized { 35.0 } else { 28.0 },
        ring_opacity: if emphasized { 0.5 } else { 0.2 },
        core_radius: if emphasized { 18.0 } else { 14.0 },
        highlight_opacity: if emphasized { 0.3 } else { 0.15 },
        glow: emphasized,
        pulse: *node.state() == NodeState::Active,
        label_size: if emphasized { 14.0 } else { 12.0 },
        label_weight: if emphasized { 600 } else { 400 },
        label_offset: if emphasized { 45.0 } else { 40.0 },
    }
}

pub fn edge_visual(edge: &DiagramEdge, interaction: &InteractionState) -> EdgeVisual {
    let tier = edge_tier(edge, interaction.hovered(), interaction.selected());
    EdgeVisual {
        tier,
        opacity: tier.opacity(),
        stroke_width: edge.weight() * 2.0,
        dashed: tier != EdgeTier::Hovered,
    }
}
