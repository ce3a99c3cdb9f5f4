// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::diagram::document::ElementPath;
use crate::diagram::{DiagramController, RenderMode};
use crate::model::NodeId;

use super::text::fmt_num;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchTarget {
    Node(NodeId),
    Edge { source: NodeId, target: NodeId },
}

/// Attribute values to set on one marked element of the external document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPatch {
    pub target: PatchTarget,
    pub path: ElementPath,
    pub attrs: Vec<(&'static str, String)>,
}

impl ElementPatch {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Patches that bring a bound external document in line with the current interaction state.
///
/// Empty while the controller renders the generated diagram.
pub fn external_patches(controller: &DiagramController) -> Vec<ElementPatch> {
    let RenderMode::External(binding) = controller.mode() else {
        return Vec::new();
    };
    let document = binding.document();
    let map = controller.map();
    let mut patches = Vec::new();

    for node in map.nodes() {
        let Some(path) = document.node_path(node.id()) else {
            continue;
        };
        let visual = controller.node_visual(node);
        patches.push(ElementPatch {
            target: PatchTarget::Node(node.id().clone()),
            path: path.to_vec(),
            attrs: vec![
                ("fill", visual.fill.to_string()),
                ("stroke", visual.fill.to_string()),
                (
                    "filter",
                    if visual.glow { "url(#glow)" } else { "none" }.to_owned(),
                ),
                ("data-pulse", visual.pulse.to_string()),
            ],
        });
    }

    for marker in document.edge_markers() {
        let Some(edge) = map.edge_between(&marker.source, &marker.target) else {
            continue;
        };
        let visual = controller.edge_visual(edge);
        patches.push(ElementPatch {
            target: PatchTarget::Edge {
                source: marker.source.clone(),
                target: marker.target.clone(),
            },
            path: marker.path.clone(),
            attrs: vec![
                ("opacity", fmt_num(visual.opacity)),
                ("stroke-width", fmt_num(visual.stroke_width)),
                (
                    "stroke-dasharray",
                    if visual.dashed { "4 4" } else { "none" }.to_owned(),
                ),
            ],
        });
    }

    patches
}
