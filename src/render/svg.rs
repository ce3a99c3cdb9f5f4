// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::diagram::{palette, DiagramController, EdgeVisual, NodeVisual};
use crate::model::{DiagramEdge, DiagramNode};

use super::text::{escape_xml, fmt_num};

pub const VIEW_BOX: &str = "0 0 800 600";

const DEFS: &str = concat!(
    "<defs>",
    r#"<filter id="glow" x="-50%" y="-50%" width="200%" height="200%">"#,
    r#"<feGaussianBlur stdDeviation="4" result="coloredBlur"/>"#,
    r#"<feMerge><feMergeNode in="coloredBlur"/><feMergeNode in="SourceGraphic"/></feMerge>"#,
    "</filter>",
    "</defs>",
);

/// Draws the built-in diagram for the controller's current interaction state.
///
/// Edges are emitted before nodes so nodes paint on top. Nodes and edges carry the
/// `data-node-id` / `data-edge` markers, so the output also loads as an external document.
pub fn render_generated(controller: &DiagramController) -> String {
    let map = controller.map();
    let visuals = controller.visuals();

    let mut out = String::with_capacity(256 + map.nodes().len() * 512);
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{VIEW_BOX}">"#
    ));
    out.push_str(DEFS);

    out.push_str(r#"<g class="edges">"#);
    for (edge, visual) in map.edges().iter().zip(&visuals.edges) {
        let (Some(source), Some(target)) = (
            map.node(edge.source().as_str()),
            map.node(edge.target().as_str()),
        ) else {
            continue;
        };
        push_edge(&mut out, edge, source, target, visual);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="nodes">"#);
    for (node, (_, visual)) in map.nodes().iter().zip(&visuals.nodes) {
        push_node(&mut out, node, visual);
    }
    out.push_str("</g>");

    out.push_str("</svg>");
    out
}

fn push_edge(
    out: &mut String,
    edge: &DiagramEdge,
    source: &DiagramNode,
    target: &DiagramNode,
    visual: &EdgeVisual,
) {
    let (x1, y1) = source.position();
    let (x2, y2) = target.position();
    let dash = if visual.dashed { "4 4" } else { "none" };
    out.push_str(&format!(
        r#"<line data-edge="{} {}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" opacity="{}" stroke-dasharray="{dash}"/>"#,
        escape_xml(edge.source().as_str()),
        escape_xml(edge.target().as_str()),
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2),
        palette::EDGE_STROKE,
        fmt_num(visual.stroke_width),
        fmt_num(visual.opacity),
    ));
}

fn push_node(out: &mut String, node: &DiagramNode, visual: &NodeVisual) {
    let (x, y) = node.position();
    let fill = visual.fill;

    out.push_str(&format!(
        r#"<g data-node-id="{}" data-state="{}" transform="translate({}, {})">"#,
        escape_xml(node.id().as_str()),
        escape_xml(node.state().as_str()),
        fmt_num(x),
        fmt_num(y),
    ));
    out.push_str(&format!(
        r#"<circle r="{}" fill="none" stroke="{fill}" stroke-width="1" opacity="{}"/>"#,
        fmt_num(visual.ring_radius),
        fmt_num(visual.ring_opacity),
    ));
    if visual.pulse {
        out.push_str(&format!(
            r#"<circle class="pulse" r="25" fill="{fill}" opacity="0.15"/>"#
        ));
    }
    let filter = if visual.glow {
        r#" filter="url(#glow)""#
    } else {
        ""
    };
    out.push_str(&format!(
        r#"<circle r="{}" fill="{fill}"{filter}/>"#,
        fmt_num(visual.core_radius),
    ));
    out.push_str(&format!(
        r#"<circle r="6" fill="{}" opacity="{}"/>"#,
        palette::HIGHLIGHT,
        fmt_num(visual.highlight_opacity),
    ));
    out.push_str(&format!(
        r#"<text y="{}" text-anchor="middle" font-size="{}" font-weight="{}">{}</text>"#,
        fmt_num(visual.label_offset),
        fmt_num(visual.label_size),
        visual.label_weight,
        escape_xml(node.label()),
    ));
    out.push_str(&format!(
        r#"<text y="{}" text-anchor="middle" font-size="9">[{}]</text>"#,
        fmt_num(visual.label_offset + 15.0),
        escape_xml(node.axis()),
    ));
    out.push_str("</g>");
}
