// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::{ConceptMap, NodeId};

pub const ROOT_TAG: &str = "svg";
pub const NODE_ID_ATTR: &str = "data-node-id";
pub const EDGE_ATTR: &str = "data-edge";

/// Child indices from the root down to an element.
pub type ElementPath = Vec<usize>;

/// One element of an externally authored visual tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Element {
    tag: String,
    #[serde(default)]
    attrs: BTreeMap<String, String>,
    #[serde(default)]
    children: Vec<Element>,
}

impl Element {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document is not valid XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("document root must be <svg>, found <{found}>")]
    RootTag { found: String },
    #[error("invalid {attr} marker value {value:?}")]
    InvalidMarker { attr: &'static str, value: String },
    #[error("node {node_id} is marked more than once")]
    DuplicateNodeMarker { node_id: NodeId },
    #[error("marker references unknown node {node_id}")]
    UnknownNode { node_id: NodeId },
    #[error("no marker for node {node_id}")]
    MissingNodeMarker { node_id: NodeId },
    #[error("marker references unknown edge {source_id}-{target_id}")]
    UnknownEdge { source_id: NodeId, target_id: NodeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMarker {
    pub source: NodeId,
    pub target: NodeId,
    pub path: ElementPath,
}

/// A parsed external diagram with its interactive markers indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDocument {
    root: Element,
    node_markers: BTreeMap<NodeId, ElementPath>,
    edge_markers: Vec<EdgeMarker>,
}

impl ExternalDocument {
    /// Structural parse: root tag and marker syntax.
    ///
    /// Accepts SVG markup or the equivalent JSON element tree (`{"tag", "attrs", "children"}`).
    /// Text, comments and processing instructions in markup are dropped.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let root = if text.trim_start().starts_with('{') {
            serde_json::from_str::<Element>(text)?
        } else {
            let xml = roxmltree::Document::parse(text)?;
            element_from_xml(xml.root_element())
        };
        if root.tag != ROOT_TAG {
            return Err(DocumentError::RootTag { found: root.tag });
        }

        let mut document = Self {
            root,
            node_markers: BTreeMap::new(),
            edge_markers: Vec::new(),
        };
        let mut found = Vec::new();
        collect_markers(&document.root, &mut Vec::new(), &mut found);

        for (path, marker) in found {
            match marker {
                Marker::Node(value) => {
                    let node_id = parse_marker_id(NODE_ID_ATTR, &value)?;
                    if document.node_markers.contains_key(&node_id) {
                        return Err(DocumentError::DuplicateNodeMarker { node_id });
                    }
                    document.node_markers.insert(node_id, path);
                }
                Marker::Edge(value) => {
                    let mut parts = value.split_whitespace();
                    let (Some(source), Some(target), None) =
                        (parts.next(), parts.next(), parts.next())
                    else {
                        return Err(DocumentError::InvalidMarker {
                            attr: EDGE_ATTR,
                            value,
                        });
                    };
                    document.edge_markers.push(EdgeMarker {
                        source: parse_marker_id(EDGE_ATTR, source)?,
                        target: parse_marker_id(EDGE_ATTR, target)?,
                        path,
                    });
                }
            }
        }

        Ok(document)
    }

    /// Checks the markers against `map`: one marker per node, no unknown references.
    pub fn validate_against(&self, map: &ConceptMap) -> Result<(), DocumentError> {
        if let Some(node_id) = self
            .node_markers
            .keys()
            .find(|id| !map.contains(id.as_str()))
        {
            return Err(DocumentError::UnknownNode {
                node_id: node_id.clone(),
            });
        }
        if let Some(node) = map
            .nodes()
            .iter()
            .find(|node| !self.node_markers.contains_key(node.id()))
        {
            return Err(DocumentError::MissingNodeMarker {
                node_id: node.id().clone(),
            });
        }
        if let Some(marker) = self
            .edge_markers
            .iter()
            .find(|m| map.edge_between(&m.source, &m.target).is_none())
        {
            return Err(DocumentError::UnknownEdge {
                source_id: marker.source.clone(),
                target_id: marker.target.clone(),
            });
        }
        Ok(())
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.node_markers.keys()
    }

    pub fn node_path(&self, node_id: &NodeId) -> Option<&[usize]> {
        self.node_markers.get(node_id).map(Vec::as_slice)
    }

    pub fn node_marker(&self, node_id: &NodeId) -> Option<&Element> {
        self.node_markers
            .get(node_id)
            .and_then(|path| self.element_at(path))
    }

    pub fn edge_markers(&self) -> &[EdgeMarker] {
        &self.edge_markers
    }

    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(&self.root, |element, &index| element.children.get(index))
    }
}

enum Marker {
    Node(String),
    Edge(String),
}

fn collect_markers(
    element: &Element,
    path: &mut ElementPath,
    out: &mut Vec<(ElementPath, Marker)>,
) {
    if let Some(value) = element.attrs.get(NODE_ID_ATTR) {
        out.push((path.clone(), Marker::Node(value.clone())));
    }
    if let Some(value) = element.attrs.get(EDGE_ATTR) {
        out.push((path.clone(), Marker::Edge(value.clone())));
    }
    for (index, child) in element.children.iter().enumerate() {
        path.push(index);
        collect_markers(child, path, out);
        path.pop();
    }
}

fn element_from_xml(node: roxmltree::Node<'_, '_>) -> Element {
    Element {
        tag: node.tag_name().name().to_owned(),
        attrs: node
            .attributes()
            .map(|attr| (attr.name().to_owned(), attr.value().to_owned()))
            .collect(),
        children: node
            .children()
            .filter(roxmltree::Node::is_element)
            .map(element_from_xml)
            .collect(),
    }
}

fn parse_marker_id(attr: &'static str, value: &str) -> Result<NodeId, DocumentError> {
    NodeId::new(value.trim()).map_err(|_| DocumentError::InvalidMarker {
        attr,
        value: value.to_owned(),
    })
}
