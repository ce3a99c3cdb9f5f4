// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Platonia-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Platonia and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::{NodeId, QuestionId};

/// A Socratic prompt attached to one or more concept nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocraticQuestion {
    id: QuestionId,
    question: String,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    related_nodes: Vec<NodeId>,
}

impl SocraticQuestion {
    pub fn new(id: QuestionId, question: impl Into<String>, related_nodes: Vec<NodeId>) -> Self {
        Self {
            id,
            question: question.into(),
            context: None,
            related_nodes,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn related_nodes(&self) -> &[NodeId] {
        &self.related_nodes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<SocraticQuestion>,
}

impl QuestionBank {
    pub fn new(questions: Vec<SocraticQuestion>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[SocraticQuestion] {
        &self.questions
    }

    /// Questions that reference `node_id`, in fixture order.
    pub fn related_to<'a>(
        &'a self,
        node_id: &'a NodeId,
    ) -> impl Iterator<Item = &'a SocraticQuestion> + 'a {
        self.questions
            .iter()
            .filter(move |question| question.related_nodes.contains(node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::QuestionBank;
    use crate::model::NodeId;

    #[test]
    fn related_to_filters_by_node_reference() {
        let bank: QuestionBank = serde_json::from_str(
            r#"{"questions": [
  {"id": "q1", "question": "¿Qué es lo justo?", "relatedNodes": ["justicia", "ley"]},
  {"id": "q2", "question": "¿Puede enseñarse la virtud?", "relatedNodes": ["virtud"]},
  {"id": "q3", "question": "¿Obedecer es ser justo?", "relatedNodes": ["justicia"]}
]}"#,
        )
        .expect("bank");

        let justicia = NodeId::new("justicia").expect("node id");
        let ids: Vec<&str> = bank.related_to(&justicia).map(|q| q.id().as_str()).collect();
        assert_eq!(ids, vec!["q1", "q3"]);

        let nobody = NodeId::new("nadie").expect("node id");
        assert_eq!(bank.related_to(&nobody).count(), 0);
    }
}
