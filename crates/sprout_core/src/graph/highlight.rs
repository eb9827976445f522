use super::{GraphEdge, KeywordGraph};
use crate::model::note::NoteId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Which node ids a focus lights up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    /// Only the focused node; its edges are still highlighted.
    #[default]
    FocalOnly,
    /// The focused node plus every directly connected node.
    Neighborhood,
}

impl FromStr for HighlightMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "focal" | "focal_only" => Ok(Self::FocalOnly),
            "neighborhood" | "neighbourhood" => Ok(Self::Neighborhood),
            other => Err(format!(
                "unsupported highlight mode `{other}`; expected focal|neighborhood"
            )),
        }
    }
}

/// Emphasis set for one focus state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub nodes: BTreeSet<NoteId>,
    /// Edges touching the focused node, in graph order.
    pub links: Vec<GraphEdge>,
}

impl Highlight {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub fn contains_node(&self, id: NoteId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn contains_link(&self, edge: &GraphEdge) -> bool {
        self.links.iter().any(|link| link.key() == edge.key())
    }
}

/// Computes the highlight for a hover/focus change.
///
/// `None`, or an id that is not a node of `graph`, means nothing is
/// focused and yields an empty highlight.
pub fn highlight(graph: &KeywordGraph, focus: Option<NoteId>, mode: HighlightMode) -> Highlight {
    let Some(focus) = focus.filter(|id| graph.node(*id).is_some()) else {
        return Highlight::default();
    };

    let links: Vec<GraphEdge> = graph
        .edges
        .iter()
        .filter(|edge| edge.touches(focus))
        .copied()
        .collect();

    let mut nodes = BTreeSet::from([focus]);
    if mode == HighlightMode::Neighborhood {
        nodes.extend(graph.neighbors(focus));
    }

    Highlight { nodes, links }
}

#[cfg(test)]
mod tests {
    use super::{highlight, HighlightMode};
    use crate::graph::{GraphEdge, GraphNode, KeywordGraph};

    fn graph() -> KeywordGraph {
        let node = |id: i64| GraphNode {
            id,
            title: String::new(),
            keywords: Vec::new(),
            weight: 1,
        };
        KeywordGraph {
            nodes: vec![node(1), node(2), node(3)],
            edges: vec![
                GraphEdge {
                    source: 1,
                    target: 2,
                },
                GraphEdge {
                    source: 2,
                    target: 3,
                },
            ],
        }
    }

    #[test]
    fn no_focus_is_empty() {
        assert!(highlight(&graph(), None, HighlightMode::FocalOnly).is_empty());
    }

    #[test]
    fn unknown_focus_is_empty() {
        assert!(highlight(&graph(), Some(42), HighlightMode::Neighborhood).is_empty());
    }

    #[test]
    fn focal_only_keeps_neighbors_dark() {
        let result = highlight(&graph(), Some(2), HighlightMode::FocalOnly);
        assert_eq!(result.nodes.into_iter().collect::<Vec<_>>(), vec![2]);
        assert_eq!(result.links.len(), 2);
    }

    #[test]
    fn neighborhood_mode_adds_connected_nodes() {
        let result = highlight(&graph(), Some(1), HighlightMode::Neighborhood);
        assert_eq!(result.nodes.into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            result.links,
            vec![GraphEdge {
                source: 1,
                target: 2
            }]
        );
    }

    #[test]
    fn link_membership_ignores_direction() {
        let result = highlight(&graph(), Some(1), HighlightMode::FocalOnly);
        assert!(result.contains_link(&GraphEdge {
            source: 2,
            target: 1
        }));
    }
}
