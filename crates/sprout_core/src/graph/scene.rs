//! Render-ready view of a graph: colors and widths resolved for one theme
//! and one highlight state.

use super::{GraphTheme, Highlight, KeywordGraph};
use crate::model::note::NoteId;
use serde::Serialize;

const LINK_WIDTH: u8 = 1;
const HIGHLIGHT_LINK_WIDTH: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneNode {
    pub id: NoteId,
    pub title: String,
    pub keywords: Vec<String>,
    pub weight: usize,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneLink {
    pub source: NoteId,
    pub target: NoteId,
    pub color: &'static str,
    pub width: u8,
}

/// What the force-graph view draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphScene {
    pub theme: GraphTheme,
    pub background: &'static str,
    pub nodes: Vec<SceneNode>,
    pub links: Vec<SceneLink>,
}

impl GraphScene {
    pub fn new(graph: &KeywordGraph, theme: GraphTheme, highlight: &Highlight) -> Self {
        let palette = theme.palette();
        let nodes = graph
            .nodes
            .iter()
            .map(|node| SceneNode {
                id: node.id,
                title: node.title.clone(),
                keywords: node.keywords.clone(),
                weight: node.weight,
                color: if highlight.contains_node(node.id) {
                    palette.highlight_node
                } else {
                    palette.node
                },
            })
            .collect();
        let links = graph
            .edges
            .iter()
            .map(|edge| SceneLink {
                source: edge.source,
                target: edge.target,
                color: palette.link,
                width: if highlight.contains_link(edge) {
                    HIGHLIGHT_LINK_WIDTH
                } else {
                    LINK_WIDTH
                },
            })
            .collect();

        Self {
            theme,
            background: palette.background,
            nodes,
            links,
        }
    }

    /// True when there is nothing to draw; the host shows its empty state.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::GraphScene;
    use crate::graph::{build_graph, highlight, GraphTheme, HighlightMode};
    use crate::model::note::Note;

    fn note(id: i64, keywords: &[&str]) -> Note {
        Note {
            id,
            owner_id: 1,
            title: format!("note {id}"),
            content: String::new(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            created_at: 0,
        }
    }

    #[test]
    fn focused_node_and_its_links_are_emphasized() {
        let graph = build_graph(&[note(1, &["a"]), note(2, &["a"]), note(3, &["b"])]);
        let focus = highlight(&graph, Some(1), HighlightMode::FocalOnly);
        let scene = GraphScene::new(&graph, GraphTheme::Dark, &focus);

        let palette = GraphTheme::Dark.palette();
        assert_eq!(scene.background, palette.background);
        assert_eq!(scene.nodes[0].color, palette.highlight_node);
        assert_eq!(scene.nodes[1].color, palette.node);
        assert_eq!(scene.links.len(), 1);
        assert_eq!(scene.links[0].width, 2);
    }

    #[test]
    fn empty_graph_is_empty_scene() {
        let graph = build_graph(&[]);
        let scene = GraphScene::new(&graph, GraphTheme::Light, &Default::default());
        assert!(scene.is_empty());
    }
}
