//! Keyword relationship graph.
//!
//! # Responsibility
//! - Project a note collection into nodes and keyword-sharing edges.
//! - Answer focus/hover highlight queries over a built graph.
//! - Resolve colors for the hosting view from an explicit theme.
//!
//! # Invariants
//! - Nodes are 1:1 with the input notes, in input order.
//! - An edge exists iff the two notes' keyword sets intersect; each
//!   unordered pair appears at most once and never as a self-loop.
//! - The graph is a pure projection: rebuilt in full on every change and
//!   never persisted.

mod builder;
mod highlight;
mod scene;
mod theme;

pub use builder::{build_graph, build_graph_indexed, build_graph_with, GraphStrategy};
pub use highlight::{highlight, Highlight, HighlightMode};
pub use scene::{GraphScene, SceneLink, SceneNode};
pub use theme::{GraphPalette, GraphTheme};

use crate::model::note::{Note, NoteId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One note as seen by the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub title: String,
    pub keywords: Vec<String>,
    /// Visual size hint: `keywords.len() + 1`.
    pub weight: usize,
}

impl GraphNode {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            title: note.title.clone(),
            keywords: note.keywords.clone(),
            weight: note.keywords.len() + 1,
        }
    }
}

/// Undirected edge between two notes sharing at least one keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NoteId,
    pub target: NoteId,
}

impl GraphEdge {
    pub fn touches(&self, id: NoteId) -> bool {
        self.source == id || self.target == id
    }

    /// Direction-independent key, `(min, max)`.
    pub fn key(&self) -> (NoteId, NoteId) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}

/// Derived node/edge structure handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl KeywordGraph {
    pub fn node(&self, id: NoteId) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Edge set with direction erased, for order-insensitive comparison.
    pub fn edge_set(&self) -> HashSet<(NoteId, NoteId)> {
        self.edges.iter().map(GraphEdge::key).collect()
    }

    pub fn has_edge(&self, a: NoteId, b: NoteId) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.touches(a) && edge.touches(b) && a != b)
    }

    /// Ids of nodes directly connected to `id`.
    pub fn neighbors(&self, id: NoteId) -> Vec<NoteId> {
        self.edges
            .iter()
            .filter(|edge| edge.touches(id))
            .map(|edge| if edge.source == id { edge.target } else { edge.source })
            .collect()
    }

    pub fn degree(&self, id: NoteId) -> usize {
        self.edges.iter().filter(|edge| edge.touches(id)).count()
    }
}

/// Resolves a clicked node back to the note it was built from.
pub fn note_for_node(notes: &[Note], id: NoteId) -> Option<&Note> {
    notes.iter().find(|note| note.id == id)
}
