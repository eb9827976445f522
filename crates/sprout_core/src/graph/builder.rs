use super::{GraphEdge, GraphNode, KeywordGraph};
use crate::model::note::Note;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::str::FromStr;

/// Edge construction algorithm. Both produce the same edge list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphStrategy {
    /// Compare every unordered pair. Fine below roughly a thousand notes.
    #[default]
    Pairwise,
    /// Bucket notes by keyword and pair up bucket members.
    InvertedIndex,
}

impl FromStr for GraphStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pairwise" => Ok(Self::Pairwise),
            "index" | "inverted_index" | "inverted-index" => Ok(Self::InvertedIndex),
            other => Err(format!(
                "unsupported graph strategy `{other}`; expected pairwise|index"
            )),
        }
    }
}

pub fn build_graph_with(notes: &[Note], strategy: GraphStrategy) -> KeywordGraph {
    match strategy {
        GraphStrategy::Pairwise => build_graph(notes),
        GraphStrategy::InvertedIndex => build_graph_indexed(notes),
    }
}

/// Builds the graph by testing every unordered pair for a shared keyword.
///
/// Edges are emitted in `(i, j)` input-position order with the earlier
/// note as `source`.
pub fn build_graph(notes: &[Note]) -> KeywordGraph {
    let keyword_sets = keyword_sets(notes);
    let mut edges = Vec::new();

    for i in 0..notes.len() {
        for j in (i + 1)..notes.len() {
            if !keyword_sets[i].is_disjoint(&keyword_sets[j]) {
                edges.push(GraphEdge {
                    source: notes[i].id,
                    target: notes[j].id,
                });
            }
        }
    }

    KeywordGraph {
        nodes: nodes(notes),
        edges,
    }
}

/// Builds the same graph through a `keyword -> positions` index.
///
/// Work is proportional to the sum of squared bucket sizes rather than the
/// square of the collection, which wins when keywords are spread out.
pub fn build_graph_indexed(notes: &[Note]) -> KeywordGraph {
    let keyword_sets = keyword_sets(notes);
    let mut buckets: HashMap<&str, Vec<usize>> = HashMap::new();
    for (position, keywords) in keyword_sets.iter().enumerate() {
        for keyword in keywords {
            buckets.entry(*keyword).or_default().push(position);
        }
    }

    // Ordered so the output matches the pairwise enumeration.
    let mut pairs = BTreeSet::new();
    for members in buckets.values() {
        for (offset, &i) in members.iter().enumerate() {
            for &j in &members[offset + 1..] {
                pairs.insert((i.min(j), i.max(j)));
            }
        }
    }

    KeywordGraph {
        nodes: nodes(notes),
        edges: pairs
            .into_iter()
            .map(|(i, j)| GraphEdge {
                source: notes[i].id,
                target: notes[j].id,
            })
            .collect(),
    }
}

fn nodes(notes: &[Note]) -> Vec<GraphNode> {
    notes.iter().map(GraphNode::from_note).collect()
}

fn keyword_sets(notes: &[Note]) -> Vec<HashSet<&str>> {
    notes
        .iter()
        .map(|note| note.keywords.iter().map(String::as_str).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_graph, build_graph_indexed, GraphStrategy};
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
    fn duplicate_keywords_within_a_note_do_not_duplicate_edges() {
        let notes = vec![note(1, &["a", "a", "b"]), note(2, &["b", "a"])];
        let graph = build_graph(&notes);
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(build_graph_indexed(&notes).edges, graph.edges);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        let graph = build_graph(&[note(1, &["Ideas"]), note(2, &["ideas"])]);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn strategy_parses_from_config_values() {
        assert_eq!("pairwise".parse::<GraphStrategy>(), Ok(GraphStrategy::Pairwise));
        assert_eq!(
            " Index ".parse::<GraphStrategy>(),
            Ok(GraphStrategy::InvertedIndex)
        );
        assert!("fast".parse::<GraphStrategy>().is_err());
    }
}
