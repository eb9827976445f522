//! Core logic for Sprout: notes tagged with AI-extracted keywords, related
//! through a keyword-sharing graph.

pub mod config;
pub mod db;
pub mod graph;
pub mod keywords;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ExtractorConfig, SproutConfig};
pub use graph::{
    build_graph, build_graph_indexed, build_graph_with, highlight, note_for_node, GraphEdge,
    GraphNode, GraphScene, GraphStrategy, GraphTheme, Highlight, HighlightMode, KeywordGraph,
};
pub use keywords::{
    extract_or_empty, strip_html, ExtractionError, HttpKeywordExtractor, KeywordExtractor,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId, NoteInput, NoteUpdate, NoteValidationError, OwnerId};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{KeywordRefresh, NoteService, NoteServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
