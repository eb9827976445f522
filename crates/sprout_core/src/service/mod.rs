//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, keyword extraction and graph projection into
//!   use-case level APIs.
//! - Keep CLI/host layers decoupled from storage details.

pub mod note_service;
