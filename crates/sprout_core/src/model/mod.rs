//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its write payloads.
//! - Keep caller-supplied input separate from server-derived fields
//!   (`id`, `keywords`, `created_at`).
//!
//! # Invariants
//! - Every note is owned by exactly one owner id.
//! - Note ids are assigned by the store and never reused.

pub mod note;
