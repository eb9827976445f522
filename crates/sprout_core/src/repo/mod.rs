//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the owner-scoped note store contract consumed by services.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Every read and write is constrained to one owner id.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod note_repo;
