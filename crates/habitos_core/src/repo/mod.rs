//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the single-slot snapshot access contract.
//! - Isolate SQLite and JSON codec details from service orchestration.
//!
//! # Invariants
//! - The snapshot slot is written whole or not at all (last write wins).
//! - Decoding failures surface as errors; they are never masked by
//!   silently reinitializing state.

pub mod snapshot_repo;
