//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate model mutations and snapshot persistence into one
//!   use-case level API.
//! - Keep presentation layers decoupled from storage and codec details.

pub mod tracker_service;
