//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the frontend and the backend API.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Wire Format
//!
//! - Field names use **snake_case** in Rust, which maps to **snake_case** in
//!   JSON by default
//! - Optional fields are omitted from JSON when `None` (using
//!   `#[serde(skip_serializing_if = "Option::is_none")]`)
//! - All structs implement both `Serialize` and `Deserialize` for
//!   bidirectional communication

pub mod dto;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
