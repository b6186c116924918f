//! # Data Transfer Objects (DTOs)
//!
//! All data structures used for communication between the frontend and the
//! backend via the REST API.
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /chat
//! Content-Type: application/json
//!
//! {
//!   "message": "What is the capital of France?",
//!   "chat_id": 3
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "chat_id": 3,
//!   "response": "The capital of France is Paris."
//! }
//! ```

pub mod chat;

pub use chat::*;
