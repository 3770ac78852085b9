//! Per-check explanatory messages.
//!
//! Each check may surface five kinds of text ([`MessageType`]). Defaults are
//! declared on the [`CheckDefinition`](crate::check::CheckDefinition);
//! user overrides live in the key-value store and take precedence.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use advaudit::environment::MemoryStore;
//! use advaudit::messages::{MessageStore, MessageType};
//!
//! let messages = MessageStore::new(Arc::new(MemoryStore::new()));
//! messages.set("x", MessageType::FailMessage, "Custom failure text").unwrap();
//! assert_eq!(messages.get("x", MessageType::FailMessage), "Custom failure text");
//!
//! // Clearing falls back to the compiled default (none here).
//! messages.set("x", MessageType::FailMessage, "").unwrap();
//! assert_eq!(messages.get("x", MessageType::FailMessage), "");
//! ```

pub mod interpolation;
pub mod kind;
pub mod store;

pub use interpolation::{interpolate, parse_placeholders, Segment};
pub use kind::MessageType;
pub use store::MessageStore;
