//! Storage abstractions for service layer
//!
//! A single JSON document holds every save; the store re-reads it on each
//! operation and rewrites it whole on each mutation.

pub mod save_file;

pub use save_file::{SaveFileStore, SaveMap};
