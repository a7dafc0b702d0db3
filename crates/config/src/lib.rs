//! Editor preferences for the mobile client
//!
//! This crate provides a small, strongly-typed preference layer with:
//! - `KeyValueStore`: the persistence boundary (in-memory or JSON file)
//! - `EditorSettings`: which rich-text editor is active, with a computed default
//! - `BuildConfiguration`: named build profiles and a "run under profile" gate
//!
//! Key design decisions:
//! - Stores are injected as `Arc<dyn KeyValueStore>`, never a global singleton
//! - The editor selection is one enum-valued key, so variants are exclusive
//! - Defaults are computed on read and never written back

mod build_config;
mod config;
mod editor;
mod error;
mod persistence;
mod store;
mod types;

pub use build_config::*;
pub use config::*;
pub use editor::*;
pub use error::*;
pub use persistence::*;
pub use store::*;
pub use types::*;
