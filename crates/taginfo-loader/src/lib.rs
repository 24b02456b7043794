//! # taginfo-loader
//!
//! Streaming parser and in-memory registry for gateway tag list exports.
//!
//! A refresh reads the whole export, parses one tag per line and publishes
//! the result as a snapshot that can be listed, filtered by tag group and
//! looked up by tag ID. When the device's tag IDs have gaps the snapshot is
//! indexed by `id - lowest_id` instead of export order.
//!
//! ```
//! use taginfo_loader::{MemoryTagListSource, TagRegistry};
//! use taginfo_loader::taginfo_types::TagGroup;
//!
//! let registry = TagRegistry::new();
//! registry.refresh(&MemoryTagListSource::new("header\n", 0))?;
//!
//! for tag in registry.list_filtered(TagGroup::B)? {
//!     println!("{} ({:?})", tag.name, tag.tag_type);
//! }
//! # Ok::<(), taginfo_loader::TagInfoError>(())
//! ```

#![warn(missing_docs)]

mod builder;
pub mod log_rate;
pub mod parser;
mod registry;
mod snapshot;
mod source;
pub mod tokenizer;
mod types;

pub use log_rate::{LogRateApplier, LogRateConfig, TagConfigStore};
pub use parser::{parse_tag_line, EbdParser, IdBounds};
pub use registry::TagRegistry;
pub use source::{MemoryTagListSource, TagListSource};
pub use types::{
    BuildStats, RegistryConfig, RegistryLayout, StoreError, TagInfoError, TagInfoResult,
};

// Re-export taginfo-types for convenience
pub use taginfo_types;
