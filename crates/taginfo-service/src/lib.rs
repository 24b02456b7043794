//! # taginfo-service
//!
//! File-backed collaborators for the tag registry and the `taginfo-refresh`
//! tool built on them.
//!
//! The tool reads a tag list export saved from a gateway, builds a
//! [`TagRegistry`](taginfo_loader::TagRegistry) from it and reports the
//! result. It can also preview a historical log interval update for one
//! tag group against a dry-run configuration store.

#![warn(missing_docs)]

mod report;
mod settings;
mod source;
mod store;

pub use report::{GroupCount, RegistryReport};
pub use settings::{LogUpdate, Settings, SettingsError, DEFAULT_EXPORT_PATH};
pub use source::FileTagListSource;
pub use store::TracingConfigStore;
