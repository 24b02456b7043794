//! Queryable tag registry.
//!
//! The registry holds the snapshot published by the most recent successful
//! refresh. One mutex guards the snapshot and its ID bounds: a refresh
//! holds it for the whole build, and every query takes it too, so a reader
//! never sees a half-built snapshot. A failed refresh leaves the previous
//! snapshot in place.

use std::io::Read;

use parking_lot::Mutex;
use taginfo_types::{TagGroupSet, TagId, TagInfo};

use crate::builder;
use crate::snapshot::Snapshot;
use crate::source::TagListSource;
use crate::types::{BuildStats, RegistryConfig, RegistryLayout, TagInfoError, TagInfoResult};

/// Registry of the tags configured on a gateway.
///
/// # Example
///
/// ```
/// use taginfo_loader::{MemoryTagListSource, TagRegistry};
/// use taginfo_loader::taginfo_types::TagGroup;
///
/// let registry = TagRegistry::new();
/// assert!(!registry.is_built());
///
/// let source = MemoryTagListSource::new("header\n", 0);
/// registry.refresh(&source).unwrap();
///
/// assert!(registry.is_built());
/// assert!(registry.list_filtered(TagGroup::A).unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct TagRegistry {
    config: RegistryConfig,
    snapshot: Mutex<Option<Snapshot>>,
}

impl TagRegistry {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            snapshot: Mutex::new(None),
        }
    }

    /// Returns the registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Rebuilds the registry from a tag list source.
    ///
    /// Blocks until the whole export has been read. On success the new
    /// snapshot replaces the current one.
    ///
    /// # Errors
    /// Returns an error if the source fails or any record is malformed. The
    /// current snapshot is kept in that case.
    pub fn refresh<S: TagListSource>(&self, source: &S) -> TagInfoResult<BuildStats> {
        let mut snapshot = self.snapshot.lock();
        let (built, stats) = builder::build_from_source(source, &self.config)?;
        Self::log_published(&stats);
        *snapshot = Some(built);
        Ok(stats)
    }

    /// Rebuilds the registry from an already opened export stream.
    ///
    /// `expected_tags` is the tag count reported by the device.
    pub fn refresh_from_reader<R: Read>(
        &self,
        reader: R,
        expected_tags: usize,
    ) -> TagInfoResult<BuildStats> {
        let mut snapshot = self.snapshot.lock();
        let (built, stats) = builder::build_from_reader(reader, expected_tags, &self.config)?;
        Self::log_published(&stats);
        *snapshot = Some(built);
        Ok(stats)
    }

    fn log_published(stats: &BuildStats) {
        tracing::info!(
            "Tag registry refreshed: {} tags ({} layout, {} records read, device reports {})",
            stats.tags_loaded,
            stats.layout,
            stats.records_read,
            stats.expected_tags
        );
    }

    /// Drops the current snapshot.
    pub fn reset(&self) {
        *self.snapshot.lock() = None;
    }

    /// Returns true if a snapshot has been published.
    pub fn is_built(&self) -> bool {
        self.snapshot.lock().is_some()
    }

    fn with_snapshot<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> TagInfoResult<T> {
        let snapshot = self.snapshot.lock();
        snapshot.as_ref().map(f).ok_or(TagInfoError::NotBuilt)
    }

    /// Returns every tag in snapshot order.
    pub fn list_all(&self) -> TagInfoResult<Vec<TagInfo>> {
        self.with_snapshot(|s| s.iter().cloned().collect())
    }

    /// Returns the tags that belong to at least one of `groups`, in snapshot order.
    pub fn list_filtered(&self, groups: impl Into<TagGroupSet>) -> TagInfoResult<Vec<TagInfo>> {
        let groups = groups.into();
        self.with_snapshot(|s| {
            s.iter()
                .filter(|tag| tag.is_in_any_group(groups))
                .cloned()
                .collect()
        })
    }

    /// Looks up a tag by ID.
    ///
    /// Direct index in the offset-indexed layout, linear scan otherwise.
    pub fn get(&self, id: TagId) -> TagInfoResult<Option<TagInfo>> {
        self.with_snapshot(|s| s.get(id).cloned())
    }

    /// Returns every slot of the snapshot layout, including empty ones.
    ///
    /// In the offset-indexed layout, slot `i` holds the tag with ID
    /// `lowest_id() + i`.
    pub fn entries(&self) -> TagInfoResult<Vec<Option<TagInfo>>> {
        self.with_snapshot(Snapshot::slots)
    }

    /// Returns the number of tags in the snapshot.
    pub fn len(&self) -> TagInfoResult<usize> {
        self.with_snapshot(|s| s.count)
    }

    /// Returns true if the snapshot holds no tags.
    pub fn is_empty(&self) -> TagInfoResult<bool> {
        self.len().map(|len| len == 0)
    }

    /// Returns the layout of the current snapshot.
    pub fn layout(&self) -> TagInfoResult<RegistryLayout> {
        self.with_snapshot(Snapshot::layout_kind)
    }

    /// Returns the lowest tag ID seen by the last successful refresh.
    pub fn lowest_id(&self) -> TagInfoResult<TagId> {
        self.with_snapshot(|s| s.bounds.lowest())?.ok_or(TagInfoError::NoTagIds)
    }

    /// Returns the highest tag ID seen by the last successful refresh.
    pub fn highest_id(&self) -> TagInfoResult<TagId> {
        self.with_snapshot(|s| s.bounds.highest())?.ok_or(TagInfoError::NoTagIds)
    }
}
