//! Historical log interval updates.
//!
//! Pushes a new historical logging interval to tags on the device, one
//! configuration write per tag. Writes for a whole group are paced with a
//! fixed delay so the device's configuration store is not flooded.

use std::thread;
use std::time::Duration;

use taginfo_types::{TagGroup, TagInfo};

use crate::registry::TagRegistry;
use crate::types::{StoreError, TagInfoError, TagInfoResult};

/// Default delay between two paced configuration writes.
pub const DEFAULT_WRITE_DELAY: Duration = Duration::from_millis(10);

/// The device's persistent tag configuration.
pub trait TagConfigStore {
    /// Enables or disables historical logging for a tag and sets its
    /// logging interval, in seconds.
    fn apply_log_config(
        &mut self,
        tag_name: &str,
        log_enabled: bool,
        interval_secs: u32,
    ) -> Result<(), StoreError>;
}

impl<T: TagConfigStore + ?Sized> TagConfigStore for &mut T {
    fn apply_log_config(
        &mut self,
        tag_name: &str,
        log_enabled: bool,
        interval_secs: u32,
    ) -> Result<(), StoreError> {
        (**self).apply_log_config(tag_name, log_enabled, interval_secs)
    }
}

/// Configuration for historical log interval updates.
#[derive(Debug, Clone)]
pub struct LogRateConfig {
    /// Delay between two consecutive writes of a group update.
    pub write_delay: Duration,
}

impl Default for LogRateConfig {
    fn default() -> Self {
        Self {
            write_delay: DEFAULT_WRITE_DELAY,
        }
    }
}

/// Applies historical log intervals to tags.
///
/// Group updates block the calling thread for roughly
/// `write_delay * (tags - 1)`; run them on a worker thread if that matters.
/// Updates are not transactional: when a write fails the update stops, and
/// tags written before the failure keep their new interval.
#[derive(Debug, Clone, Default)]
pub struct LogRateApplier {
    config: LogRateConfig,
}

impl LogRateApplier {
    /// Creates an applier with the default write delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an applier with the given configuration.
    pub fn with_config(config: LogRateConfig) -> Self {
        Self { config }
    }

    /// Enables historical logging on one tag with the given interval.
    ///
    /// # Errors
    /// Returns [`TagInfoError::ConfigWrite`] if the store rejects the write.
    pub fn apply_to_tag<S: TagConfigStore>(
        &self,
        store: &mut S,
        tag_name: &str,
        interval_secs: u32,
    ) -> TagInfoResult<()> {
        tracing::debug!(
            "Applying historical log interval {}s to tag {}",
            interval_secs,
            tag_name
        );
        store
            .apply_log_config(tag_name, true, interval_secs)
            .map_err(|source| TagInfoError::ConfigWrite {
                tag: tag_name.to_string(),
                source,
            })
    }

    /// Applies the interval to each tag in order, pausing between writes.
    ///
    /// Returns the number of tags written.
    pub fn apply_to_tags<S: TagConfigStore>(
        &self,
        store: &mut S,
        tags: &[TagInfo],
        interval_secs: u32,
    ) -> TagInfoResult<usize> {
        for (index, tag) in tags.iter().enumerate() {
            if index > 0 && !self.config.write_delay.is_zero() {
                thread::sleep(self.config.write_delay);
            }
            self.apply_to_tag(store, &tag.name, interval_secs)?;
        }
        Ok(tags.len())
    }

    /// Applies the interval to every tag of `group` in the registry.
    ///
    /// The registry lock is only held while the group is listed, not during
    /// the writes.
    ///
    /// # Errors
    /// Returns [`TagInfoError::NotBuilt`] if the registry has no snapshot,
    /// or the first write error.
    pub fn apply_to_group<S: TagConfigStore>(
        &self,
        registry: &TagRegistry,
        store: &mut S,
        group: TagGroup,
        interval_secs: u32,
    ) -> TagInfoResult<usize> {
        let tags = registry.list_filtered(group)?;
        tracing::info!(
            "Applying historical log interval {}s to {} tags in group {}",
            interval_secs,
            tags.len(),
            group
        );
        self.apply_to_tags(store, &tags, interval_secs)
    }
}
