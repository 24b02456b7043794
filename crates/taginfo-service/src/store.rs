//! Dry-run configuration store.

use taginfo_loader::{StoreError, TagConfigStore};

/// A configuration store that only logs the writes it receives.
///
/// Used to preview a historical log interval update without touching the
/// device configuration.
#[derive(Debug, Default)]
pub struct TracingConfigStore {
    writes: usize,
}

impl TracingConfigStore {
    /// Creates a new dry-run store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of writes received.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl TagConfigStore for TracingConfigStore {
    fn apply_log_config(
        &mut self,
        tag_name: &str,
        log_enabled: bool,
        interval_secs: u32,
    ) -> Result<(), StoreError> {
        self.writes += 1;
        tracing::info!(
            "[dry-run] tag {}: LogEnabled={} LogTimer={}",
            tag_name,
            u8::from(log_enabled),
            interval_secs
        );
        Ok(())
    }
}
