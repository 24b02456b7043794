//! Loader-specific types: errors, configuration and build statistics.

use taginfo_types::TagId;
use thiserror::Error;

/// Error returned by a configuration store when a write fails.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while building or using a tag registry.
#[derive(Error, Debug)]
pub enum TagInfoError {
    /// I/O error opening or reading the tag list export.
    #[error("IO error reading tag list export: {0}")]
    Io(#[from] std::io::Error),

    /// The registry was queried before any successful refresh.
    #[error("Tag registry has not been built; refresh it first")]
    NotBuilt,

    /// The registry was built from an export with no tag records.
    #[error("No tag IDs were seen during the last refresh")]
    NoTagIds,

    /// Non-numeric tag ID field.
    #[error("Invalid tag ID on line {line}: {value:?}")]
    InvalidTagId {
        /// Line number in the export (1-based, header included).
        line: usize,
        /// The invalid value.
        value: String,
    },

    /// Non-numeric tag type field.
    #[error("Invalid tag type code on line {line}: {value:?}")]
    InvalidTypeCode {
        /// Line number in the export.
        line: usize,
        /// The invalid value.
        value: String,
    },

    /// The record ended before a required field.
    #[error("Record on line {line} has no field {field}")]
    MissingField {
        /// Line number in the export.
        line: usize,
        /// Position of the missing field.
        field: usize,
    },

    /// The tag name field was empty.
    #[error("Empty tag name on line {line}")]
    EmptyName {
        /// Line number in the export.
        line: usize,
    },

    /// A line exceeded the configured maximum length.
    #[error("Line {line} exceeds the maximum of {max} bytes")]
    LineTooLong {
        /// Line number in the export.
        line: usize,
        /// Configured maximum line length.
        max: usize,
    },

    /// The same tag ID appeared on more than one record.
    #[error("Duplicate tag ID {id} on line {line}")]
    DuplicateTagId {
        /// Line number of the second occurrence.
        line: usize,
        /// The repeated tag ID.
        id: TagId,
    },

    /// The tag ID range is too wide to offset-index.
    #[error("Tag ID span {span} exceeds the maximum of {max} for an offset-indexed registry")]
    IdSpanTooLarge {
        /// `highest_id - lowest_id` seen in the export.
        span: u64,
        /// Configured maximum span.
        max: u64,
    },

    /// Memory for the offset-indexed slots could not be reserved.
    #[error("Failed to allocate {slots} tag slots")]
    SlotAllocation {
        /// Number of slots requested.
        slots: u64,
    },

    /// The configuration store rejected a historical log write.
    #[error("Failed to apply historical log interval to tag {tag:?}: {source}")]
    ConfigWrite {
        /// Name of the tag being written.
        tag: String,
        /// Error reported by the store.
        #[source]
        source: StoreError,
    },
}

/// Result type for tag registry operations.
pub type TagInfoResult<T> = Result<T, TagInfoError>;

/// Configuration for building a tag registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Gap count at or above which a warning is logged after a refresh.
    ///
    /// `None` disables the warning; gap correction happens either way.
    pub gap_warning_threshold: Option<u64>,
    /// Maximum number of bytes accepted on a single export line.
    pub max_line_bytes: usize,
    /// Widest `highest_id - lowest_id` accepted when gaps force the
    /// offset-indexed layout. The compact layout is not limited.
    pub max_id_span: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            gap_warning_threshold: None,
            max_line_bytes: 1000,
            max_id_span: 1_000_000,
        }
    }
}

/// How a registry snapshot maps positions to tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryLayout {
    /// Tags stored densely in export order.
    Compact,
    /// Tags stored at `id - lowest_id`, with empty slots for unused IDs.
    OffsetIndexed,
}

impl std::fmt::Display for RegistryLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compact => f.write_str("compact"),
            Self::OffsetIndexed => f.write_str("offset-indexed"),
        }
    }
}

/// Statistics from one registry refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildStats {
    /// Tag count reported by the device before parsing.
    pub expected_tags: usize,
    /// Records read from the export, header excluded.
    pub records_read: usize,
    /// Tags stored in the published snapshot.
    pub tags_loaded: usize,
    /// `highest_id - lowest_id`, if any tag was seen.
    pub id_span: Option<u64>,
    /// `id_span - expected_tags`; positive when IDs have gaps.
    pub gap_count: i64,
    /// Layout chosen for the snapshot.
    pub layout: RegistryLayout,
    /// Whether the gap warning threshold was reached.
    pub gap_warning: bool,
}

impl BuildStats {
    /// Returns true if the snapshot had to be rebuilt to absorb ID gaps.
    pub fn gaps_corrected(&self) -> bool {
        self.layout == RegistryLayout::OffsetIndexed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_config_default() {
        let config = RegistryConfig::default();
        assert_eq!(config.gap_warning_threshold, None);
        assert_eq!(config.max_line_bytes, 1000);
        assert_eq!(config.max_id_span, 1_000_000);
    }

    #[test]
    fn test_error_messages() {
        let err = TagInfoError::InvalidTagId {
            line: 3,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid tag ID on line 3: \"abc\"");

        let err = TagInfoError::ConfigWrite {
            tag: "Pump".to_string(),
            source: "device busy".into(),
        };
        assert!(err.to_string().contains("device busy"));
    }

    #[test]
    fn test_layout_display() {
        assert_eq!(RegistryLayout::Compact.to_string(), "compact");
        assert_eq!(RegistryLayout::OffsetIndexed.to_string(), "offset-indexed");
    }
}
