//! # taginfo-types
//!
//! Type definitions for gateway tag configuration.
//!
//! This crate provides Rust type definitions for the records of a gateway
//! tag list export: the tag descriptor, its data type and the four fixed
//! tag groups.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use taginfo_types::{TagGroup, TagGroupSet, TagId, TagInfo, TagType};
//!
//! let tag = TagInfo {
//!     id: 7,
//!     name: "Flow rate".to_string(),
//!     tag_type: TagType::from_code(1),
//!     historical_log_enabled: true,
//!     groups: TagGroupSet::from(TagGroup::C),
//! };
//!
//! assert_eq!(tag.tag_type, TagType::Float);
//! assert!(tag.is_in_group(TagGroup::C));
//!
//! let id: TagId = tag.id;
//! ```
//!
//! ## Without Serde
//!
//! ```toml
//! [dependencies]
//! taginfo-types = { version = "0.1", default-features = false }
//! ```

#![warn(missing_docs)]

mod enums;
mod group;
mod tag_id;
mod tag_info;

// Re-export all public types at crate root
pub use enums::TagType;
pub use group::{TagGroup, TagGroupSet};
pub use tag_id::TagId;
pub use tag_info::TagInfo;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _id: TagId = 1;
        let _type = TagType::Boolean;
        let _group = TagGroup::A;
        let _groups = TagGroupSet::empty();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let tag = TagInfo {
            id: 250,
            name: "Compressor \"main\" hours".to_string(),
            tag_type: TagType::DWord,
            historical_log_enabled: true,
            groups: TagGroupSet::from_flags([false, true, true, false]),
        };

        let json = serde_json::to_string(&tag).unwrap();
        let parsed: TagInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(tag, parsed);
    }
}
