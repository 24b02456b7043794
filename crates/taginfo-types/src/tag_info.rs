//! Tag descriptor type.
//!
//! This module provides the `TagInfo` struct representing one tag from a
//! tag list export.

use crate::{TagGroup, TagGroupSet, TagId, TagType};

/// A tag configured on the gateway, as described by one export record.
///
/// # Examples
///
/// ```
/// use taginfo_types::{TagGroup, TagGroupSet, TagInfo, TagType};
///
/// let tag = TagInfo {
///     id: 12,
///     name: "Pump 1".to_string(),
///     tag_type: TagType::Float,
///     historical_log_enabled: true,
///     groups: TagGroupSet::from_flags([true, false, false, true]),
/// };
///
/// assert!(tag.is_in_group(TagGroup::A));
/// assert!(!tag.is_in_group(TagGroup::B));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagInfo {
    /// Device-assigned tag identifier.
    pub id: TagId,
    /// Tag name, without the surrounding quotes of the export.
    pub name: String,
    /// Data type of the tag.
    pub tag_type: TagType,
    /// Whether historical logging is enabled for the tag.
    pub historical_log_enabled: bool,
    /// Groups the tag belongs to.
    pub groups: TagGroupSet,
}

impl TagInfo {
    /// Returns true if the tag belongs to the given group.
    pub fn is_in_group(&self, group: TagGroup) -> bool {
        self.groups.contains(group)
    }

    /// Returns true if the tag belongs to at least one of the given groups.
    pub fn is_in_any_group(&self, groups: TagGroupSet) -> bool {
        self.groups.intersects(groups)
    }
}
