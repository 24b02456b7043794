//! Published registry snapshots.
//!
//! A snapshot stores its tags in one of two layouts. When tag IDs are
//! contiguous the tags are kept densely in export order. When the ID range
//! is wider than the device's tag count, tags are stored at `id - lowest_id`
//! so that lookup by ID is a direct index; unused IDs leave empty slots.

use taginfo_types::{TagId, TagInfo};

use crate::parser::IdBounds;
use crate::types::RegistryLayout;

#[derive(Debug, Clone)]
pub(crate) enum TagLayout {
    Compact(Vec<TagInfo>),
    OffsetIndexed {
        lowest: TagId,
        slots: Vec<Option<TagInfo>>,
    },
}

/// The result of one successful refresh.
#[derive(Debug, Clone)]
pub(crate) struct Snapshot {
    pub(crate) layout: TagLayout,
    pub(crate) count: usize,
    pub(crate) bounds: IdBounds,
}

impl Snapshot {
    pub(crate) fn layout_kind(&self) -> RegistryLayout {
        match self.layout {
            TagLayout::Compact(_) => RegistryLayout::Compact,
            TagLayout::OffsetIndexed { .. } => RegistryLayout::OffsetIndexed,
        }
    }

    /// Populated entries in snapshot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TagInfo> + '_ {
        let (dense, sparse): (&[TagInfo], &[Option<TagInfo>]) = match &self.layout {
            TagLayout::Compact(tags) => (tags.as_slice(), &[][..]),
            TagLayout::OffsetIndexed { slots, .. } => (&[][..], slots.as_slice()),
        };
        dense.iter().chain(sparse.iter().flatten())
    }

    pub(crate) fn get(&self, id: TagId) -> Option<&TagInfo> {
        match &self.layout {
            TagLayout::Compact(tags) => tags.iter().find(|tag| tag.id == id),
            TagLayout::OffsetIndexed { lowest, slots } => {
                let offset = id.checked_sub(*lowest)?;
                slots.get(offset as usize)?.as_ref()
            }
        }
    }

    /// Every slot of the layout, empty ones included.
    pub(crate) fn slots(&self) -> Vec<Option<TagInfo>> {
        match &self.layout {
            TagLayout::Compact(tags) => tags.iter().cloned().map(Some).collect(),
            TagLayout::OffsetIndexed { slots, .. } => slots.clone(),
        }
    }
}
