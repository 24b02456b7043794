//! Registry summary for printing.

use serde::Serialize;
use taginfo_loader::{TagInfoError, TagInfoResult, TagRegistry};
use taginfo_types::{TagGroup, TagId, TagInfo};

/// Number of tags in one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    /// The group.
    pub group: TagGroup,
    /// Tags in the group.
    pub tags: usize,
}

/// Summary of a built registry.
#[derive(Debug, Clone, Serialize)]
pub struct RegistryReport {
    /// Layout of the snapshot.
    pub layout: String,
    /// Lowest tag ID, if any tag was loaded.
    pub lowest_id: Option<TagId>,
    /// Highest tag ID, if any tag was loaded.
    pub highest_id: Option<TagId>,
    /// Tag count per group.
    pub groups: Vec<GroupCount>,
    /// All tags in snapshot order.
    pub tags: Vec<TagInfo>,
}

impl RegistryReport {
    /// Collects a report from a built registry.
    pub fn from_registry(registry: &TagRegistry) -> TagInfoResult<Self> {
        let groups = TagGroup::ALL
            .into_iter()
            .map(|group| {
                Ok(GroupCount {
                    group,
                    tags: registry.list_filtered(group)?.len(),
                })
            })
            .collect::<TagInfoResult<Vec<_>>>()?;

        Ok(Self {
            layout: registry.layout()?.to_string(),
            lowest_id: optional_bound(registry.lowest_id())?,
            highest_id: optional_bound(registry.highest_id())?,
            groups,
            tags: registry.list_all()?,
        })
    }
}

fn optional_bound(bound: TagInfoResult<TagId>) -> TagInfoResult<Option<TagId>> {
    match bound {
        Ok(id) => Ok(Some(id)),
        Err(TagInfoError::NoTagIds) => Ok(None),
        Err(e) => Err(e),
    }
}
