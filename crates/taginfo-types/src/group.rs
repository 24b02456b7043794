//! Tag groups.
//!
//! A gateway has exactly four tag groups, A through D. Any tag can be a
//! member of none, some or all of them; groups are used to select tags for
//! bulk operations such as changing the historical logging interval.

/// One of the four fixed tag groups.
///
/// # Examples
///
/// ```
/// use taginfo_types::TagGroup;
///
/// assert_eq!(TagGroup::ALL.len(), 4);
/// assert_eq!(TagGroup::C.index(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagGroup {
    /// Tag group A.
    A,
    /// Tag group B.
    B,
    /// Tag group C.
    C,
    /// Tag group D.
    D,
}

impl TagGroup {
    /// All groups, in export column order.
    pub const ALL: [TagGroup; 4] = [TagGroup::A, TagGroup::B, TagGroup::C, TagGroup::D];

    /// Returns the position of this group (A = 0 .. D = 3).
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl std::fmt::Display for TagGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for TagGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "C" | "c" => Ok(Self::C),
            "D" | "d" => Ok(Self::D),
            other => Err(format!("unknown tag group: {other}")),
        }
    }
}

/// A set of [`TagGroup`]s.
///
/// # Examples
///
/// ```
/// use taginfo_types::{TagGroup, TagGroupSet};
///
/// let groups = TagGroupSet::from_flags([true, false, false, true]);
/// assert!(groups.contains(TagGroup::A));
/// assert!(groups.contains(TagGroup::D));
/// assert!(!groups.contains(TagGroup::B));
///
/// let wanted: TagGroupSet = [TagGroup::B, TagGroup::D].into_iter().collect();
/// assert!(groups.intersects(wanted));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagGroupSet(u8);

impl TagGroupSet {
    /// Creates an empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Creates a set containing all four groups.
    pub const fn all() -> Self {
        Self(0b1111)
    }

    /// Creates a set from the four membership flags of an export record,
    /// in A, B, C, D order.
    pub fn from_flags(flags: [bool; 4]) -> Self {
        TagGroup::ALL
            .into_iter()
            .zip(flags)
            .filter(|(_, member)| *member)
            .map(|(group, _)| group)
            .collect()
    }

    /// Adds a group to the set.
    pub fn insert(&mut self, group: TagGroup) {
        self.0 |= group.bit();
    }

    /// Returns true if the set contains the group.
    pub fn contains(self, group: TagGroup) -> bool {
        self.0 & group.bit() != 0
    }

    /// Returns true if the two sets share at least one group.
    pub fn intersects(self, other: TagGroupSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if the set has no groups.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of groups in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the groups in A..D order.
    pub fn iter(self) -> impl Iterator<Item = TagGroup> {
        TagGroup::ALL.into_iter().filter(move |g| self.contains(*g))
    }
}

impl From<TagGroup> for TagGroupSet {
    fn from(group: TagGroup) -> Self {
        Self(group.bit())
    }
}

impl FromIterator<TagGroup> for TagGroupSet {
    fn from_iter<I: IntoIterator<Item = TagGroup>>(iter: I) -> Self {
        let mut set = Self::empty();
        for group in iter {
            set.insert(group);
        }
        set
    }
}

impl<'a> FromIterator<&'a TagGroup> for TagGroupSet {
    fn from_iter<I: IntoIterator<Item = &'a TagGroup>>(iter: I) -> Self {
        iter.into_iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        let set = TagGroupSet::from_flags([true, false, false, true]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![TagGroup::A, TagGroup::D]);
        assert_eq!(set.len(), 2);

        assert!(TagGroupSet::from_flags([false; 4]).is_empty());
        assert_eq!(TagGroupSet::from_flags([true; 4]), TagGroupSet::all());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = TagGroupSet::empty();
        set.insert(TagGroup::B);
        set.insert(TagGroup::B);
        assert_eq!(set.len(), 1);
        assert!(set.contains(TagGroup::B));
    }

    #[test]
    fn test_intersects() {
        let ab: TagGroupSet = [TagGroup::A, TagGroup::B].into_iter().collect();
        let cd: TagGroupSet = [TagGroup::C, TagGroup::D].into_iter().collect();
        assert!(!ab.intersects(cd));
        assert!(ab.intersects(TagGroup::B.into()));
        assert!(!ab.intersects(TagGroupSet::empty()));
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!("c".parse::<TagGroup>().unwrap(), TagGroup::C);
        assert_eq!(" D ".parse::<TagGroup>().unwrap(), TagGroup::D);
        assert!("E".parse::<TagGroup>().is_err());
        assert_eq!(TagGroup::A.to_string(), "A");
    }
}
