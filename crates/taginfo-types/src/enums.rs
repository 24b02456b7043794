//! Tag enumeration types.
//!
//! This module provides enum representations for the coded values found in
//! a tag list export, such as the tag data type.

/// Data type of a gateway tag.
///
/// The export encodes the type as a small integer. Codes this crate does not
/// know about decode to [`TagType::Unknown`] so that a firmware adding a new
/// type does not make the whole export unreadable.
///
/// # Examples
///
/// ```
/// use taginfo_types::TagType;
///
/// assert_eq!(TagType::from_code(1), TagType::Float);
/// assert_eq!(TagType::from_code(99), TagType::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagType {
    /// Boolean (digital) tag.
    Boolean,
    /// 32-bit floating point tag.
    Float,
    /// Signed integer tag.
    Integer,
    /// Unsigned 32-bit integer tag.
    DWord,
    /// String tag.
    String,
    /// Type code not recognized by this crate.
    Unknown,
}

impl TagType {
    /// Export code for boolean tags.
    pub const BOOLEAN_CODE: i32 = 0;
    /// Export code for floating point tags.
    pub const FLOAT_CODE: i32 = 1;
    /// Export code for integer tags.
    pub const INTEGER_CODE: i32 = 2;
    /// Export code for DWord tags.
    pub const DWORD_CODE: i32 = 3;
    /// Export code for string tags.
    pub const STRING_CODE: i32 = 6;

    /// Creates a TagType from its export code.
    ///
    /// Unrecognized codes map to [`TagType::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::BOOLEAN_CODE => Self::Boolean,
            Self::FLOAT_CODE => Self::Float,
            Self::INTEGER_CODE => Self::Integer,
            Self::DWORD_CODE => Self::DWord,
            Self::STRING_CODE => Self::String,
            _ => Self::Unknown,
        }
    }

    /// Returns the export code for this type.
    ///
    /// Returns `None` for [`TagType::Unknown`], whose raw code is not kept.
    pub fn to_code(self) -> Option<i32> {
        match self {
            Self::Boolean => Some(Self::BOOLEAN_CODE),
            Self::Float => Some(Self::FLOAT_CODE),
            Self::Integer => Some(Self::INTEGER_CODE),
            Self::DWord => Some(Self::DWORD_CODE),
            Self::String => Some(Self::STRING_CODE),
            Self::Unknown => None,
        }
    }
}
