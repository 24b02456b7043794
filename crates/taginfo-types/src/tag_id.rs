//! Tag identifier type.
//!
//! Tag identifiers are assigned by the gateway when a tag is created. They
//! are unique on a device but are not guaranteed to be contiguous: deleting
//! a tag leaves its number unused until the device is reset.

/// A device-assigned tag identifier.
///
/// # Examples
///
/// ```
/// use taginfo_types::TagId;
///
/// let first_tag: TagId = 1;
/// let pump_speed: TagId = 42;
/// ```
pub type TagId = u32;
