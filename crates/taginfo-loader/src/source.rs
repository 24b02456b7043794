//! Tag list export sources.

use std::io::{self, Cursor, Read};

/// Something that can produce a tag list export.
///
/// On a gateway this is the device itself: it reports how many tags are
/// configured and streams the export on request. Both calls may fail with
/// an I/O error, which aborts the refresh that made them.
pub trait TagListSource {
    /// Reader over the export bytes.
    type Reader: Read;

    /// Returns the number of tags configured on the device.
    ///
    /// Used to size the working buffer and to compute the gap count.
    fn tag_count(&self) -> io::Result<usize>;

    /// Opens a new export stream.
    fn open_export(&self) -> io::Result<Self::Reader>;
}

impl<T: TagListSource + ?Sized> TagListSource for &T {
    type Reader = T::Reader;

    fn tag_count(&self) -> io::Result<usize> {
        (**self).tag_count()
    }

    fn open_export(&self) -> io::Result<Self::Reader> {
        (**self).open_export()
    }
}

/// A tag list export held in memory.
///
/// # Example
///
/// ```
/// use taginfo_loader::{MemoryTagListSource, TagListSource};
///
/// let source = MemoryTagListSource::new("header\n", 0);
/// assert_eq!(source.tag_count().unwrap(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryTagListSource {
    export: Vec<u8>,
    tag_count: usize,
}

impl MemoryTagListSource {
    /// Creates a source from export bytes and the tag count the device reports.
    pub fn new(export: impl Into<Vec<u8>>, tag_count: usize) -> Self {
        Self {
            export: export.into(),
            tag_count,
        }
    }
}

impl TagListSource for MemoryTagListSource {
    type Reader = Cursor<Vec<u8>>;

    fn tag_count(&self) -> io::Result<usize> {
        Ok(self.tag_count)
    }

    fn open_export(&self) -> io::Result<Self::Reader> {
        Ok(Cursor::new(self.export.clone()))
    }
}
