//! Tag list exports saved to disk.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use taginfo_loader::TagListSource;

/// A tag list export read from a file.
///
/// The tag count is taken from the file itself: every non-blank line after
/// the header is one tag.
#[derive(Debug, Clone)]
pub struct FileTagListSource {
    path: PathBuf,
}

impl FileTagListSource {
    /// Creates a source for the export at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the export path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TagListSource for FileTagListSource {
    type Reader = File;

    fn tag_count(&self) -> io::Result<usize> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut count = 0;
        // Skip header
        for line in reader.split(b'\n').skip(1) {
            if !line?.iter().all(u8::is_ascii_whitespace) {
                count += 1;
            }
        }
        Ok(count)
    }

    fn open_export(&self) -> io::Result<Self::Reader> {
        File::open(&self.path)
    }
}
