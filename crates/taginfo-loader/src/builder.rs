//! Registry building and tag ID gap correction.
//!
//! The builder reads a whole export, then decides the snapshot layout. The
//! decision needs the full ID range, so it can only be made once the stream
//! is exhausted:
//!
//! - `gap_count = (highest_id - lowest_id) - expected_tags`
//! - `gap_count > 0`: the device numbering has unused IDs and the tags are
//!   rebuilt into an offset-indexed layout of `highest_id - lowest_id + 1`
//!   slots.
//! - otherwise the tags are kept in export order.
//!
//! The offset layout is refused when the span exceeds
//! [`RegistryConfig::max_id_span`].

use std::collections::HashSet;
use std::io::Read;

use taginfo_types::{TagId, TagInfo};

use crate::parser::{EbdParser, IdBounds};
use crate::snapshot::{Snapshot, TagLayout};
use crate::source::TagListSource;
use crate::types::{BuildStats, RegistryConfig, TagInfoError, TagInfoResult};

/// Accumulates parsed tags for one refresh.
struct RegistryBuilder<'a> {
    config: &'a RegistryConfig,
    expected_tags: usize,
    tags: Vec<TagInfo>,
    seen_ids: HashSet<TagId>,
    bounds: IdBounds,
    records_read: usize,
}

impl<'a> RegistryBuilder<'a> {
    fn new(config: &'a RegistryConfig, expected_tags: usize) -> Self {
        Self {
            config,
            expected_tags,
            tags: Vec::with_capacity(expected_tags),
            seen_ids: HashSet::with_capacity(expected_tags),
            bounds: IdBounds::new(),
            records_read: 0,
        }
    }

    fn read_export<R: Read>(&mut self, reader: R) -> TagInfoResult<()> {
        let mut parser = EbdParser::from_reader(reader, self.config.max_line_bytes);

        while let Some(tag) = parser.next() {
            let tag = tag?;
            if !self.seen_ids.insert(tag.id) {
                return Err(TagInfoError::DuplicateTagId {
                    line: parser.current_line(),
                    id: tag.id,
                });
            }
            self.tags.push(tag);
        }

        self.records_read = parser.records_read();
        self.bounds = parser.bounds();
        Ok(())
    }

    fn finish(self) -> TagInfoResult<(Snapshot, BuildStats)> {
        let tags_loaded = self.tags.len();
        let id_span = self.bounds.span();
        let gap_count = id_span.map_or(0, |span| span as i64 - self.expected_tags as i64);
        let mut gap_warning = false;

        let layout = match (self.bounds.lowest(), id_span) {
            (Some(lowest), Some(span)) if gap_count > 0 => {
                if span > self.config.max_id_span {
                    return Err(TagInfoError::IdSpanTooLarge {
                        span,
                        max: self.config.max_id_span,
                    });
                }

                if let Some(threshold) = self.config.gap_warning_threshold {
                    if gap_count as u64 >= threshold {
                        gap_warning = true;
                        tracing::warn!(
                            "There are {} gaps in tag ID numbers. For optimal performance, there \
                             should be no more than {} gaps. Resetting the device renumbers tags \
                             and removes the gaps.",
                            gap_count,
                            threshold
                        );
                    }
                }

                tracing::debug!("Tag ID gaps detected, rebuilding tag list with offset indexing...");
                let slots = rebuild_with_gaps(self.tags, lowest, span)?;
                tracing::debug!("Finished rebuilding tag list ({} slots)", slots.len());
                TagLayout::OffsetIndexed { lowest, slots }
            }
            _ => TagLayout::Compact(self.tags),
        };

        let snapshot = Snapshot {
            layout,
            count: tags_loaded,
            bounds: self.bounds,
        };
        let stats = BuildStats {
            expected_tags: self.expected_tags,
            records_read: self.records_read,
            tags_loaded,
            id_span,
            gap_count,
            layout: snapshot.layout_kind(),
            gap_warning,
        };
        Ok((snapshot, stats))
    }
}

/// Places every tag at `id - lowest`; IDs with no tag stay empty.
fn rebuild_with_gaps(
    tags: Vec<TagInfo>,
    lowest: TagId,
    span: u64,
) -> TagInfoResult<Vec<Option<TagInfo>>> {
    let slot_count = span + 1;
    let len = usize::try_from(slot_count)
        .map_err(|_| TagInfoError::SlotAllocation { slots: slot_count })?;

    let mut slots: Vec<Option<TagInfo>> = Vec::new();
    slots
        .try_reserve_exact(len)
        .map_err(|_| TagInfoError::SlotAllocation { slots: slot_count })?;
    slots.resize(len, None);

    for tag in tags {
        let offset = (tag.id - lowest) as usize;
        slots[offset] = Some(tag);
    }
    Ok(slots)
}

/// Builds a snapshot from an export stream.
pub(crate) fn build_from_reader<R: Read>(
    reader: R,
    expected_tags: usize,
    config: &RegistryConfig,
) -> TagInfoResult<(Snapshot, BuildStats)> {
    let mut builder = RegistryBuilder::new(config, expected_tags);
    builder.read_export(reader)?;
    builder.finish()
}

/// Builds a snapshot from a tag list source.
pub(crate) fn build_from_source<S: TagListSource>(
    source: &S,
    config: &RegistryConfig,
) -> TagInfoResult<(Snapshot, BuildStats)> {
    let expected_tags = source.tag_count()?;
    let reader = source.open_export()?;
    build_from_reader(reader, expected_tags, config)
}
