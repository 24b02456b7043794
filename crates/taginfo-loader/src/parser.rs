//! Tag list export parser.
//!
//! Provides a streaming parser for the tag list export of a gateway. The
//! export is a header line followed by one `;`-delimited record per tag,
//! each terminated by `\n` with an optional `\r`.

use std::io::{BufReader, Bytes, Read};

use taginfo_types::{TagGroupSet, TagId, TagInfo, TagType};

use crate::tokenizer::tokenize;
use crate::types::{TagInfoError, TagInfoResult};

/// Positions of the fields read from each export record.
pub mod field {
    /// Tag ID.
    pub const TAG_ID: usize = 0;
    /// Quoted tag name.
    pub const NAME: usize = 1;
    /// Historical logging enabled flag.
    pub const HISTORICAL_LOGGING: usize = 8;
    /// Membership flag for group A.
    pub const GROUP_A: usize = 25;
    /// Membership flag for group B.
    pub const GROUP_B: usize = 26;
    /// Membership flag for group C.
    pub const GROUP_C: usize = 27;
    /// Membership flag for group D.
    pub const GROUP_D: usize = 28;
    /// Tag type code. Last field read; the rest of the record is ignored.
    pub const TYPE: usize = 55;
}

/// Lowest and highest tag IDs seen during a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdBounds {
    lowest: Option<TagId>,
    highest: Option<TagId>,
}

impl IdBounds {
    /// Creates bounds with no IDs seen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Widens the bounds to include `id`.
    pub fn observe(&mut self, id: TagId) {
        self.lowest = Some(self.lowest.map_or(id, |low| low.min(id)));
        self.highest = Some(self.highest.map_or(id, |high| high.max(id)));
    }

    /// Returns the lowest ID seen.
    pub fn lowest(&self) -> Option<TagId> {
        self.lowest
    }

    /// Returns the highest ID seen.
    pub fn highest(&self) -> Option<TagId> {
        self.highest
    }

    /// Returns `highest - lowest`, or `None` if no ID was seen.
    pub fn span(&self) -> Option<u64> {
        match (self.lowest, self.highest) {
            (Some(low), Some(high)) => Some(u64::from(high - low)),
            _ => None,
        }
    }
}

/// Parses one export record into a [`TagInfo`].
///
/// The tag ID is added to `bounds` as soon as it is decoded.
///
/// # Errors
/// Returns an error if the ID or type code is not numeric, the name is
/// empty, or the record ends before the type field.
pub fn parse_tag_line(
    line: &str,
    line_number: usize,
    bounds: &mut IdBounds,
) -> TagInfoResult<TagInfo> {
    let record = tokenize(line, field::TYPE);
    let get = |index: usize| {
        record.get(index).ok_or(TagInfoError::MissingField {
            line: line_number,
            field: index,
        })
    };

    let id = parse::tag_id(get(field::TAG_ID)?, line_number)?;
    bounds.observe(id);

    let name = get(field::NAME)?;
    if name.is_empty() {
        return Err(TagInfoError::EmptyName { line: line_number });
    }

    let historical_log_enabled = parse::flag(get(field::HISTORICAL_LOGGING)?);
    let groups = TagGroupSet::from_flags([
        parse::flag(get(field::GROUP_A)?),
        parse::flag(get(field::GROUP_B)?),
        parse::flag(get(field::GROUP_C)?),
        parse::flag(get(field::GROUP_D)?),
    ]);
    let tag_type = TagType::from_code(parse::type_code(get(field::TYPE)?, line_number)?);

    Ok(TagInfo {
        id,
        name: name.to_string(),
        tag_type,
        historical_log_enabled,
        groups,
    })
}

/// One line of the export, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    /// Decoded line content.
    pub text: String,
}

/// Assembles lines from a byte stream.
///
/// Bytes are consumed one at a time; `\n` ends a line and neither `\n` nor
/// `\r` is ever stored. Content after the last `\n` is returned as a final
/// line when the stream ends, so an export saved without a final newline
/// keeps its last record and a stream cut off mid-record fails to parse
/// instead of losing that record silently.
pub struct LineReader<R: Read> {
    bytes: Bytes<BufReader<R>>,
    buffer: Vec<u8>,
    max_line_bytes: usize,
    lines_read: usize,
    done: bool,
}

impl<R: Read> LineReader<R> {
    /// Creates a line reader that rejects lines longer than `max_line_bytes`.
    pub fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            bytes: BufReader::new(reader).bytes(),
            buffer: Vec::new(),
            max_line_bytes,
            lines_read: 0,
            done: false,
        }
    }

    fn take_line(&mut self) -> Line {
        self.lines_read += 1;
        let bytes = std::mem::take(&mut self.buffer);
        Line {
            number: self.lines_read,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = TagInfoResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.bytes.next() {
                Some(Ok(b'\n')) => return Some(Ok(self.take_line())),
                Some(Ok(b'\r')) => continue,
                Some(Ok(byte)) => {
                    if self.buffer.len() >= self.max_line_bytes {
                        self.done = true;
                        return Some(Err(TagInfoError::LineTooLong {
                            line: self.lines_read + 1,
                            max: self.max_line_bytes,
                        }));
                    }
                    self.buffer.push(byte);
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    if self.buffer.is_empty() {
                        return None;
                    }
                    return Some(Ok(self.take_line()));
                }
            }
        }
    }
}

/// A streaming parser for tag list exports.
///
/// Skips the header line and blank lines, parses every other line into a
/// [`TagInfo`] and tracks the ID bounds across the whole stream.
pub struct EbdParser<R: Read> {
    lines: LineReader<R>,
    bounds: IdBounds,
    header_skipped: bool,
    records_read: usize,
    current_line: usize,
}

impl<R: Read> EbdParser<R> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R, max_line_bytes: usize) -> Self {
        Self {
            lines: LineReader::new(reader, max_line_bytes),
            bounds: IdBounds::new(),
            header_skipped: false,
            records_read: 0,
            current_line: 0,
        }
    }

    /// Returns the number of records read so far, header excluded.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Returns the line number of the most recently returned record.
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    /// Returns the ID bounds seen so far.
    pub fn bounds(&self) -> IdBounds {
        self.bounds
    }
}

impl<R: Read> Iterator for EbdParser<R> {
    type Item = TagInfoResult<TagInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            if !self.header_skipped {
                self.header_skipped = true;
                continue;
            }

            if line.text.trim().is_empty() {
                continue;
            }

            self.records_read += 1;
            self.current_line = line.number;
            return Some(parse_tag_line(&line.text, line.number, &mut self.bounds));
        }
    }
}

/// Helper functions for parsing export field values.
pub mod parse {
    use super::{TagId, TagInfoError, TagInfoResult};

    /// Parses a tag ID.
    pub fn tag_id(value: &str, line: usize) -> TagInfoResult<TagId> {
        value.parse::<TagId>().map_err(|_| TagInfoError::InvalidTagId {
            line,
            value: value.to_string(),
        })
    }

    /// Parses a tag type code.
    pub fn type_code(value: &str, line: usize) -> TagInfoResult<i32> {
        value.parse::<i32>().map_err(|_| TagInfoError::InvalidTypeCode {
            line,
            value: value.to_string(),
        })
    }

    /// Decodes a `"0"`/`"1"` flag. Only `"1"` is true; anything else is false.
    pub fn flag(value: &str) -> bool {
        value == "1"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io;

    use super::*;

    /// Reader that returns `data` and then fails every further read.
    pub(crate) struct FailAfter {
        data: io::Cursor<Vec<u8>>,
    }

    impl FailAfter {
        pub(crate) fn new(data: impl Into<Vec<u8>>) -> Self {
            Self {
                data: io::Cursor::new(data.into()),
            }
        }
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "link dropped")),
                n => Ok(n),
            }
        }
    }

    /// Builds a record with the given values at the fields the parser reads
    /// and `0` everywhere else, plus a few trailing fields.
    pub(crate) fn make_line(
        id: &str,
        name: &str,
        logging: &str,
        groups: [&str; 4],
        type_code: &str,
    ) -> String {
        let mut fields: Vec<String> = vec!["0".to_string(); 61];
        fields[field::TAG_ID] = id.to_string();
        fields[field::NAME] = format!("\"{name}\"");
        fields[2] = "\"a;description\"".to_string();
        fields[field::HISTORICAL_LOGGING] = logging.to_string();
        fields[field::GROUP_A] = groups[0].to_string();
        fields[field::GROUP_B] = groups[1].to_string();
        fields[field::GROUP_C] = groups[2].to_string();
        fields[field::GROUP_D] = groups[3].to_string();
        fields[field::TYPE] = type_code.to_string();
        fields.join(";")
    }

    #[test]
    fn test_parse_tag_line() {
        let line = make_line("12", "Pump 1", "1", ["1", "0", "0", "1"], "1");
        let mut bounds = IdBounds::new();

        let tag = parse_tag_line(&line, 2, &mut bounds).unwrap();
        assert_eq!(tag.id, 12);
        assert_eq!(tag.name, "Pump 1");
        assert!(tag.historical_log_enabled);
        assert_eq!(tag.tag_type, TagType::Float);
        assert_eq!(
            tag.groups,
            [taginfo_types::TagGroup::A, taginfo_types::TagGroup::D]
                .into_iter()
                .collect()
        );
        assert_eq!(bounds.lowest(), Some(12));
        assert_eq!(bounds.highest(), Some(12));
    }

    #[test]
    fn test_malformed_flag_is_false() {
        let line = make_line("3", "Level", "x", ["x", "true", "", "01"], "2");
        let tag = parse_tag_line(&line, 2, &mut IdBounds::new()).unwrap();
        assert!(!tag.historical_log_enabled);
        assert!(tag.groups.is_empty());
    }

    #[test]
    fn test_unknown_type_code_is_kept() {
        let line = make_line("3", "Level", "0", ["0"; 4], "42");
        let tag = parse_tag_line(&line, 2, &mut IdBounds::new()).unwrap();
        assert_eq!(tag.tag_type, TagType::Unknown);
    }

    #[test]
    fn test_invalid_tag_id() {
        let line = make_line("abc", "Level", "0", ["0"; 4], "1");
        let err = parse_tag_line(&line, 4, &mut IdBounds::new()).unwrap_err();
        assert!(matches!(err, TagInfoError::InvalidTagId { line: 4, .. }));
    }

    #[test]
    fn test_invalid_type_code() {
        let line = make_line("1", "Level", "0", ["0"; 4], "float");
        let err = parse_tag_line(&line, 2, &mut IdBounds::new()).unwrap_err();
        assert!(matches!(err, TagInfoError::InvalidTypeCode { .. }));
    }

    #[test]
    fn test_short_record() {
        let err = parse_tag_line("1;\"Level\";0", 2, &mut IdBounds::new()).unwrap_err();
        assert!(matches!(
            err,
            TagInfoError::MissingField {
                line: 2,
                field: field::HISTORICAL_LOGGING
            }
        ));
    }

    #[test]
    fn test_empty_name() {
        let line = make_line("1", "", "0", ["0"; 4], "1");
        let err = parse_tag_line(&line, 2, &mut IdBounds::new()).unwrap_err();
        assert!(matches!(err, TagInfoError::EmptyName { line: 2 }));
    }

    #[test]
    fn test_id_bounds() {
        let mut bounds = IdBounds::new();
        assert_eq!(bounds.span(), None);

        for id in [9, 5, 7] {
            bounds.observe(id);
        }
        assert_eq!(bounds.lowest(), Some(5));
        assert_eq!(bounds.highest(), Some(9));
        assert_eq!(bounds.span(), Some(4));
    }

    #[test]
    fn test_line_reader_strips_terminators() {
        let input = b"header\r\nfirst\r\n\nlast";
        let lines: Vec<Line> = LineReader::new(&input[..], 100)
            .collect::<TagInfoResult<_>>()
            .unwrap();

        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["header", "first", "", "last"]);
        assert_eq!(lines[3].number, 4);
    }

    #[test]
    fn test_line_reader_rejects_long_lines() {
        let input = b"ok\n0123456789\n";
        let mut reader = LineReader::new(&input[..], 5);

        assert_eq!(reader.next().unwrap().unwrap().text, "ok");
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, TagInfoError::LineTooLong { line: 2, max: 5 }));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_line_reader_stops_on_read_error() {
        let mut reader = LineReader::new(FailAfter::new("header\npartial"), 100);

        assert_eq!(reader.next().unwrap().unwrap().text, "header");
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            TagInfoError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_truncated_trailing_record_fails() {
        let export = format!(
            "header\n{}\n1;\"Tr",
            make_line("4", "A", "0", ["0"; 4], "0")
        );

        let mut parser = EbdParser::from_reader(export.as_bytes(), 1000);
        assert_eq!(parser.next().unwrap().unwrap().id, 4);
        let err = parser.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            TagInfoError::MissingField {
                line: 3,
                field: field::HISTORICAL_LOGGING
            }
        ));
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_parser_skips_header_and_blank_lines() {
        let export = format!(
            "{}\n{}\r\n\n{}",
            "TagId;TagName;Description",
            make_line("4", "A", "0", ["0"; 4], "0"),
            make_line("2", "B", "1", ["0"; 4], "6"),
        );

        let mut parser = EbdParser::from_reader(export.as_bytes(), 1000);
        let tags: Vec<TagInfo> = parser.by_ref().collect::<TagInfoResult<_>>().unwrap();

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "A");
        assert_eq!(tags[1].tag_type, TagType::String);
        assert_eq!(parser.records_read(), 2);
        assert_eq!(parser.bounds().lowest(), Some(2));
        assert_eq!(parser.bounds().highest(), Some(4));
    }
}
