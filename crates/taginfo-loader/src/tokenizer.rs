//! Quote-aware field tokenizer for export records.
//!
//! Export records are `;`-delimited. String fields are wrapped in double
//! quotes and may themselves contain `;`, so splitting on the delimiter is
//! not enough. The tokenizer is a two-state machine that only treats a
//! delimiter as a field boundary while outside quotes. Quote characters
//! toggle the state and are not stored.

use csv::StringRecord;

/// Field delimiter used in tag list exports.
pub const DELIMITER: char = ';';

/// Quote character used around string fields.
pub const QUOTE: char = '"';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    Quoted,
}

/// Splits a record into fields, stopping once field `last_field` is complete.
///
/// Fields after `last_field` are never scanned. If the record has fewer
/// fields, the returned record is simply shorter.
///
/// # Examples
///
/// ```
/// use taginfo_loader::tokenizer::tokenize;
///
/// let record = tokenize(r#"7;"Valve; north";1;2"#, 2);
/// assert_eq!(record.len(), 3);
/// assert_eq!(&record[1], "Valve; north");
/// ```
pub fn tokenize(line: &str, last_field: usize) -> StringRecord {
    let mut record = StringRecord::new();
    let mut field = String::new();
    let mut state = State::Unquoted;

    for c in line.chars() {
        match (state, c) {
            (State::Unquoted, DELIMITER) => {
                record.push_field(&field);
                field.clear();
                if record.len() > last_field {
                    return record;
                }
            }
            (State::Unquoted, QUOTE) => state = State::Quoted,
            (State::Quoted, QUOTE) => state = State::Unquoted,
            (_, c) => field.push(c),
        }
    }

    record.push_field(&field);
    record
}
