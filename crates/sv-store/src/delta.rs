//! Server reply parser.
//!
//! A reply to `send_data <n>` is either the no-data marker or a CSV block:
//!
//! ```text
//! kod_obce,pocet_obyvatel,pocet_nakazenych,datum
//! 554,1200,4,3
//! 555,800,0,3
//! \x04
//! ```
//!
//! The first line is always skipped as a header.  Parsing stops at the first
//! line containing the end-of-message byte, so a reply that still carries
//! its terminator (or was cut mid-frame) is never read as data.

use csv::StringRecord;
use tracing::warn;

use sv_core::{CityId, FrameIndex};
use sv_transport::{END_OF_MESSAGE, NO_DATA_REPLY};

use crate::{FrameRow, StoreError, StoreResult};

/// A parsed server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    /// The server has nothing newer than the requested frame.
    NoData,
    /// Rows of the next frame, in arrival order.
    Rows(Vec<FrameRow>),
}

/// Parse a raw reply.
///
/// Rows are checked for shape only; city ids are resolved later by the
/// frame store.
pub fn parse_delta(raw: &[u8]) -> StoreResult<Delta> {
    let text = std::str::from_utf8(raw)?;
    if text.starts_with(NO_DATA_REPLY) {
        return Ok(Delta::NoData);
    }

    let body = until_sentinel_line(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let header = reader.headers()?.clone();
    if parse_row(&header, 1).is_ok() {
        warn!(
            first_line = %header.iter().collect::<Vec<_>>().join(","),
            "reply's first line looks like data but is skipped as a header"
        );
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        rows.push(parse_row(&record, line)?);
    }

    if rows.is_empty() {
        return Ok(Delta::NoData);
    }
    Ok(Delta::Rows(rows))
}

/// The part of `text` before the first line that contains the sentinel.
fn until_sentinel_line(text: &str) -> &str {
    let Some(pos) = text.find(char::from(END_OF_MESSAGE)) else {
        return text;
    };
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let dropped = text[line_start..pos].trim();
    if !dropped.is_empty() {
        warn!(dropped, "discarding unterminated line before end-of-message");
    }
    &text[..line_start]
}

fn parse_row(record: &StringRecord, line: u64) -> StoreResult<FrameRow> {
    let malformed = |reason: String| StoreError::MalformedRow { line, reason };
    if record.len() < 4 {
        return Err(malformed(format!("expected 4 fields, found {}", record.len())));
    }
    let number = |i: usize, what: &str| {
        record[i]
            .parse::<u64>()
            .map_err(|_| malformed(format!("invalid {what} {:?}", &record[i])))
    };

    let city_id = &record[0];
    if city_id.is_empty() {
        return Err(malformed("empty city id".into()));
    }
    let population = number(1, "population")?;
    let infected_count = number(2, "infected count")?;
    let date = number(3, "frame date")?;
    let frame_index = u32::try_from(date)
        .ok()
        .and_then(|d| d.checked_add(1))
        .map(FrameIndex)
        .ok_or_else(|| malformed(format!("frame date {date} out of range")))?;

    Ok(FrameRow {
        city_id: CityId::new(city_id),
        population,
        infected_count,
        frame_index,
    })
}
