/// JMA (Japan Meteorological Agency) latest precipitation feed client.
///
/// The "latest 1-hour precipitation" table lists every AMeDAS station
/// in one Shift_JIS encoded CSV file, refreshed every 10 minutes:
///   http://www.data.jma.go.jp/obd/stats/data/mdrr/pre_rct/alltable/pre1h00_rct.csv
///
/// Column layout (only the consumed columns are listed):
///   0  観測所番号         station id
///   4  現在時刻(年)       year
///   5  現在時刻(月)       month
///   6  現在時刻(日)       day
///   7  現在時刻(時)       hour
///   8  現在時刻(分)       minute
///   9  現在値(mm)         precipitation over the preceding hour
///
/// Fetching, decoding and parsing are three separate functions so the
/// parser can be exercised with plain UTF-8 fixtures.

use crate::model::{FetchError, ParseError, Reading};

/// Default feed location.
pub const JMA_PRE1H_URL: &str =
    "http://www.data.jma.go.jp/obd/stats/data/mdrr/pre_rct/alltable/pre1h00_rct.csv";

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Downloads the raw feed bytes.
///
/// The status code is not checked here; whatever body the server returns
/// is handed to the parser, where an error page fails the header check.
pub fn fetch_feed(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = client.get(url).send()?;
    tracing::debug!(status = %response.status(), url, "fetched precipitation feed");
    let body = response.bytes()?;
    Ok(body.to_vec())
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Decodes Shift_JIS feed bytes into UTF-8 text.
///
/// Malformed sequences are replaced with U+FFFD by the decoder and are
/// not reported.
pub fn decode_feed(bytes: &[u8]) -> String {
    let (text, _, had_errors) = encoding_rs::SHIFT_JIS.decode(bytes);
    if had_errors {
        tracing::debug!("feed contained malformed Shift_JIS sequences");
    }
    text.into_owned()
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Fixed column positions of the fields we consume.
pub struct FeedSchema;

impl FeedSchema {
    pub const STATION_ID: usize = 0;
    pub const YEAR: usize = 4;
    pub const MONTH: usize = 5;
    pub const DAY: usize = 6;
    pub const HOUR: usize = 7;
    pub const MINUTE: usize = 8;
    pub const AMOUNT: usize = 9;

    /// (index, marker that must appear in the header cell)
    const HEADER_MARKERS: [(usize, &'static str); 6] = [
        (Self::YEAR, "(年)"),
        (Self::MONTH, "(月)"),
        (Self::DAY, "(日)"),
        (Self::HOUR, "(時)"),
        (Self::MINUTE, "(分)"),
        (Self::AMOUNT, "(mm)"),
    ];

    /// Checks a header record against the expected layout.
    pub fn validate_header(fields: &[&str]) -> Result<(), ParseError> {
        for (index, marker) in Self::HEADER_MARKERS {
            let found = fields.get(index).map(|f| f.trim()).unwrap_or("");
            if !found.contains(marker) {
                return Err(ParseError::SchemaMismatch {
                    index,
                    expected: marker,
                    found: found.to_string(),
                });
            }
        }
        Ok(())
    }

    /// A header line starts with a column title rather than a numeric
    /// station id.
    fn is_header(fields: &[&str]) -> bool {
        let first = fields.first().map(|f| f.trim()).unwrap_or("");
        !first.is_empty() && !first.bytes().all(|b| b.is_ascii_digit())
    }
}

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

/// Named view of one feed record.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRow<'a> {
    pub station_id: &'a str,
    pub year: &'a str,
    pub month: &'a str,
    pub day: &'a str,
    pub hour: &'a str,
    pub minute: &'a str,
    pub amount: &'a str,
}

impl<'a> FeedRow<'a> {
    /// Maps a split record onto the schema.
    ///
    /// # Errors
    /// `ParseError::MissingField` naming the first absent column.
    pub fn from_fields(fields: &[&'a str]) -> Result<Self, ParseError> {
        let field = |index: usize, name: &'static str| {
            fields
                .get(index)
                .copied()
                .map(str::trim)
                .ok_or(ParseError::MissingField { index, name })
        };

        Ok(FeedRow {
            station_id: field(FeedSchema::STATION_ID, "station_id")?,
            year: field(FeedSchema::YEAR, "year")?,
            month: field(FeedSchema::MONTH, "month")?,
            day: field(FeedSchema::DAY, "day")?,
            hour: field(FeedSchema::HOUR, "hour")?,
            minute: field(FeedSchema::MINUTE, "minute")?,
            amount: field(FeedSchema::AMOUNT, "amount")?,
        })
    }

    /// Converts the row into a validated `Reading`.
    ///
    /// An unparseable amount is an error, never a silent zero.
    pub fn to_reading(&self) -> Result<Reading, ParseError> {
        let invalid_time = || {
            ParseError::InvalidTimestamp(format!(
                "{}-{}-{} {}:{}",
                self.year, self.month, self.day, self.hour, self.minute
            ))
        };

        // Calendar fields are bare digits; `str::parse` alone would accept a sign.
        let calendar = [self.year, self.month, self.day, self.hour, self.minute];
        if calendar
            .iter()
            .any(|f| f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()))
        {
            return Err(invalid_time());
        }

        let year: i32 = self.year.parse().map_err(|_| invalid_time())?;
        let month: u32 = self.month.parse().map_err(|_| invalid_time())?;
        let day: u32 = self.day.parse().map_err(|_| invalid_time())?;
        let hour: u32 = self.hour.parse().map_err(|_| invalid_time())?;
        let minute: u32 = self.minute.parse().map_err(|_| invalid_time())?;

        let amount: f64 = self
            .amount
            .parse()
            .map_err(|_| ParseError::InvalidAmount(self.amount.to_string()))?;

        Reading::from_parts(year, month, day, hour, minute, amount)
    }
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Finds the first row for `station_id` and turns it into a `Reading`.
///
/// Returns `Ok(None)` when the station does not appear in the feed.
/// Rows for other stations are skipped without being inspected, as are
/// any later rows for the same station. Blank lines are ignored; the
/// header check applies to the first non-blank line.
///
/// # Errors
/// - `ParseError::SchemaMismatch` if the header layout has drifted.
/// - `ParseError::MissingField`, `InvalidTimestamp`, `InvalidAmount` for a
///   malformed matching row.
pub fn parse_feed(text: &str, station_id: &str) -> Result<Option<Reading>, ParseError> {
    let mut seen_first_line = false;
    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();

        let is_first_line = !seen_first_line;
        seen_first_line = true;
        if is_first_line && FeedSchema::is_header(&fields) {
            FeedSchema::validate_header(&fields)?;
            continue;
        }

        if fields[FeedSchema::STATION_ID].trim() != station_id {
            continue;
        }

        let row = FeedRow::from_fields(&fields)?;
        return row.to_reading().map(Some);
    }

    Ok(None)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
