/// Test fixtures: representative rows from the JMA pre1h00_rct.csv table.
///
/// Fixtures are plain UTF-8 text; `shift_jis_bytes` re-encodes one for
/// tests that cover the decode step. Rows are truncated after the
/// precipitation column plus its quality flag, which is all the parser
/// reads.

/// Kyoto station id.
#[cfg(test)]
pub(crate) const KYOTO: &str = "61286";

#[cfg(test)]
pub(crate) const HEADER: &str = "観測所番号,都道府県,地点,国際地点番号,現在時刻(年),現在時刻(月),現在時刻(日),現在時刻(時),現在時刻(分),現在値(mm),現在値の品質情報\n";

/// Builds one data row for `station_id`.
#[cfg(test)]
pub(crate) fn row(
    station_id: &str,
    year: &str,
    month: &str,
    day: &str,
    hour: &str,
    minute: &str,
    amount: &str,
) -> String {
    format!(
        "{},京都府,京都,47759,{},{},{},{},{},{},8\n",
        station_id, year, month, day, hour, minute, amount
    )
}

/// Header + Sapporo + Kyoto (55.0 mm at 2024-05-01 12:30) + Osaka.
#[cfg(test)]
pub(crate) fn fixture_feed_kyoto_heavy() -> &'static str {
    "観測所番号,都道府県,地点,国際地点番号,現在時刻(年),現在時刻(月),現在時刻(日),現在時刻(時),現在時刻(分),現在値(mm),現在値の品質情報\n\
     14163,石狩地方,札幌,47412,2024,5,1,12,30,0.0,8\n\
     61286,京都府,京都,47759,2024,5,1,12,30,55.0,8\n\
     62078,大阪府,大阪,47772,2024,5,1,12,30,21.5,8\n"
}

/// Kyoto appears twice; the first row (12.5 mm) is authoritative.
#[cfg(test)]
pub(crate) fn fixture_feed_duplicate_kyoto() -> &'static str {
    "観測所番号,都道府県,地点,国際地点番号,現在時刻(年),現在時刻(月),現在時刻(日),現在時刻(時),現在時刻(分),現在値(mm),現在値の品質情報\n\
     61286,京都府,京都,47759,2024,5,1,12,30,12.5,8\n\
     61286,京都府,京都,47759,2024,5,1,12,30,99.0,8\n"
}

/// Valid feed with no Kyoto row.
#[cfg(test)]
pub(crate) fn fixture_feed_without_kyoto() -> &'static str {
    "観測所番号,都道府県,地点,国際地点番号,現在時刻(年),現在時刻(月),現在時刻(日),現在時刻(時),現在時刻(分),現在値(mm),現在値の品質情報\n\
     14163,石狩地方,札幌,47412,2024,5,1,12,30,0.0,8\n\
     62078,大阪府,大阪,47772,2024,5,1,12,30,21.5,8\n"
}

/// A column was inserted before the timestamp fields, shifting them right.
#[cfg(test)]
pub(crate) fn fixture_feed_shifted_header() -> &'static str {
    "観測所番号,都道府県,地点,国際地点番号,地点種別,現在時刻(年),現在時刻(月),現在時刻(日),現在時刻(時),現在時刻(分),現在値(mm)\n\
     61286,京都府,京都,47759,官,2024,5,1,12,30,55.0\n"
}

/// Builds a feed containing only a header and one Kyoto row.
#[cfg(test)]
pub(crate) fn feed_with_kyoto(year: &str, month: &str, day: &str, hour: &str, minute: &str, amount: &str) -> String {
    format!("{}{}", HEADER, row(KYOTO, year, month, day, hour, minute, amount))
}

/// Encodes a UTF-8 fixture as Shift_JIS, as the live feed is served.
#[cfg(test)]
pub(crate) fn shift_jis_bytes(text: &str) -> Vec<u8> {
    let (bytes, _, unmappable) = encoding_rs::SHIFT_JIS.encode(text);
    assert!(!unmappable, "fixture contains characters outside Shift_JIS");
    bytes.into_owned()
}
