use crate::models::{Bar, RawRow};
use chrono::NaiveDate;
use thiserror::Error;

/// Why a row was left out of the fixture. Never surfaced to the user;
/// it only shows up in debug logs and the skipped-row count.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("unparsable date {0:?}")]
    BadDate(String),

    #[error("non-numeric {field} {value:?}")]
    BadNumber { field: &'static str, value: String },
}

// ── Field parsers ─────────────────────────────────────────────────────────────

/// "2024-01-02" → 1704153600000 (midnight UTC, epoch millis)
/// The year must be exactly four digits; chrono's `%Y` alone also takes "24" or "+2024".
/// No surrounding whitespace is allowed.
pub fn parse_date_millis(s: &str) -> Option<i64> {
    let (year, _) = s.split_once('-')?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// "412.50" → 412.5. NaN and infinities are rejected, JSON has no spelling for them.
pub fn parse_price(s: &str) -> Option<f64> {
    let v: f64 = s.trim().parse().ok()?;
    v.is_finite().then_some(v)
}

/// Volume arrives as a decimal string ("1234567.0"); truncate toward zero.
pub fn parse_volume(s: &str) -> Option<i64> {
    let v: f64 = s.trim().parse().ok()?;
    if !v.is_finite() {
        return None;
    }
    let v = v.trunc();
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
    if v < i64::MIN as f64 || v >= i64::MAX as f64 {
        return None;
    }
    Some(v as i64)
}

// ── RawRow → Bar ──────────────────────────────────────────────────────────────

fn field<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, SkipReason> {
    value.as_deref().ok_or(SkipReason::MissingField(name))
}

fn number<T>(
    value: &Option<String>,
    name: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, SkipReason> {
    let raw = field(value, name)?;
    parse(raw).ok_or_else(|| SkipReason::BadNumber {
        field: name,
        value: raw.to_string(),
    })
}

/// All-or-nothing: any bad field drops the whole row.
pub fn row_to_bar(row: &RawRow) -> Result<Bar, SkipReason> {
    let date = field(&row.date, "Date")?;
    let time = parse_date_millis(date).ok_or_else(|| SkipReason::BadDate(date.to_string()))?;

    Ok(Bar {
        time,
        open: number(&row.open, "Open", parse_price)?,
        high: number(&row.high, "High", parse_price)?,
        low: number(&row.low, "Low", parse_price)?,
        close: number(&row.close, "Close", parse_price)?,
        volume: number(&row.volume, "Volume", parse_volume)?,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
