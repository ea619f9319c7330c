use serde::{Deserialize, Serialize};

// ── Daily bar ─────────────────────────────────────────────────────────────────

/// One day of OHLCV, keyed by midnight-UTC epoch milliseconds.
/// Field order here is the field order in the fixture JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

// ── Raw CSV row ───────────────────────────────────────────────────────────────

/// Daily quotes CSV: Date, Open, High, Low, Close, Volume
/// A `None` field means the column was absent from the header or the row was short.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub date: Option<String>,
    pub open: Option<String>,
    pub high: Option<String>,
    pub low: Option<String>,
    pub close: Option<String>,
    pub volume: Option<String>,
}
