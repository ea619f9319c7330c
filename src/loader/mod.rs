//! CSV text → chronologically sorted bars.

pub mod cleaner;

use crate::models::{Bar, RawRow};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use self::cleaner::row_to_bar;

#[derive(Debug, Default)]
pub struct ParsedBars {
    pub bars: Vec<Bar>,
    pub skipped: usize,
}

/// Column positions resolved from the header line, by name.
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: Option<usize>,
    volume: Option<usize>,
}

impl Columns {
    /// Exact, case-sensitive names. A repeated name resolves to its last column.
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().collect::<Vec<_>>().iter().rposition(|h| *h == name);
        Self {
            date: find("Date"),
            open: find("Open"),
            high: find("High"),
            low: find("Low"),
            close: find("Close"),
            volume: find("Volume"),
        }
    }

    fn raw_row(&self, record: &StringRecord) -> RawRow {
        let get = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(|s| s.to_string());
        RawRow {
            date: get(self.date),
            open: get(self.open),
            high: get(self.high),
            low: get(self.low),
            close: get(self.close),
            volume: get(self.volume),
        }
    }
}

/// Parse a header-labelled daily CSV: Date, Open, High, Low, Close, Volume.
/// Malformed rows are dropped and counted; the result is stable-sorted by time.
/// Fields are not trimmed here: numbers tolerate padding, dates and header names do not.
pub fn parse_bars(csv_text: &str) -> ParsedBars {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => Columns::from_headers(headers),
        Err(e) => {
            debug!("Unreadable header line: {}", e);
            Columns::default()
        }
    };

    let mut parsed = ParsedBars::default();

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!("Row {}: {}", i + 1, e);
                parsed.skipped += 1;
                continue;
            }
        };

        match row_to_bar(&columns.raw_row(&record)) {
            Ok(bar) => parsed.bars.push(bar),
            Err(reason) => {
                debug!("Row {} skipped: {}", i + 1, reason);
                parsed.skipped += 1;
            }
        }
    }

    // sort_by_key is stable: duplicate dates keep their input order
    parsed.bars.sort_by_key(|b| b.time);

    info!("{} bars parsed, {} rows skipped", parsed.bars.len(), parsed.skipped);
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-03,410.0,415.0,409.5,414.2,2000000
2024-01-02,400.0,405.0,399.0,402.1,1500000
bad-row,x,y,z,w,v
";

    #[test]
    fn test_sample_is_sorted_and_filtered() {
        let parsed = parse_bars(SAMPLE);

        assert_eq!(parsed.skipped, 1);
        assert_eq!(
            parsed.bars,
            vec![
                Bar {
                    time: 1_704_153_600_000,
                    open: 400.0,
                    high: 405.0,
                    low: 399.0,
                    close: 402.1,
                    volume: 1_500_000,
                },
                Bar {
                    time: 1_704_240_000_000,
                    open: 410.0,
                    high: 415.0,
                    low: 409.5,
                    close: 414.2,
                    volume: 2_000_000,
                },
            ]
        );
    }

    #[test]
    fn test_every_valid_row_survives() {
        let text = "\
Date,Open,High,Low,Close,Volume
2024-01-02,1,2,0.5,1.5,100
2024-01-03,1,2,0.5,1.5,200.0
2024-01-04,1,2,0.5,1.5,300
2024-01-05,1,2,0.5,1.5,400
";
        let parsed = parse_bars(text);
        assert_eq!(parsed.bars.len(), 4);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_bad_fields_drop_only_their_row() {
        let text = "\
Date,Open,High,Low,Close,Volume
2024-01-02,1,2,0.5,1.5,100
2024-01-03,abc,2,0.5,1.5,100
2024-01-04,1,2,0.5,1.5,many
2024/01/05,1,2,0.5,1.5,100
2024-01-08,1,2,0.5,1.5
2024-01-09,3,4,2.5,3.5,900
";
        let parsed = parse_bars(text);
        let times: Vec<i64> = parsed.bars.iter().map(|b| b.time).collect();

        assert_eq!(times, vec![1_704_153_600_000, 1_704_758_400_000]);
        assert_eq!(parsed.bars[1].close, 3.5);
        assert_eq!(parsed.skipped, 4);
    }

    #[test]
    fn test_equal_dates_keep_input_order() {
        let text = "\
Date,Open,High,Low,Close,Volume
2024-01-05,5,5,5,5,5
2024-01-02,1,1,1,1,1
2024-01-05,6,6,6,6,6
2024-01-02,2,2,2,2,2
2024-01-05,7,7,7,7,7
";
        let parsed = parse_bars(text);
        let opens: Vec<f64> = parsed.bars.iter().map(|b| b.open).collect();
        assert_eq!(opens, vec![1.0, 2.0, 5.0, 6.0, 7.0]);
        assert!(parsed.bars.windows(2).all(|w| w[0].time <= w[1].time));
    }

    #[test]
    fn test_columns_found_by_name() {
        let text = "\
Volume,Close,Date,Adj Close,Low,High,Open
\"1,000\",10.5,2024-01-02,10.4,9.5,11,10
1000,10.5,2024-01-03,10.4,9.5,11,10
";
        let parsed = parse_bars(text);

        // quoted "1,000" is one field that is not a number
        assert_eq!(parsed.skipped, 1);
        assert_eq!(
            parsed.bars,
            vec![Bar {
                time: 1_704_240_000_000,
                open: 10.0,
                high: 11.0,
                low: 9.5,
                close: 10.5,
                volume: 1000,
            }]
        );
    }

    #[test]
    fn test_malformed_years_are_skipped() {
        let text = "\
Date,Open,High,Low,Close,Volume
2024-01-03,1,2,0.5,1.5,100
24-01-02,1,2,0.5,1.5,100
+2024-01-02,1,2,0.5,1.5,100
";
        let parsed = parse_bars(text);
        let times: Vec<i64> = parsed.bars.iter().map(|b| b.time).collect();
        assert_eq!(times, vec![1_704_240_000_000]);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_padding_allowed_on_numbers_not_dates() {
        let text = "\
Date,Open,High,Low,Close,Volume
2024-01-02, 1 ,2 , 0.5,1.5, 100
2024-01-03 ,1,2,0.5,1.5,100
";
        let parsed = parse_bars(text);
        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.bars.len(), 1);
        assert_eq!(parsed.bars[0].time, 1_704_153_600_000);
        assert_eq!(parsed.bars[0].open, 1.0);
        assert_eq!(parsed.bars[0].volume, 100);
    }

    #[test]
    fn test_padded_header_does_not_match() {
        let text = " Date ,Open,High,Low,Close,Volume\n2024-01-02,1,2,0.5,1.5,10\n";
        let parsed = parse_bars(text);
        assert!(parsed.bars.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_repeated_header_uses_last_column() {
        let text = "\
Date,Open,High,Low,Close,Volume,Close
2024-01-02,1,2,0.5,999,10,1.5
";
        let parsed = parse_bars(text);
        assert_eq!(parsed.bars.len(), 1);
        assert_eq!(parsed.bars[0].close, 1.5);
    }

    #[test]
    fn test_missing_column_skips_everything() {
        let text = "Date,Open,High,Low,Close\n2024-01-02,1,2,0.5,1.5\n";
        let parsed = parse_bars(text);
        assert!(parsed.bars.is_empty());
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_empty_and_crlf_input() {
        assert!(parse_bars("").bars.is_empty());
        assert!(parse_bars("Date,Open,High,Low,Close,Volume\n").bars.is_empty());

        let crlf = "Date,Open,High,Low,Close,Volume\r\n2024-01-02,1,2,0.5,1.5,10\r\n\r\n";
        let parsed = parse_bars(crlf);
        assert_eq!(parsed.bars.len(), 1);
        assert_eq!(parsed.skipped, 0);
    }
}
