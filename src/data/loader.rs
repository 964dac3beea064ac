use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use super::model::{LatencySample, LatencySeries, LatencyTable};
use crate::error::{PlotError, Result};

/// Column holding the request start time in scatter inputs.
pub const START_COLUMN: &str = "start";
/// Column holding the request latency in scatter inputs.
pub const LATENCY_COLUMN: &str = "latency";

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PlotError::FileNotFound(path.to_path_buf()),
        _ => PlotError::parse(path, format!("cannot read file: {e}")),
    })
}

/// Parse one numeric cell.  Empty cells are missing values.
fn parse_cell(s: &str) -> Option<f64> {
    if s.is_empty() {
        return Some(f64::NAN);
    }
    s.parse::<f64>().ok()
}

// ---------------------------------------------------------------------------
// Scatter loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one request per row.
/// Only the `start` and `latency` columns are read; any other column is
/// ignored.
///
/// ```text
/// start,latency
/// 0,0.01
/// 1,0.02
/// ```
pub fn load_scatter_csv(path: &Path) -> Result<LatencyTable> {
    let file = open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| PlotError::parse(path, format!("reading CSV header: {e}")))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| PlotError::parse(path, format!("missing '{name}' column")))
    };
    let start_idx = column(START_COLUMN)?;
    let latency_idx = column(LATENCY_COLUMN)?;

    let mut samples = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = row_no + 1;
        let record = result.map_err(|e| PlotError::parse(path, format!("row {row}: {e}")))?;

        let cell = |idx: usize, name: &str| {
            let raw = record.get(idx).unwrap_or("");
            parse_cell(raw).ok_or_else(|| {
                PlotError::parse(path, format!("row {row}, {name}: '{raw}' is not a number"))
            })
        };

        samples.push(LatencySample {
            start: cell(start_idx, START_COLUMN)?,
            latency: cell(latency_idx, LATENCY_COLUMN)?,
        });
    }

    let table = LatencyTable::new(samples);
    let missing = table.len() - table.finite_samples().count();
    if missing > 0 {
        warn!("{missing} row(s) with missing values will not be drawn");
    }
    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Violin loader
// ---------------------------------------------------------------------------

/// Whitespace-delimited numeric text, one sample per line.  Blank lines and
/// `#` comments are skipped.  Every data line must carry the same number of
/// columns; only the first one is kept.
pub fn load_latency_columns(path: &Path) -> Result<LatencySeries> {
    let reader = BufReader::new(open(path)?);
    let mut values = Vec::new();
    let mut width: Option<usize> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line.map_err(|e| PlotError::parse(path, format!("line {line_no}: {e}")))?;

        let content = match line.find('#') {
            Some(idx) => &line[..idx],
            None => line.as_str(),
        };
        let tokens: Vec<&str> = content.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match width {
            None => width = Some(tokens.len()),
            Some(w) if w != tokens.len() => {
                return Err(PlotError::parse(
                    path,
                    format!("line {line_no}: expected {w} columns, found {}", tokens.len()),
                ));
            }
            Some(_) => {}
        }

        let mut row = tokens.iter().map(|tok| {
            tok.parse::<f64>().map_err(|_| {
                PlotError::parse(path, format!("line {line_no}: '{tok}' is not a number"))
            })
        });
        // Validated above: the line has at least one token.
        if let Some(first) = row.next() {
            values.push(first?);
        }
        for rest in row {
            rest?;
        }
    }

    if values.is_empty() {
        return Err(PlotError::EmptyInput(path.to_path_buf()));
    }
    let series = LatencySeries::new(values);
    debug!("{} columns per line", width.unwrap_or(0));
    info!("loaded {} latencies from {}", series.len(), path.display());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn input(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{text}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn scatter_reads_named_columns() {
        let file = input("start,latency\n0,0.01\n1,0.02\n2,0.05\n");
        let table = load_scatter_csv(file.path()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.samples[2], LatencySample { start: 2.0, latency: 0.05 });
    }

    #[test]
    fn scatter_ignores_other_columns_and_order() {
        let file = input("id, latency ,start\na,0.5,10\nb,0.25,11\n");
        let table = load_scatter_csv(file.path()).unwrap();
        assert_eq!(
            table.samples,
            vec![
                LatencySample { start: 10.0, latency: 0.5 },
                LatencySample { start: 11.0, latency: 0.25 },
            ]
        );
    }

    #[test]
    fn scatter_missing_column_is_parse_error() {
        let file = input("start,duration\n0,0.01\n");
        let err = load_scatter_csv(file.path()).unwrap_err();
        match err {
            PlotError::Parse { message, .. } => assert!(message.contains("'latency'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn scatter_non_numeric_cell_is_parse_error() {
        let file = input("start,latency\n0,0.01\n1,fast\n");
        let err = load_scatter_csv(file.path()).unwrap_err();
        match err {
            PlotError::Parse { message, .. } => {
                assert!(message.contains("row 2"), "{message}");
                assert!(message.contains("'fast'"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn scatter_empty_cell_is_missing_value() {
        let file = input("start,latency\n0,\n1,0.02\n");
        let table = load_scatter_csv(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.samples[0].latency.is_nan());
        assert_eq!(table.finite_samples().count(), 1);
    }

    #[test]
    fn scatter_ragged_row_is_parse_error() {
        let file = input("start,latency\n0,0.01,7\n");
        assert!(matches!(
            load_scatter_csv(file.path()),
            Err(PlotError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        assert!(matches!(
            load_scatter_csv(&path),
            Err(PlotError::FileNotFound(p)) if p == path
        ));
        assert!(matches!(
            load_latency_columns(&path),
            Err(PlotError::FileNotFound(_))
        ));
    }

    #[test]
    fn latencies_one_per_line() {
        let file = input("0.01\n0.02\n0.05\n");
        let series = load_latency_columns(file.path()).unwrap();
        assert_eq!(series.values, vec![0.01, 0.02, 0.05]);
    }

    #[test]
    fn latencies_skip_comments_and_blank_lines() {
        let file = input("# latency dump\n\n0.5   # first\n  0.25\n\n");
        let series = load_latency_columns(file.path()).unwrap();
        assert_eq!(series.values, vec![0.5, 0.25]);
    }

    #[test]
    fn latencies_keep_first_column() {
        let file = input("0.1 7\n0.2\t8\n");
        let series = load_latency_columns(file.path()).unwrap();
        assert_eq!(series.values, vec![0.1, 0.2]);
    }

    #[test]
    fn latencies_ragged_columns_are_rejected() {
        let file = input("0.1 7\n0.2\n");
        assert!(matches!(
            load_latency_columns(file.path()),
            Err(PlotError::Parse { .. })
        ));
    }

    #[test]
    fn latencies_non_numeric_token_is_parse_error() {
        let file = input("0.01\nslow\n");
        let err = load_latency_columns(file.path()).unwrap_err();
        match err {
            PlotError::Parse { message, .. } => assert!(message.contains("line 2"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn latencies_non_numeric_second_column_is_parse_error() {
        let file = input("0.01 x\n");
        assert!(matches!(
            load_latency_columns(file.path()),
            Err(PlotError::Parse { .. })
        ));
    }

    #[test]
    fn latencies_empty_file() {
        let file = input("# nothing here\n\n");
        assert!(matches!(
            load_latency_columns(file.path()),
            Err(PlotError::EmptyInput(_))
        ));
    }
}
