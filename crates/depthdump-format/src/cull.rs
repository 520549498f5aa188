//! Column culling for market-depth CSV files.

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::FormatError;

/// Column whose `price_size` cells are trimmed to the price by default.
pub const ASK_COLUMN: &str = "ask_price_ask_size";

/// Column dropped by default.
pub const BID_COLUMN: &str = "bid_price_bid_size";

/// Rewrites a CSV file, optionally dropping columns.
///
/// With a non-empty drop set the output holds two columns: the first column
/// that survives the drop, followed by the truncate column with each value
/// cut before its first `_`. With an empty drop set every column is copied
/// verbatim. In both modes the header row is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvCuller {
    drop: BTreeSet<String>,
    truncate: String,
    include_header: bool,
}

impl Default for CsvCuller {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvCuller {
    /// Creates a culler that drops the bid column and trims the ask column.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drop: BTreeSet::from([BID_COLUMN.to_string()]),
            truncate: ASK_COLUMN.to_string(),
            include_header: true,
        }
    }

    /// Creates a culler that copies every column unchanged.
    #[must_use]
    pub fn passthrough() -> Self {
        Self {
            drop: BTreeSet::new(),
            ..Self::new()
        }
    }

    /// Sets the columns to drop. An empty set disables culling.
    #[must_use]
    pub fn with_drop<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the column whose values are trimmed at the first underscore.
    #[must_use]
    pub fn with_truncate(mut self, column: impl Into<String>) -> Self {
        self.truncate = column.into();
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Returns true if columns will be dropped.
    #[must_use]
    pub fn is_culling(&self) -> bool {
        !self.drop.is_empty()
    }

    /// Returns true if the header row is written.
    #[must_use]
    pub const fn includes_header(&self) -> bool {
        self.include_header
    }

    /// Reads CSV from `reader` and writes the culled rows to `writer`.
    ///
    /// Returns the number of data rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed, a named column is missing,
    /// or writing fails.
    pub fn cull<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<usize, FormatError> {
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        let headers = reader.headers()?.clone();
        let selection = self.select(&headers)?;

        if self.include_header {
            writer.write_record(selection.project(&headers, false))?;
        }

        let mut rows = 0;
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            writer.write_record(selection.project(&record, true))?;
            rows += 1;
        }

        writer.flush()?;
        Ok(rows)
    }

    /// Culls the CSV file at `src` into a new file at `dst`.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be accessed or culling fails.
    pub fn cull_file(&self, src: &Path, dst: &Path) -> Result<usize, FormatError> {
        let reader = BufReader::new(File::open(src)?);
        let writer = BufWriter::new(File::create(dst)?);
        self.cull(reader, writer)
    }

    fn select(&self, headers: &StringRecord) -> Result<Selection, FormatError> {
        if !self.is_culling() {
            return Ok(Selection::All);
        }

        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| FormatError::MissingColumn(name.to_string()))
        };

        for column in &self.drop {
            position(column.as_str())?;
        }

        let first = headers
            .iter()
            .position(|h| !self.drop.contains(h))
            .ok_or_else(|| FormatError::MissingColumn("<first remaining column>".to_string()))?;
        let truncate = position(self.truncate.as_str())?;
        if self.drop.contains(&self.truncate) {
            return Err(FormatError::MissingColumn(self.truncate.clone()));
        }

        Ok(Selection::Culled { first, truncate })
    }
}

/// Column layout of the output rows.
#[derive(Debug, Clone, Copy)]
enum Selection {
    All,
    Culled { first: usize, truncate: usize },
}

impl Selection {
    fn project<'r>(&self, record: &'r StringRecord, trim: bool) -> Vec<&'r str> {
        match *self {
            Self::All => record.iter().collect(),
            Self::Culled { first, truncate } => {
                let value = record.get(truncate).unwrap_or_default();
                let value = if trim { remove_size(value) } else { value };
                if first == truncate {
                    vec![value]
                } else {
                    vec![record.get(first).unwrap_or_default(), value]
                }
            }
        }
    }
}

/// Returns the part of a `price_size` cell before the first underscore.
#[must_use]
pub fn remove_size(value: &str) -> &str {
    value.split('_').next().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(culler: &CsvCuller, input: &str) -> String {
        let mut output = Vec::new();
        culler.cull(input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_cull_drops_bid_and_trims_ask() {
        let input = "day,ask_price_ask_size,bid_price_bid_size\n2021-01-01,100_5,200_3\n";
        let result = run(&CsvCuller::new(), input);
        assert_eq!(result, "day,ask_price_ask_size\n2021-01-01,100\n");
    }

    #[test]
    fn test_cull_without_header() {
        let input = "day,ask_price_ask_size,bid_price_bid_size\n2021-01-01,100_5,200_3\n2021-01-02,101_7,199_1\n";
        let result = run(&CsvCuller::new().with_header(false), input);
        assert_eq!(result, "2021-01-01,100\n2021-01-02,101\n");
    }

    #[test]
    fn test_cull_real_layout() {
        // Bid column precedes ask in the files served by the API.
        let input = "time_seconds,bid_price_bid_size,ask_price_ask_size\n1609459200,28990.1_0.5,29000.5_0.25\n";
        let result = run(&CsvCuller::new(), input);
        assert_eq!(result, "time_seconds,ask_price_ask_size\n1609459200,29000.5\n");
    }

    #[test]
    fn test_value_without_underscore_is_kept() {
        let input = "t,ask_price_ask_size,bid_price_bid_size\n1,100,200_3\n2,,1_1\n";
        let result = run(&CsvCuller::new().with_header(false), input);
        assert_eq!(result, "1,100\n2,\n");
    }

    #[test]
    fn test_missing_drop_column() {
        let input = "day,ask_price_ask_size\n2021-01-01,100_5\n";
        let mut output = Vec::new();
        let result = CsvCuller::new().cull(input.as_bytes(), &mut output);
        assert!(matches!(result, Err(FormatError::MissingColumn(c)) if c == BID_COLUMN));
    }

    #[test]
    fn test_missing_truncate_column() {
        let input = "day,bid_price_bid_size\n2021-01-01,100_5\n";
        let mut output = Vec::new();
        let result = CsvCuller::new().cull(input.as_bytes(), &mut output);
        assert!(matches!(result, Err(FormatError::MissingColumn(c)) if c == ASK_COLUMN));
    }

    #[test]
    fn test_passthrough_keeps_all_columns() {
        let input = "day,ask_price_ask_size,bid_price_bid_size\n2021-01-01,100_5,200_3\n";
        let culler = CsvCuller::passthrough();
        assert!(!culler.is_culling());
        assert_eq!(run(&culler, input), input);
        assert_eq!(
            run(&culler.with_header(false), input),
            "2021-01-01,100_5,200_3\n"
        );
    }

    #[test]
    fn test_custom_drop_set() {
        let input = "ts,extra,ask_price_ask_size,bid_price_bid_size\n1,x,5_1,6_1\n";
        let culler = CsvCuller::new().with_drop(["ts", "bid_price_bid_size"]);
        assert_eq!(run(&culler, input), "extra,ask_price_ask_size\nx,5\n");
    }

    #[test]
    fn test_cull_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("2021_01_01.ne");
        let dst = dir.path().join("2021_01_01.csv");
        std::fs::write(
            &src,
            "day,ask_price_ask_size,bid_price_bid_size\n2021-01-01,100_5,200_3\n",
        )
        .unwrap();

        let rows = CsvCuller::new().cull_file(&src, &dst).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(
            std::fs::read_to_string(&dst).unwrap(),
            "day,ask_price_ask_size\n2021-01-01,100\n"
        );
    }

    #[test]
    fn test_remove_size() {
        assert_eq!(remove_size("100_5"), "100");
        assert_eq!(remove_size("100_5_9"), "100");
        assert_eq!(remove_size("100"), "100");
        assert_eq!(remove_size(""), "");
    }
}
