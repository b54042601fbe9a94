use std::{
    cmp::Ordering,
    io,
    ops::Range,
    path::{Path, PathBuf},
    str::FromStr,
};

use logos::Logos;
use miette::Diagnostic;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Suffix appended to every rendered temperature.
pub const DEGREE_SYMBOL: &str = "°C";

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t]+")] // Ignore this regex pattern between tokens
enum Token {
    #[token(",")]
    Comma,

    #[regex(r"-?[0-9]+(\.[0-9]+)?", priority = 6)]
    Number,

    // Anything else up to the next delimiter, e.g. a timestamp
    #[regex(r"[^,\n \t]+")]
    Text,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConvertError {
    #[error("invalid number: `{0}`")]
    InvalidNumber(String),
    #[error("invalid date format: `{0}`, expected an ISO-8601 timestamp with offset")]
    InvalidDateFormat(String),
}

/// Raised by [`mean`] when there is nothing to average.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
#[error("cannot compute statistics over an empty sequence")]
pub struct EmptyInput;

#[derive(Debug, Error, Diagnostic)]
pub enum ParseRowError {
    #[error("malformed row `{0}`: expected `date,low,high`")]
    MalformedRow(String),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),
}

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Row(#[from] ParseRowError),
}

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Empty(#[from] EmptyInput),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Convert(#[from] ConvertError),
}

/// Converts a Fahrenheit temperature to Celsius, rounded to one decimal
/// place (half away from zero, the `f32::round` behaviour).
pub fn fahrenheit_to_celsius(fahrenheit: f32) -> f32 {
    let celsius = (fahrenheit - 32.0) * 5.0 / 9.0;
    (celsius * 10.0).round() / 10.0
}

/// Renders a temperature with the degree suffix. No rounding happens here,
/// the value is displayed as-is.
pub fn format_temperature(temperature: f32) -> String {
    format!("{temperature}{DEGREE_SYMBOL}")
}

/// Normalizes numeric text into an `f32`.
pub fn parse_numeric(s: &str) -> Result<f32, ConvertError> {
    s.trim()
        .parse()
        .map_err(|_| ConvertError::InvalidNumber(s.to_string()))
}

/// Renders an ISO-8601 timestamp as e.g. `Tuesday 06 July 2021`.
///
/// The weekday, day, month and year come from the timestamp's own local
/// components. The offset must parse but doesn't shift anything.
pub fn convert_date(iso: &str) -> Result<String, ConvertError> {
    let date = OffsetDateTime::parse(iso, &Rfc3339)
        .map_err(|_| ConvertError::InvalidDateFormat(iso.to_string()))?;
    Ok(format!(
        "{} {:02} {} {}",
        date.weekday(),
        date.day(),
        date.month(),
        date.year()
    ))
}

/// Arithmetic mean over the whole slice.
pub fn mean(values: &[f32]) -> Result<f32, EmptyInput> {
    if values.is_empty() {
        return Err(EmptyInput);
    }
    Ok(values.iter().sum::<f32>() / values.len() as f32)
}

/// Smallest value and the index of its first occurrence, `None` when the
/// slice is empty. Ties keep the earliest index.
pub fn find_min(values: &[f32]) -> Option<(f32, usize)> {
    let mut best = (*values.first()?, 0);
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value.total_cmp(&best.0) == Ordering::Less {
            best = (value, index);
        }
    }
    Some(best)
}

/// Largest value and the index of its first occurrence, `None` when the
/// slice is empty. Ties keep the earliest index.
pub fn find_max(values: &[f32]) -> Option<(f32, usize)> {
    let mut best = (*values.first()?, 0);
    for (index, &value) in values.iter().enumerate().skip(1) {
        if value.total_cmp(&best.0) == Ordering::Greater {
            best = (value, index);
        }
    }
    Some(best)
}

/// One observed day. Temperatures are Fahrenheit; the date stays the raw
/// ISO-8601 string and is only validated when a report renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: String,
    pub low: f32,
    pub high: f32,
}

impl Record {
    fn parse(line: &str) -> Result<Self, ParseRowError> {
        let mut row = Token::lexer(line);

        let date = match row.next() {
            Some(Ok(Token::Text | Token::Number)) => row.slice().to_string(),
            _ => return Err(ParseRowError::MalformedRow(line.to_string())),
        };
        match row.next() {
            Some(Ok(Token::Comma)) => (),
            _ => return Err(ParseRowError::MalformedRow(line.to_string())),
        }

        let low = match row.next() {
            Some(Ok(Token::Number | Token::Text)) => parse_numeric(row.slice())?,
            _ => return Err(ParseRowError::MalformedRow(line.to_string())),
        };
        match row.next() {
            Some(Ok(Token::Comma)) => (),
            _ => return Err(ParseRowError::MalformedRow(line.to_string())),
        }

        let high = match row.next() {
            Some(Ok(Token::Number | Token::Text)) => parse_numeric(row.slice())?,
            _ => return Err(ParseRowError::MalformedRow(line.to_string())),
        };

        // Exactly three fields per row
        match row.next() {
            None => (),
            _ => return Err(ParseRowError::MalformedRow(line.to_string())),
        }

        Ok(Self { date, low, high })
    }
}

/// All records of one source file, in file order. Dates are not required to
/// be unique or sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl FromStr for Dataset {
    type Err = ParseRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();
        // First line is the header
        lines.next();

        let mut records = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            records.push(Record::parse(line)?);
        }

        Ok(Self { records })
    }
}

impl Dataset {
    /// Lowest low to highest high, `None` on an empty dataset.
    pub fn temperature_range(&self) -> Option<Range<f32>> {
        let lowest = self
            .records
            .iter()
            .map(|record| record.low)
            .min_by(|left, right| left.total_cmp(right))?;
        let highest = self
            .records
            .iter()
            .map(|record| record.high)
            .max_by(|left, right| left.total_cmp(right))?;
        Some(lowest..highest)
    }

    /// Aggregate report over every record: extremes with their dates plus
    /// the average low and high, all in Celsius.
    ///
    /// An empty dataset is an error here, not an empty report.
    pub fn overview(&self) -> Result<String, ReportError> {
        let lows: Vec<f32> = self.records.iter().map(|record| record.low).collect();
        let highs: Vec<f32> = self.records.iter().map(|record| record.high).collect();

        let (low, low_index) = find_min(&lows).ok_or(EmptyInput)?;
        let (high, high_index) = find_max(&highs).ok_or(EmptyInput)?;

        let lowest = format_temperature(fahrenheit_to_celsius(low));
        let highest = format_temperature(fahrenheit_to_celsius(high));
        let lowest_date = convert_date(&self.records[low_index].date)?;
        let highest_date = convert_date(&self.records[high_index].date)?;

        let average_low = format_temperature(fahrenheit_to_celsius(mean(&lows)?));
        let average_high = format_temperature(fahrenheit_to_celsius(mean(&highs)?));

        let days = self.records.len();
        Ok(format!(
            "{days} Day Overview\n  \
             The lowest temperature will be {lowest}, and will occur on {lowest_date}.\n  \
             The highest temperature will be {highest}, and will occur on {highest_date}.\n  \
             The average low this week is {average_low}.\n  \
             The average high this week is {average_high}.\n"
        ))
    }

    /// One block per record, in input order. An empty dataset yields an
    /// empty string.
    pub fn daily_summary(&self) -> Result<String, ReportError> {
        let mut summary = String::new();
        for record in &self.records {
            let day = convert_date(&record.date)?;
            let minimum = format_temperature(fahrenheit_to_celsius(record.low));
            let maximum = format_temperature(fahrenheit_to_celsius(record.high));
            summary.push_str(&format!(
                "---- {day} ----\n  \
                 Minimum Temperature: {minimum}\n  \
                 Maximum Temperature: {maximum}\n\n"
            ));
        }
        Ok(summary)
    }
}

/// Reads and parses the file at `path`. The file is re-read on every call;
/// any bad row aborts the whole load.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io(e),
    })?;
    Ok(text.parse()?)
}
