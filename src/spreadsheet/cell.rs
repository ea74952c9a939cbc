use calamine::Data;
use chrono::Duration;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Display;

/// A decoded cell value as handed over by the spreadsheet adapter.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing cell, empty cell or a configured null literal
    #[default]
    Null,
    /// Text value
    Text(String),
    /// Numeric value (integers are widened)
    Number(f64),
    /// Spreadsheet error code such as `#DIV/0!`
    Error(String),
}

impl CellValue {
    /// Builds a text cell.
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_owned())
    }

    /// Converts a calamine cell, applying null literals and the error policy.
    pub fn from_data(data: &Data, nulls: &HashSet<String>, error_as_null: bool) -> Self {
        match data {
            Data::Empty => Self::Null,
            Data::Int(value) => Self::Number(*value as f64),
            Data::Float(value) => Self::Number(*value),
            Data::Bool(value) => Self::text(if *value { "TRUE" } else { "FALSE" }),
            Data::String(value) | Data::DateTimeIso(value) | Data::DurationIso(value) => {
                if nulls.contains(value) {
                    Self::Null
                } else {
                    Self::Text(value.to_owned())
                }
            }
            Data::DateTime(value) => datetime_text(value.as_f64(), value.is_duration())
                .map(Self::Text)
                .unwrap_or_else(|| Self::Error(format!("invalid date serial {}", value.as_f64()))),
            Data::Error(_) if error_as_null => Self::Null,
            Data::Error(error) => Self::Error(error.to_string()),
        }
    }

    /// Normalizes the cell: null and empty text become `None`, everything else
    /// (including the blank sentinel) is returned unchanged.
    pub fn normalize(&self) -> Option<&CellValue> {
        match self {
            Self::Null => None,
            Self::Text(value) if value.is_empty() => None,
            _ => Some(self),
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(value) | Self::Error(value) => write!(f, "{}", value),
            // Integral numbers print without a decimal part
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{}", *value as i64)
            }
            Self::Number(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Renders a date serial: durations and time-only serials as `hh:mm:ss`,
/// everything else as a datetime.
fn datetime_text(serial: f64, is_duration: bool) -> Option<String> {
    if is_duration || (0.0..1.0).contains(&serial) {
        to_time_string(serial)
    } else {
        to_datetime_string(serial)
    }
}

/// Converts a day fraction to `hh:mm:ss`; hours keep counting past 24.
fn to_time_string(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let elapsed = Duration::seconds((serial * 86_400f64).round() as i64);
    Some(format!(
        "{:02}:{:02}:{:02}",
        elapsed.num_hours(),
        elapsed.num_minutes() % 60,
        elapsed.num_seconds() % 60
    ))
}

/// Converts an Excel date serial (1900 date system) to an ISO datetime string.
/// Handles the Lotus 1-2-3 leap year bug for serials before 1900-03-01.
fn to_datetime_string(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let days = serial.trunc() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch + Duration::days(days + if days < 60 { 1 } else { 0 });
    let milliseconds = (serial.fract() * 86_400_000f64).round() as i64;
    let datetime = date.and_hms_opt(0, 0, 0)? + Duration::milliseconds(milliseconds);
    Some(datetime.format("%Y-%m-%d %H:%M:%S").to_string())
}
