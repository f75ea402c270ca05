//! Cell Identity and Status
//!
//! A cell is one (student, date) attendance entry in the calendar grid.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CellKeyError;

/// Date format used by the grid's `data-date` attribute and the update URL.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const KEY_DELIMITER: char = '-';

/// Composite identifier of a grid cell.
///
/// String form is `"{student_id}-{YYYY-MM-DD}"`. The date itself contains
/// the delimiter, so parsing splits at the first occurrence only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub student_id: u32,
    pub date: NaiveDate,
}

impl CellKey {
    pub fn new(student_id: u32, date: NaiveDate) -> Self {
        Self { student_id, date }
    }

    /// Build a key from the two raw `data-*` attribute values of a cell element.
    pub fn from_attrs(student_id: &str, date: &str) -> Result<Self, CellKeyError> {
        let student_id = student_id
            .trim()
            .parse::<u32>()
            .map_err(|_| CellKeyError::StudentId(student_id.to_string()))?;
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
            .map_err(|_| CellKeyError::Date(date.to_string()))?;
        Ok(Self { student_id, date })
    }

    /// Date as it appears in `data-date` and in the update URL.
    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.student_id, KEY_DELIMITER, self.date.format(DATE_FORMAT))
    }
}

impl FromStr for CellKey {
    type Err = CellKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (student_id, date) = s
            .split_once(KEY_DELIMITER)
            .ok_or_else(|| CellKeyError::MissingDelimiter(s.to_string()))?;
        Self::from_attrs(student_id, date)
    }
}

/// Attendance status accepted by the quick-update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Present,
    Absent,
    Sick,
    Holiday,
    FieldTrip,
}

impl Status {
    /// All statuses in shortcut order (digit 1 is `Present`).
    pub const ALL: [Status; 5] = [
        Status::Present,
        Status::Absent,
        Status::Sick,
        Status::Holiday,
        Status::FieldTrip,
    ];

    /// Wire code sent as the `status` form field.
    pub fn code(self) -> &'static str {
        match self {
            Status::Present => "PRESENT",
            Status::Absent => "ABSENT",
            Status::Sick => "SICK",
            Status::Holiday => "HOLIDAY",
            Status::FieldTrip => "FIELD_TRIP",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Present => "Present",
            Status::Absent => "Absent",
            Status::Sick => "Sick",
            Status::Holiday => "Holiday",
            Status::FieldTrip => "Field Trip",
        }
    }

    /// Bootstrap button variant for the batch action button.
    pub fn button_class(self) -> &'static str {
        match self {
            Status::Present => "btn-success",
            Status::Absent => "btn-danger",
            Status::Sick => "btn-warning",
            Status::Holiday => "btn-info",
            Status::FieldTrip => "btn-primary",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Map a number-key shortcut (`'1'..='5'`) to its status.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        if n == 0 {
            return None;
        }
        Self::ALL.get(n - 1).copied()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
