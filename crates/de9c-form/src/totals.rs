//! Monetary column sums

use crate::types::EmployeeRecord;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Strip currency formatting from a cell: `"$1,234.56"` becomes `"1234.56"`.
pub fn clean_money(raw: &str) -> String {
    raw.replace(['$', ','], "").trim().to_string()
}

/// Parse a normalized amount. Empty, malformed and non-finite values are zero.
pub fn parse_amount(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Format an amount the way the form expects it
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Sums of the three monetary columns
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnTotals {
    pub subject_wages: f64,
    pub pit_wages: f64,
    pub pit_withheld: f64,
}

impl ColumnTotals {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            subject_wages: parse_amount(&record.subject_wages),
            pit_wages: parse_amount(&record.pit_wages),
            pit_withheld: parse_amount(&record.pit_withheld),
        }
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a EmployeeRecord>) -> Self {
        records.into_iter().map(Self::from_record).sum()
    }

    /// Two-decimal text for each column, in form order
    pub fn formatted(&self) -> [String; 3] {
        [
            format_amount(self.subject_wages),
            format_amount(self.pit_wages),
            format_amount(self.pit_withheld),
        ]
    }
}

impl Add for ColumnTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            subject_wages: self.subject_wages + rhs.subject_wages,
            pit_wages: self.pit_wages + rhs.pit_wages,
            pit_withheld: self.pit_withheld + rhs.pit_withheld,
        }
    }
}

impl AddAssign for ColumnTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ColumnTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a ColumnTotals> for ColumnTotals {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for ColumnTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [wages, pit_wages, withheld] = self.formatted();
        write!(
            f,
            "subject wages {wages}, PIT wages {pit_wages}, PIT withheld {withheld}"
        )
    }
}
