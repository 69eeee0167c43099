use crate::types::*;
use chrono::{Local, NaiveDate};

/// Date format used throughout the form (`06/30/24`)
pub const FORM_DATE_FORMAT: &str = "%m/%d/%y";

/// Reporting quarter, always 1 through 4
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quarter(u8);

impl Quarter {
    pub fn new(quarter: u8) -> Result<Self> {
        if (1..=4).contains(&quarter) {
            Ok(Self(quarter))
        } else {
            Err(De9cError::Config(format!("Quarter must be 1-4, got {quarter}")))
        }
    }

    /// Parse user input such as `"2"`
    pub fn parse(text: &str) -> Result<Self> {
        let value: u8 = text
            .trim()
            .parse()
            .map_err(|_| De9cError::Config(format!("Quarter must be 1-4, got '{}'", text.trim())))?;
        Self::new(value)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Month numbers covered by the quarter
    pub fn months(self) -> (u32, u32, u32) {
        let first = u32::from(self.0 - 1) * 3 + 1;
        (first, first + 1, first + 2)
    }

    /// Last calendar day of the quarter
    pub fn end_date(self, year: i32) -> Result<NaiveDate> {
        let (_, _, last_month) = self.months();
        let day = match last_month {
            3 | 12 => 31,
            _ => 30,
        };
        NaiveDate::from_ymd_opt(year, last_month, day)
            .ok_or_else(|| De9cError::Config(format!("Year {year} is out of range")))
    }

    /// Quarter end in form format, e.g. `06/30/24` for 2024 Q2
    pub fn end_date_string(self, year: i32) -> Result<String> {
        Ok(self.end_date(year)?.format(FORM_DATE_FORMAT).to_string())
    }
}

/// Parse a four-digit tax year
pub fn parse_year(text: &str) -> Result<i32> {
    let year: i32 = text
        .trim()
        .parse()
        .map_err(|_| De9cError::Config(format!("Year must be a number, got '{}'", text.trim())))?;
    check_year(year)?;
    Ok(year)
}

fn check_year(year: i32) -> Result<()> {
    if (1000..=9999).contains(&year) {
        Ok(())
    } else {
        Err(De9cError::Config(format!(
            "Year must have four digits, got {year}"
        )))
    }
}

/// Header values repeated on every page
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnHeader {
    pub year: i32,
    pub quarter: Quarter,
    pub employer_account: String,
    /// Printed in both the "quarter ended" and "due" boxes
    pub quarter_end: String,
}

impl ReturnHeader {
    /// Header with the quarter end computed from year and quarter
    pub fn new(year: i32, quarter: Quarter, employer_account: impl Into<String>) -> Result<Self> {
        Ok(Self {
            year,
            quarter,
            employer_account: employer_account.into(),
            quarter_end: quarter.end_date_string(year)?,
        })
    }

    /// Replace the computed quarter end with user-supplied text
    pub fn with_quarter_end(mut self, quarter_end: impl Into<String>) -> Self {
        self.quarter_end = quarter_end.into();
        self
    }

    /// Two-digit year as printed in the `Year` box
    pub fn short_year(&self) -> String {
        format!("{:02}", self.year.rem_euclid(100))
    }

    /// Two-digit month boxes
    pub fn month_boxes(&self) -> [String; 3] {
        let (m1, m2, m3) = self.quarter.months();
        [format!("{m1:02}"), format!("{m2:02}"), format!("{m3:02}")]
    }
}

/// Who signs the return (page 1)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signer {
    pub name: String,
    pub title: String,
    pub phone: String,
    pub date: String,
}

/// Today's date in form format
pub fn today() -> String {
    Local::now().format(FORM_DATE_FORMAT).to_string()
}

/// Everything a fill run needs besides the input files
#[derive(Debug, Clone, PartialEq)]
pub struct FillOptions {
    pub header: ReturnHeader,
    pub signer: Signer,
}

impl FillOptions {
    pub fn validate(&self) -> Result<()> {
        check_year(self.header.year)?;

        if self.header.employer_account.trim().is_empty() {
            return Err(De9cError::Config(
                "Employer account number is required".to_string(),
            ));
        }

        Ok(())
    }
}
