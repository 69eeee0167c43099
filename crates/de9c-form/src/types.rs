use crate::totals::ColumnTotals;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum De9cError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid template: {0}")]
    Template(String),
}

pub type Result<T> = std::result::Result<T, De9cError>;

/// One employee row from the payroll CSV.
///
/// Monetary amounts keep their normalized text so they can be written to the
/// form exactly as read; they are only parsed when summing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeRecord {
    pub ssn: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub subject_wages: String,
    pub pit_wages: String,
    pub pit_withheld: String,
}

/// A group of at most [`ROWS_PER_PAGE`](crate::ROWS_PER_PAGE) employees that
/// lands on one output page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Zero-based position in the output document
    pub index: usize,
    pub employees: Vec<EmployeeRecord>,
    pub totals: ColumnTotals,
}

impl Page {
    /// 1-based page number as printed on the form
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// What a fill run produced
#[derive(Debug, Clone, PartialEq)]
pub struct FillSummary {
    pub employees: usize,
    pub pages: usize,
    pub page_totals: Vec<ColumnTotals>,
    pub grand_totals: ColumnTotals,
    /// Contract fields the template does not carry; these were skipped
    pub missing_fields: Vec<String>,
}
